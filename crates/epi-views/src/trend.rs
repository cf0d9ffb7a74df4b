//! Multi-country time-series view

use indexmap::IndexMap;
use serde::Serialize;

use epi_core::{FilteredSubset, Selection, ViewBuilder, ViewKind};
use epi_data::Dataset;

/// One (year, value) sample. Absent values are kept so the renderer
/// can show a gap instead of interpolating across it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// Parallel per-country series over a shared year axis. Series order
/// follows first appearance in the subset; years present may differ
/// between countries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    series: IndexMap<String, Vec<TrendPoint>>,
}

impl TrendSeries {
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn points(&self, country: &str) -> Option<&[TrendPoint]> {
        self.series.get(country).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TrendPoint])> {
        self.series
            .iter()
            .map(|(country, points)| (country.as_str(), points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Groups subset rows by country and sorts each series year-ascending.
#[derive(Debug, Default)]
pub struct TrendSeriesBuilder;

impl ViewBuilder for TrendSeriesBuilder {
    type Output = TrendSeries;

    fn kind(&self) -> ViewKind {
        ViewKind::Trend
    }

    fn build(
        &self,
        _dataset: &Dataset,
        _selection: &Selection,
        subset: &FilteredSubset<'_>,
    ) -> TrendSeries {
        let mut series: IndexMap<String, Vec<TrendPoint>> = IndexMap::new();
        for record in subset.rows() {
            series
                .entry(record.country().to_string())
                .or_default()
                .push(TrendPoint {
                    year: record.year(),
                    value: subset.value_of(record),
                });
        }
        for points in series.values_mut() {
            points.sort_by_key(|point| point.year);
        }
        TrendSeries { series }
    }
}
