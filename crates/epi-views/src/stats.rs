//! Per-country summary statistics view

use ahash::AHashMap;
use itertools::Itertools;
use serde::Serialize;

use epi_core::{FilteredSubset, Selection, ViewBuilder, ViewKind};
use epi_data::Dataset;

/// Summary statistics for one requested country. `None` statistics mean
/// the country had no present values in the filtered window; they are
/// never a numeric placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub country: String,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub non_null_count: usize,
}

/// Computes mean/min/max/count over present values, grouped by country.
/// Emits exactly one row per requested country, including countries
/// with no rows at all in the subset.
#[derive(Debug, Default)]
pub struct SummaryStatsBuilder;

impl ViewBuilder for SummaryStatsBuilder {
    type Output = Vec<SummaryRow>;

    fn kind(&self) -> ViewKind {
        ViewKind::Stats
    }

    fn build(
        &self,
        _dataset: &Dataset,
        selection: &Selection,
        subset: &FilteredSubset<'_>,
    ) -> Vec<SummaryRow> {
        let mut grouped: AHashMap<&str, Vec<f64>> = AHashMap::new();
        for record in subset.rows() {
            let bucket = grouped.entry(record.country()).or_default();
            if let Some(value) = subset.value_of(record) {
                bucket.push(value);
            }
        }
        selection
            .countries()
            .iter()
            .map(|country| {
                let values = grouped
                    .get(country.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                summarize(country, values)
            })
            .collect()
    }
}

fn summarize(country: &str, values: &[f64]) -> SummaryRow {
    let Some((min, max)) = values.iter().copied().minmax().into_option() else {
        return SummaryRow {
            country: country.to_string(),
            mean: None,
            min: None,
            max: None,
            non_null_count: 0,
        };
    };
    let sum: f64 = values.iter().sum();
    SummaryRow {
        country: country.to_string(),
        mean: Some(sum / values.len() as f64),
        min: Some(min),
        max: Some(max),
        non_null_count: values.len(),
    }
}
