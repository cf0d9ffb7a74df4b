//! Geographic snapshot view
//!
//! One frame per year present in the subset, ordered year-ascending; a
//! single-year selection yields a single frame, a wider range an
//! animation sequence.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use epi_core::{FilteredSubset, Selection, ViewBuilder, ViewKind};
use epi_data::Dataset;

/// One country's entry in a frame. `magnitude` feeds visual size/color
/// encoding and collapses absence to 0.0; `value` is what hover detail
/// displays. The two are never conflated into one number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoEntry {
    pub value: Option<f64>,
    pub magnitude: f64,
}

impl GeoEntry {
    fn from_value(value: Option<f64>) -> Self {
        Self {
            value,
            magnitude: value.unwrap_or(0.0),
        }
    }

    /// Hover detail payload: the real value, or an explicit "no data"
    /// marker, never the sizing magnitude.
    pub fn detail(&self, indicator: &str) -> Value {
        match self.value {
            Some(value) => json!({ "indicator": indicator, "value": value }),
            None => json!({ "indicator": indicator, "value": "no data" }),
        }
    }
}

/// Country -> entry map for a single year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoFrame {
    pub year: i32,
    entries: IndexMap<String, GeoEntry>,
}

impl GeoFrame {
    pub fn get(&self, country: &str) -> Option<&GeoEntry> {
        self.entries.get(country)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeoEntry)> {
        self.entries
            .iter()
            .map(|(country, entry)| (country.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups subset rows into per-year frames.
#[derive(Debug, Default)]
pub struct GeoFrameBuilder;

impl ViewBuilder for GeoFrameBuilder {
    type Output = Vec<GeoFrame>;

    fn kind(&self) -> ViewKind {
        ViewKind::Map
    }

    fn build(
        &self,
        _dataset: &Dataset,
        _selection: &Selection,
        subset: &FilteredSubset<'_>,
    ) -> Vec<GeoFrame> {
        let mut by_year: BTreeMap<i32, IndexMap<String, GeoEntry>> = BTreeMap::new();
        for record in subset.rows() {
            by_year
                .entry(record.year())
                .or_default()
                .insert(
                    record.country().to_string(),
                    GeoEntry::from_value(subset.value_of(record)),
                );
        }
        debug!(frames = by_year.len(), "built geo frames");
        by_year
            .into_iter()
            .map(|(year, entries)| GeoFrame { year, entries })
            .collect()
    }
}
