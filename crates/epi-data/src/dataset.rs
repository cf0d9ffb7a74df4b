//! Immutable in-memory dataset keyed by (country, year)

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::DataError;

/// A single observation row: one country in one year, with one value
/// slot per discovered indicator column. Absent values stay `None` all
/// the way through; they are never coerced to zero here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    country: String,
    year: i32,
    values: Vec<Option<f64>>,
}

impl Record {
    pub fn new(country: impl Into<String>, year: i32, values: Vec<Option<f64>>) -> Self {
        Self {
            country: country.into(),
            year,
            values,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Value for the indicator at `indicator_idx`, `None` when absent.
    pub fn value(&self, indicator_idx: usize) -> Option<f64> {
        self.values.get(indicator_idx).copied().flatten()
    }

    pub(crate) fn arity(&self) -> usize {
        self.values.len()
    }
}

/// The full dataset plus metadata discovered at load time: the ordered
/// indicator column names, the distinct country list, and the observed
/// year bounds. Created once, never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    indicators: Vec<String>,
    indicator_lookup: AHashMap<String, usize>,
    countries: Vec<String>,
    records: Vec<Record>,
    year_bounds: (i32, i32),
}

impl Dataset {
    /// Build a dataset from discovered indicator names and loaded rows.
    pub fn from_records(indicators: Vec<String>, records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        for record in &records {
            if record.arity() != indicators.len() {
                return Err(DataError::ColumnMismatch {
                    expected: indicators.len(),
                    found: record.arity(),
                });
            }
        }

        let indicator_lookup = indicators
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        // Distinct countries in first-appearance order
        let mut seen = AHashSet::new();
        let mut countries = Vec::new();
        let mut min_year = i32::MAX;
        let mut max_year = i32::MIN;
        for record in &records {
            if seen.insert(record.country.clone()) {
                countries.push(record.country.clone());
            }
            min_year = min_year.min(record.year);
            max_year = max_year.max(record.year);
        }

        Ok(Self {
            indicators,
            indicator_lookup,
            countries,
            records,
            year_bounds: (min_year, max_year),
        })
    }

    /// Indicator column names, in dataset column order.
    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    /// Column index for an indicator name, if it exists.
    pub fn indicator_index(&self, name: &str) -> Option<usize> {
        self.indicator_lookup.get(name).copied()
    }

    /// Distinct countries, in first-appearance order.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    /// Observed (min_year, max_year), inclusive.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.year_bounds
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}
