//! Filter engine: selection validation and row subsetting

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use epi_data::{Dataset, Record};

use crate::selection::{Selection, ViewKind};

/// Why a selection failed structural validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    MissingIndicator,
    /// The indicator is set but is not a dataset column. The engine
    /// does not trust the UI to only offer discovered columns.
    UnknownIndicator(String),
    MissingCountries,
    TooManyCountries { cap: usize, requested: usize },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::MissingIndicator => write!(f, "missing indicator"),
            InvalidReason::UnknownIndicator(name) => write!(f, "unknown indicator '{name}'"),
            InvalidReason::MissingCountries => write!(f, "missing countries"),
            InvalidReason::TooManyCountries { cap, requested } => {
                write!(f, "too many countries ({requested} requested, cap {cap})")
            }
        }
    }
}

/// Rows matching a selection, borrowed from the dataset. Derivable
/// purely from (dataset, selection); recomputation is idempotent.
#[derive(Debug)]
pub struct FilteredSubset<'d> {
    rows: Vec<&'d Record>,
    indicator: &'d str,
    indicator_idx: usize,
    present: AHashSet<&'d str>,
}

impl<'d> FilteredSubset<'d> {
    pub fn rows(&self) -> &[&'d Record] {
        &self.rows
    }

    /// The resolved indicator column name.
    pub fn indicator(&self) -> &'d str {
        self.indicator
    }

    /// The selected indicator's value for one of this subset's rows.
    pub fn value_of(&self, record: &Record) -> Option<f64> {
        record.value(self.indicator_idx)
    }

    /// Whether any row for `country` made it into the subset.
    pub fn contains_country(&self, country: &str) -> bool {
        self.present.contains(country)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Classified result of running the filter over one selection
#[derive(Debug)]
pub enum FilterOutcome<'d> {
    Invalid(InvalidReason),
    Empty,
    Valid(FilteredSubset<'d>),
}

/// Validate a selection and compute its row subset.
///
/// Structural validation (indicator, cardinality) always precedes the
/// data-availability check, so an `Empty` outcome implies the selection
/// itself was well-formed.
pub fn filter<'d>(
    dataset: &'d Dataset,
    selection: &Selection,
    view: ViewKind,
) -> FilterOutcome<'d> {
    let indicator = match selection.indicator() {
        Some(name) => name,
        None => return FilterOutcome::Invalid(InvalidReason::MissingIndicator),
    };
    let indicator_idx = match dataset.indicator_index(indicator) {
        Some(idx) => idx,
        None => {
            return FilterOutcome::Invalid(InvalidReason::UnknownIndicator(indicator.to_string()))
        }
    };

    let countries = selection.countries();
    if countries.is_empty() {
        return FilterOutcome::Invalid(InvalidReason::MissingCountries);
    }
    if let Some(cap) = view.country_cap() {
        if countries.len() > cap {
            return FilterOutcome::Invalid(InvalidReason::TooManyCountries {
                cap,
                requested: countries.len(),
            });
        }
    }

    let wanted: AHashSet<&str> = countries.iter().map(String::as_str).collect();
    let years = selection.years();
    let mut rows = Vec::new();
    let mut present = AHashSet::new();
    for record in dataset.records() {
        if years.contains(record.year()) && wanted.contains(record.country()) {
            present.insert(record.country());
            rows.push(record);
        }
    }

    if rows.is_empty() {
        debug!(view = view.label(), indicator, "selection matched no rows");
        return FilterOutcome::Empty;
    }

    let indicator = dataset.indicators()[indicator_idx].as_str();
    FilterOutcome::Valid(FilteredSubset {
        rows,
        indicator,
        indicator_idx,
        present,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::YearRange;
    use epi_data::Record;

    fn dataset() -> Dataset {
        let indicators = vec!["incidence".to_string(), "deaths".to_string()];
        let records = vec![
            Record::new("Uganda", 2010, vec![Some(2.4), Some(110.0)]),
            Record::new("Uganda", 2011, vec![None, Some(105.0)]),
            Record::new("Kenya", 2016, vec![Some(1.8), Some(90.0)]),
            Record::new("Chad", 2005, vec![Some(0.9), Some(40.0)]),
        ];
        Dataset::from_records(indicators, records).unwrap()
    }

    fn selection(countries: &[&str], min: i32, max: i32) -> Selection {
        Selection::new(YearRange::new(min, max))
            .with_indicator(Some("incidence".to_string()))
            .with_countries(countries.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn unset_indicator_is_invalid() {
        let dataset = dataset();
        let sel = Selection::new(YearRange::new(2000, 2020))
            .with_countries(vec!["Uganda".to_string()]);
        let outcome = filter(&dataset, &sel, ViewKind::Trend);
        assert!(matches!(
            outcome,
            FilterOutcome::Invalid(InvalidReason::MissingIndicator)
        ));
    }

    #[test]
    fn unknown_indicator_is_invalid() {
        let dataset = dataset();
        let sel = selection(&["Uganda"], 2000, 2020)
            .with_indicator(Some("prevalence".to_string()));
        let outcome = filter(&dataset, &sel, ViewKind::Trend);
        assert!(matches!(
            outcome,
            FilterOutcome::Invalid(InvalidReason::UnknownIndicator(name)) if name == "prevalence"
        ));
    }

    #[test]
    fn empty_country_set_is_invalid_for_every_view() {
        let dataset = dataset();
        let sel = selection(&[], 2000, 2020);
        for view in [ViewKind::Trend, ViewKind::Map, ViewKind::Stats] {
            let outcome = filter(&dataset, &sel, view);
            assert!(
                matches!(
                    outcome,
                    FilterOutcome::Invalid(InvalidReason::MissingCountries)
                ),
                "view {:?}",
                view
            );
        }
    }

    #[test]
    fn trend_caps_at_four_countries() {
        let dataset = dataset();
        let sel = selection(&["a", "b", "c", "d", "e"], 2000, 2020);
        let outcome = filter(&dataset, &sel, ViewKind::Trend);
        assert!(matches!(
            outcome,
            FilterOutcome::Invalid(InvalidReason::TooManyCountries {
                cap: 4,
                requested: 5
            })
        ));
    }

    #[test]
    fn stats_caps_at_ten_countries() {
        let dataset = dataset();
        let names: Vec<&str> = [
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k",
        ]
        .to_vec();
        let sel = selection(&names, 2000, 2020);
        let outcome = filter(&dataset, &sel, ViewKind::Stats);
        assert!(matches!(
            outcome,
            FilterOutcome::Invalid(InvalidReason::TooManyCountries {
                cap: 10,
                requested: 11
            })
        ));
    }

    #[test]
    fn cardinality_violation_precedes_emptiness() {
        // Five countries on the trend view within a data-free window:
        // the structural failure wins.
        let dataset = dataset();
        let sel = selection(&["a", "b", "c", "d", "e"], 1900, 1901);
        let outcome = filter(&dataset, &sel, ViewKind::Trend);
        assert!(matches!(
            outcome,
            FilterOutcome::Invalid(InvalidReason::TooManyCountries { .. })
        ));
    }

    #[test]
    fn map_view_is_uncapped() {
        let dataset = dataset();
        let all: Vec<String> = dataset.countries().to_vec();
        let sel = Selection::new(YearRange::new(2000, 2020))
            .with_indicator(Some("incidence".to_string()))
            .with_countries(all);
        let outcome = filter(&dataset, &sel, ViewKind::Map);
        assert!(matches!(outcome, FilterOutcome::Valid(_)));
    }

    #[test]
    fn year_window_without_rows_is_empty() {
        let dataset = dataset();
        let sel = selection(&["Uganda"], 1990, 1995);
        let outcome = filter(&dataset, &sel, ViewKind::Trend);
        assert!(matches!(outcome, FilterOutcome::Empty));
    }

    #[test]
    fn unknown_countries_match_nothing_without_error() {
        let dataset = dataset();
        let sel = selection(&["Atlantis"], 2000, 2020);
        let outcome = filter(&dataset, &sel, ViewKind::Trend);
        assert!(matches!(outcome, FilterOutcome::Empty));
    }

    #[test]
    fn full_range_round_trips_the_dataset() {
        let dataset = dataset();
        let (min_year, max_year) = dataset.year_bounds();
        let all: Vec<&str> = dataset.countries().iter().map(String::as_str).collect();
        let sel = selection(&all, min_year, max_year);
        match filter(&dataset, &sel, ViewKind::Stats) {
            FilterOutcome::Valid(subset) => {
                assert_eq!(subset.len(), dataset.row_count());
                // no duplicates: every dataset row appears exactly once
                for (row, original) in subset.rows().iter().zip(dataset.records()) {
                    assert_eq!(*row, original);
                }
            }
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn subset_resolves_indicator_values() {
        let dataset = dataset();
        let sel = selection(&["Uganda"], 2010, 2011);
        match filter(&dataset, &sel, ViewKind::Trend) {
            FilterOutcome::Valid(subset) => {
                assert_eq!(subset.indicator(), "incidence");
                assert_eq!(subset.len(), 2);
                assert_eq!(subset.value_of(subset.rows()[0]), Some(2.4));
                assert_eq!(subset.value_of(subset.rows()[1]), None);
                assert!(subset.contains_country("Uganda"));
                assert!(!subset.contains_country("Kenya"));
            }
            other => panic!("expected Valid, got {:?}", other),
        }
    }
}
