//! Missing-data detector

use crate::filter::FilteredSubset;

/// Requested countries with no rows in the filtered subset, in request
/// order. Independent of overall emptiness: a non-empty result can
/// still be missing some requested countries. An empty return means no
/// diagnostic.
pub fn detect_missing(requested: &[String], subset: &FilteredSubset<'_>) -> Vec<String> {
    requested
        .iter()
        .filter(|country| !subset.contains_country(country))
        .cloned()
        .collect()
}
