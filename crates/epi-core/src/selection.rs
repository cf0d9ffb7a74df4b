//! Selection model: what the user has currently chosen for one view

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The three dashboard views a selection can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    /// Multi-country time-series comparison
    Trend,
    /// Geographic snapshot, optionally animated across years
    Map,
    /// Per-country summary statistics table
    Stats,
}

impl ViewKind {
    /// Maximum number of countries this view accepts; `None` means
    /// uncapped (the map renders all countries simultaneously).
    pub fn country_cap(self) -> Option<usize> {
        match self {
            ViewKind::Trend => Some(4),
            ViewKind::Map => None,
            ViewKind::Stats => Some(10),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Trend => "trend",
            ViewKind::Map => "map",
            ViewKind::Stats => "stats",
        }
    }
}

/// Inclusive year range. Construction normalizes a reversed pair, so
/// `min <= max` holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    pub fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(self) -> i32 {
        self.min
    }

    pub fn max(self) -> i32 {
        self.max
    }

    pub fn contains(self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// The current user choice for one view: an indicator, a set of
/// countries, and a year range. Countries keep their request order
/// (diagnostics report in that order); duplicates are dropped on entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    indicator: Option<String>,
    countries: Vec<String>,
    years: YearRange,
}

impl Selection {
    pub fn new(years: YearRange) -> Self {
        Self {
            indicator: None,
            countries: Vec::new(),
            years,
        }
    }

    pub fn with_indicator(mut self, indicator: Option<String>) -> Self {
        self.set_indicator(indicator);
        self
    }

    pub fn with_countries(mut self, countries: Vec<String>) -> Self {
        self.set_countries(countries);
        self
    }

    pub fn set_indicator(&mut self, indicator: Option<String>) {
        self.indicator = indicator;
    }

    pub fn set_countries(&mut self, mut countries: Vec<String>) {
        let mut seen = AHashSet::new();
        countries.retain(|country| seen.insert(country.clone()));
        self.countries = countries;
    }

    pub fn set_years(&mut self, years: YearRange) {
        self.years = years;
    }

    pub fn indicator(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn years(&self) -> YearRange {
        self.years
    }
}
