//! Selection-changed events
//!
//! UI interactions arrive as explicit messages rather than framework
//! callback wiring; the controller applies them to its selection and
//! recomputes.

use serde::{Deserialize, Serialize};

use crate::selection::{Selection, YearRange};

/// One selection mutation, delivered to a [`crate::ViewController`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    IndicatorChanged(Option<String>),
    CountriesChanged(Vec<String>),
    YearRangeChanged(YearRange),
    /// Replace the whole selection at once
    Replaced(Selection),
}

impl Selection {
    /// Apply one event to this selection.
    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::IndicatorChanged(indicator) => self.set_indicator(indicator),
            SelectionEvent::CountriesChanged(countries) => self.set_countries(countries),
            SelectionEvent::YearRangeChanged(years) => self.set_years(years),
            SelectionEvent::Replaced(selection) => *self = selection,
        }
    }
}
