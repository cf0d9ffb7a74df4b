//! Core engine for the indicator explorer
//!
//! This crate holds the reactive filter-to-derived-view pipeline: the
//! selection model, the filter engine with its per-view cardinality
//! policy, the missing-data detector, and the controller that re-runs
//! the pipeline on every selection change. Every outcome is a normal
//! classified return value; nothing here is a fatal fault.

pub mod controller;
pub mod events;
pub mod filter;
pub mod missing;
pub mod selection;

// Re-export commonly used types
pub use controller::{Computed, ViewBuilder, ViewController, ViewState};
pub use events::SelectionEvent;
pub use filter::{filter, FilterOutcome, FilteredSubset, InvalidReason};
pub use missing::detect_missing;
pub use selection::{Selection, ViewKind, YearRange};
