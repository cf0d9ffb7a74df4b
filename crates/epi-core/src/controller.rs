//! Reactive controller: one per view
//!
//! Every selection event triggers one synchronous recompute of
//! filter -> missing-data detection -> view build. The controller keeps
//! nothing between evaluations beyond the latest selection and the
//! latest output, so re-running on a duplicate event is harmless.

use tracing::debug;

use epi_data::Dataset;

use crate::events::SelectionEvent;
use crate::filter::{filter, FilterOutcome, FilteredSubset, InvalidReason};
use crate::missing::detect_missing;
use crate::selection::{Selection, ViewKind};

/// Builds a view-specific structure from a filtered subset. The three
/// concrete builders (trend, geo, stats) live in the views crate.
pub trait ViewBuilder {
    type Output;

    fn kind(&self) -> ViewKind;

    fn build(
        &self,
        dataset: &Dataset,
        selection: &Selection,
        subset: &FilteredSubset<'_>,
    ) -> Self::Output;
}

/// Lifecycle of one view's output
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// No evaluation has happened yet
    Idle,
    /// Selection failed validation; terminal until the selection changes
    Invalid(InvalidReason),
    /// Well-formed selection, no matching rows
    Empty,
    /// Derived view available, possibly annotated with countries that
    /// had no data in the selected window
    Ready {
        view: T,
        missing_countries: Vec<String>,
    },
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready { .. })
    }
}

/// A recompute result stamped with the selection revision it started
/// from. A synchronous host commits it immediately; an asynchronous
/// host may finish computes out of order, and [`ViewController::commit`]
/// refuses the stale ones.
#[derive(Debug)]
pub struct Computed<T> {
    revision: u64,
    state: ViewState<T>,
}

impl<T> Computed<T> {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }
}

/// Per-view controller holding the latest selection and output
pub struct ViewController<B: ViewBuilder> {
    builder: B,
    selection: Selection,
    revision: u64,
    state: ViewState<B::Output>,
}

impl<B: ViewBuilder> ViewController<B> {
    pub fn new(builder: B, initial: Selection) -> Self {
        Self {
            builder,
            selection: initial,
            revision: 0,
            state: ViewState::Idle,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Monotonically increasing selection revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> &ViewState<B::Output> {
        &self.state
    }

    /// Apply a selection event and synchronously recompute.
    pub fn apply(&mut self, dataset: &Dataset, event: SelectionEvent) -> &ViewState<B::Output> {
        self.selection.apply(event);
        self.revision += 1;
        let computed = self.compute(dataset);
        self.commit(computed);
        &self.state
    }

    /// Recompute from the current selection without mutating it.
    pub fn refresh(&mut self, dataset: &Dataset) -> &ViewState<B::Output> {
        let computed = self.compute(dataset);
        self.commit(computed);
        &self.state
    }

    /// Pure recompute: filter, detect missing countries, build. Safe to
    /// run concurrently with other readers of the dataset.
    pub fn compute(&self, dataset: &Dataset) -> Computed<B::Output> {
        let state = match filter(dataset, &self.selection, self.builder.kind()) {
            FilterOutcome::Invalid(reason) => ViewState::Invalid(reason),
            FilterOutcome::Empty => ViewState::Empty,
            FilterOutcome::Valid(subset) => {
                let missing_countries = detect_missing(self.selection.countries(), &subset);
                let view = self.builder.build(dataset, &self.selection, &subset);
                ViewState::Ready {
                    view,
                    missing_countries,
                }
            }
        };
        Computed {
            revision: self.revision,
            state,
        }
    }

    /// Install a computed result unless a newer selection superseded it.
    /// Returns whether the result was installed; outputs always reflect
    /// the most recent selection, never an older one racing in later.
    pub fn commit(&mut self, computed: Computed<B::Output>) -> bool {
        if computed.revision < self.revision {
            debug!(
                view = self.builder.kind().label(),
                stale = computed.revision,
                current = self.revision,
                "discarding stale recompute"
            );
            return false;
        }
        self.state = computed.state;
        true
    }
}
