//! Indicator explorer shell
//!
//! Loads the dataset once at startup, wires one controller per view,
//! and drives them with selection events, printing the classified
//! results through the text renderer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use epi_core::{
    InvalidReason, Selection, SelectionEvent, ViewController, ViewState, YearRange,
};
use epi_data::CsvSource;
use epi_views::{GeoFrameBuilder, RenderAdapter, SummaryStatsBuilder, TrendSeriesBuilder};

mod text_render;
use text_render::TextRenderer;

const DEFAULT_DATA_PATH: &str = "data/processed/dash_clean.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let dataset = Arc::new(
        CsvSource::load(&path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?,
    );

    let (min_year, max_year) = dataset.year_bounds();
    let full_range = YearRange::new(min_year, max_year);
    let default_indicator = dataset.indicators().first().cloned();
    info!(
        indicator = default_indicator.as_deref().unwrap_or("<none>"),
        min_year, max_year, "initial selection defaults"
    );

    let mut trend = ViewController::new(
        TrendSeriesBuilder,
        Selection::new(full_range).with_indicator(default_indicator.clone()),
    );
    let mut map = ViewController::new(
        GeoFrameBuilder,
        Selection::new(full_range)
            .with_indicator(default_indicator.clone())
            // the map renders every country; there is no country picker
            .with_countries(dataset.countries().to_vec()),
    );
    let mut stats = ViewController::new(
        SummaryStatsBuilder,
        Selection::new(full_range).with_indicator(default_indicator),
    );

    let renderer = TextRenderer;
    let sample: Vec<String> = dataset.countries().iter().take(2).cloned().collect();

    // trend: before any countries are chosen the state is a prompt
    trend.refresh(&dataset);
    print_state("trend", trend.state(), |view| renderer.render(view));
    trend.apply(&dataset, SelectionEvent::CountriesChanged(sample.clone()));
    print_state("trend", trend.state(), |view| renderer.render(view));

    map.refresh(&dataset);
    print_state("map", map.state(), |view| renderer.render(view));

    stats.apply(&dataset, SelectionEvent::CountriesChanged(sample));
    print_state("stats", stats.state(), |view| renderer.render(view));

    Ok(())
}

/// Map a classified view state onto user-facing text. Wording lives
/// here, not in the engine.
fn print_state<T>(label: &str, state: &ViewState<T>, render: impl Fn(&T) -> String) {
    match state {
        ViewState::Idle => println!("[{label}] no selection yet"),
        ViewState::Invalid(reason) => println!("[{label}] {}", prompt_for(reason)),
        ViewState::Empty => println!("[{label}] No data available for the selected criteria."),
        ViewState::Ready {
            view,
            missing_countries,
        } => {
            if !missing_countries.is_empty() {
                println!(
                    "[{label}] Missing data for countries: {}",
                    missing_countries.join(", ")
                );
            }
            print!("[{label}]\n{}", render(view));
        }
    }
}

fn prompt_for(reason: &InvalidReason) -> String {
    match reason {
        InvalidReason::MissingIndicator => "Please select an indicator.".to_string(),
        InvalidReason::UnknownIndicator(name) => {
            format!("Unknown indicator: {name}.")
        }
        InvalidReason::MissingCountries => "Please select at least one country.".to_string(),
        InvalidReason::TooManyCountries { cap, .. } => {
            format!("Please select only up to {cap} countries.")
        }
    }
}
