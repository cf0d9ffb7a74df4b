//! Plain-text render adapter
//!
//! Demonstration renderer for the three derived views. A charting
//! frontend would implement the same trait against its own artifact
//! type.

use std::fmt::Write;

use itertools::Itertools;

use epi_views::{GeoFrame, RenderAdapter, SummaryRow, TrendSeries};

const NO_DATA: &str = "NULL";

pub struct TextRenderer;

impl RenderAdapter<TrendSeries> for TextRenderer {
    type Artifact = String;

    fn render(&self, view: &TrendSeries) -> String {
        let mut out = String::new();
        for (country, points) in view.iter() {
            let samples = points
                .iter()
                .map(|point| match point.value {
                    Some(value) => format!("{}={:.2}", point.year, value),
                    None => format!("{}=-", point.year),
                })
                .join(", ");
            let _ = writeln!(out, "  {country}: {samples}");
        }
        out
    }
}

impl RenderAdapter<Vec<GeoFrame>> for TextRenderer {
    type Artifact = String;

    fn render(&self, view: &Vec<GeoFrame>) -> String {
        let mut out = String::new();
        for frame in view {
            let without_data = frame.iter().filter(|(_, entry)| entry.value.is_none()).count();
            let _ = writeln!(
                out,
                "  {}: {} countries ({} without data)",
                frame.year,
                frame.len(),
                without_data
            );
        }
        out
    }
}

impl RenderAdapter<Vec<SummaryRow>> for TextRenderer {
    type Artifact = String;

    fn render(&self, view: &Vec<SummaryRow>) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "  {:<24} {:>10} {:>10} {:>10} {:>6}",
            "Geographic area", "Mean", "Min", "Max", "Count"
        );
        for row in view {
            let _ = writeln!(
                out,
                "  {:<24} {:>10} {:>10} {:>10} {:>6}",
                row.country,
                fmt_stat(row.mean),
                fmt_stat(row.min),
                fmt_stat(row.max),
                row.non_null_count
            );
        }
        out
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => NO_DATA.to_string(),
    }
}
