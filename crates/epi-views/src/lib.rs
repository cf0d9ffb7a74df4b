//! Derived view builders for the indicator explorer
//!
//! Three pure builders turn a filtered subset into renderer-agnostic
//! structures: per-country time series, per-year geographic frames, and
//! per-country summary statistics. The render adapter trait is the seam
//! a charting layer plugs into.

mod geo;
mod render;
mod stats;
mod trend;

pub use geo::{GeoEntry, GeoFrame, GeoFrameBuilder};
pub use render::RenderAdapter;
pub use stats::{SummaryRow, SummaryStatsBuilder};
pub use trend::{TrendPoint, TrendSeries, TrendSeriesBuilder};

#[cfg(test)]
pub(crate) mod fixtures {
    use epi_data::{Dataset, Record};

    /// Shared test dataset: Uganda has a gap in 2011, Kenya only has
    /// rows after 2015, Chad only before 2006 (and its 2000-2001 rows
    /// carry no values at all).
    pub fn dataset() -> Dataset {
        let indicators = vec![
            "Estimated incidence rate".to_string(),
            "AIDS-related deaths".to_string(),
        ];
        let records = vec![
            Record::new("Chad", 2000, vec![None, None]),
            Record::new("Chad", 2001, vec![None, None]),
            Record::new("Uganda", 2012, vec![Some(2.1), None]),
            Record::new("Uganda", 2010, vec![Some(2.4), Some(110.0)]),
            Record::new("Uganda", 2011, vec![None, Some(105.0)]),
            Record::new("Kenya", 2016, vec![Some(1.8), Some(90.0)]),
            Record::new("Kenya", 2017, vec![Some(1.7), Some(88.0)]),
            Record::new("Chad", 2005, vec![Some(0.9), Some(40.0)]),
        ];
        Dataset::from_records(indicators, records).unwrap()
    }
}
