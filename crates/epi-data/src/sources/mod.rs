//! Data sources for one-time dataset loading

pub mod csv_source;

pub use csv_source::CsvSource;
