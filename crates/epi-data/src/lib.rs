//! Dataset loading and access for the indicator explorer
//!
//! The dataset is loaded once at process start and is immutable for the
//! lifetime of the process. Everything downstream holds read-only
//! references into it.

pub mod dataset;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use dataset::{Dataset, Record};
pub use sources::CsvSource;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid year '{value}'")]
    InvalidYear { row: usize, value: String },

    #[error("record has {found} values, expected {expected}")]
    ColumnMismatch { expected: usize, found: usize },

    #[error("dataset contains no rows")]
    EmptyDataset,
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
