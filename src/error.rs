//! Error taxonomy for the statistics pipeline.
//!
//! Every stage returns [`StatsError`]; nothing is caught or retried, the
//! first error aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, coercing, aggregating or persisting tables.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The input CSV does not exist.
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input is not valid delimited text.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A configured column is absent from the header row.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A measured cell could not be converted to a float.
    #[error("column '{column}', row {row}: cannot convert '{value}' to float")]
    ValueConversion {
        column: String,
        row: usize,
        value: String,
    },

    /// A measured column was aggregated before being coerced.
    #[error("column '{column}' is not numeric")]
    NotNumeric { column: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StatsError {
    /// Wrap an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }
}
