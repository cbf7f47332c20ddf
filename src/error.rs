//! Error types shared by every pipeline stage.

use thiserror::Error;

/// Errors that can abort a pipeline run.
///
/// No stage recovers from another stage's error; they all bubble up to the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required source column is absent from the dataset header.
    #[error("schema error: missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Cleaning removed every row.
    #[error("dataset is empty after cleaning; nothing to aggregate")]
    EmptyDataset,

    /// A record without a neighborhood reached aggregation under the `fail` policy.
    #[error("row {row} has no neighborhood value")]
    MissingGroupKey { row: usize },

    /// Rows need a severity imputed but no row carries an observed severity.
    #[error("cannot impute severity: no observed severity values in dataset")]
    NoObservedSeverity,

    /// A non-empty cell could not be parsed as its column's type.
    #[error("row {row}: invalid value {value:?} in column {column}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
