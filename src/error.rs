//! Error types for the forecast_compare crate

use chrono::NaiveDate;
use thiserror::Error;

/// Custom error types for the forecast_compare crate
///
/// Every variant is local to a single comparator or preprocessing invocation;
/// a long-lived host (dashboard, refresh loop) is expected to display the
/// message and keep serving its other sections.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A source file or series is absent
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The two series share no calendar dates at all
    #[error("No overlapping dates between the two forecast series")]
    EmptyIntersection,

    /// A value column is constant, so a min-max scale is undefined
    #[error("Degenerate range: {0}")]
    DegenerateRange(String),

    /// Fewer aligned points than the operation requires
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A series contains the same calendar date twice under the Reject policy
    #[error("Duplicate date {0} in forecast series")]
    DuplicateDate(NaiveDate),

    /// Error related to data validation or parsing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, CompareError>;
