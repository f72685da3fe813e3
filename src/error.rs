//! Error types for the file and data boundaries of the model
//!
//! The projection and market-sizing math never fails; these errors only come
//! from loading configuration or reference data and from CSV export.

use thiserror::Error;

/// Errors raised while loading, validating or exporting model data
#[derive(Debug, Error)]
pub enum ModelError {
    /// Underlying file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV input or failed CSV write
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Attach-rate curve does not cover exactly one entry per projection year
    #[error("attach-rate curve has {actual} entries but the horizon is {expected} years")]
    AttachCurveLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
