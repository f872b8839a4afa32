//! Error types for minn-analysis - Railway Programming
//!
//! All operations return `Result<T, AnalysisError>`.
//! Missing optional inputs are not errors; malformed inputs and write
//! failures are, and they propagate to the binary unhandled.

use thiserror::Error;

/// Unified error type for all analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    // ─── Data Errors ───

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("Missing column `{column}` in table `{table}`")]
    MissingColumn { table: String, column: String },

    #[error("Null value in column `{column}` at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Top-k must be a positive integer, got {0}")]
    InvalidTopK(usize),

    #[error("Sampling error: {0}")]
    Sampling(String),

    // ─── Infrastructure Errors ───

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
