//! Error types for the btc_forecast crate

use thiserror::Error;

/// Custom error types for the btc_forecast crate
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from an invalid frequency/dataset selection
    #[error("Invalid frequency: {0} (choose daily, weekly or monthly)")]
    InvalidFrequency(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to model fitting or prediction
    #[error("Model error: {0}")]
    ModelError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from model artifact serialization
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from the dataset download
    #[error("Download error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error from chart rendering
    #[error("Plot error: {0}")]
    PlotError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, PipelineError>;
