//! Error types for the mljr-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the library crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(#[from] mljr_input::InputError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] mljr_gc::GcError),

    #[error("Invalid -x/--calc values: {reason}")]
    InvalidOverride { reason: String },

    #[error("Failed to append report to {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mljr-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<mljr_input::ValidationError> for AppError {
    fn from(err: mljr_input::ValidationError) -> Self {
        AppError::Input(err.into())
    }
}
