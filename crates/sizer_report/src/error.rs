//! Error types for report rendering.

use sizer_core::SizingError;
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid share link: {0}")]
    InvalidShareLink(String),

    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
