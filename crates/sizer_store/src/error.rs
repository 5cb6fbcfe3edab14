//! Error types for history and saved-configuration persistence.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing persisted sizing data.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("Saved configuration not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration import: {0}")]
    InvalidImport(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
