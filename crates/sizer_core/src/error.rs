//! Error types for the sizing engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sizing operations.
pub type SizerResult<T> = Result<T, SizingError>;

/// Errors that can occur while validating or evaluating a sizing configuration.
///
/// Saturation (a requirement larger than every catalog entry) is not an error:
/// it is reported as a warning on the result.
#[derive(Error, Debug)]
pub enum SizingError {
    #[error("Invalid data volume: {0} GB (must be a finite, non-negative number)")]
    InvalidDataVolume(f64),

    #[error("Invalid concurrency: {0} users (at least one concurrent user is required)")]
    InvalidConcurrency(u32),

    #[error("Invalid workload distribution: percentages sum to {total}, expected 100")]
    InvalidDistribution { total: f64 },

    #[error("Invalid workload distribution: {category} share {value} is outside 0-100")]
    InvalidDistributionShare { category: String, value: f64 },

    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Invalid reserved percentage: {0}")]
    InvalidReservedPercentage(String),

    #[error("Invalid peak usage multiplier: {0} (must be finite and greater than zero)")]
    InvalidPeakUsage(f64),

    #[error("Invalid growth rate: {0}% (must be finite and greater than -100)")]
    InvalidGrowthRate(f64),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Unknown workload profile: {0}")]
    UnknownWorkloadProfile(String),

    #[error("Invalid region '{id}': pricing multiplier {multiplier} must be greater than zero")]
    InvalidRegion { id: String, multiplier: f64 },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML encoding error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

impl SizingError {
    /// Whether this error describes invalid configuration content. Documents
    /// that fail to parse, or carry unknown enum values or negative counts,
    /// count as configuration errors. Failing to read or write the
    /// configuration source does not.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, SizingError::Io(_) | SizingError::TomlEncode(_))
    }

    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        SizingError::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}
