//! Error types for correlation runs

use ecoforensics_domain::ValidationError;
use thiserror::Error;

/// Engine configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A parameter is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that abort a correlation run
///
/// Missing or failed data sources are not errors; they lower confidence
/// instead. Only structurally invalid requests are rejected.
#[derive(Debug, Error)]
pub enum CorrelationError {
    /// Invalid geometry or time range
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] ValidationError),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for correlation operations
pub type Result<T> = std::result::Result<T, CorrelationError>;
