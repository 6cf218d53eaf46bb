//! Error types for configuration loading.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}
