//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Figment failed to gather or deserialize the configuration.
    #[error("Failed to load configuration: {0}")]
    Extraction(#[from] figment::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    ValidationError {
        /// What was wrong.
        message: String,
    },
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
