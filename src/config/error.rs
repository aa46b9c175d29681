//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid prediction service URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Prediction path must start with '/'")]
    InvalidPredictPath,

    #[error("Invalid request timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
