//! Configuration errors.

use super::error_code::{self, RiskErrorCode};

/// Failures while loading or checking a `riskgraph.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read riskgraph config at {path}")]
    FileNotFound { path: String },

    #[error("Malformed riskgraph config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid setting {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl RiskErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
