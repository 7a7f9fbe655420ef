//! Estimator configuration errors.

use super::error_code::{self, CostestErrorCode};

/// Why an [`EstimatorConfig`](crate::config::EstimatorConfig) was refused.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("estimator config {path} could not be read")]
    FileNotFound { path: String },

    /// `path` is `<string>` for documents parsed from memory.
    #[error("estimator config {path} is not valid TOML: {message}")]
    ParseError { path: String, message: String },

    #[error("{field}: {message}")]
    ValidationFailed { field: String, message: String },

    /// Two keys of one factor table name the same period, district, or code.
    #[error("{table} keys {first:?} and {second:?} both resolve to {resolved}")]
    AliasedKeys {
        table: &'static str,
        first: String,
        second: String,
        resolved: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl CostestErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
