//! Estimation errors and per-item failure context.

use super::error_code::{self, CostestErrorCode};
use super::{ConfigError, InputError, MappingError};

/// Errors surfaced by an estimation run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Malformed input: {0}")]
    Input(#[from] InputError),

    #[error("Item {item_code} failed in tier {tier}: {source}")]
    ItemFailed {
        item_code: String,
        tier: String,
        #[source]
        source: Box<EstimateError>,
    },
}

impl EstimateError {
    /// Wrap an error with the item and tier it occurred in.
    pub fn for_item(self, item_code: impl Into<String>, tier: impl Into<String>) -> Self {
        Self::ItemFailed {
            item_code: item_code.into(),
            tier: tier.into(),
            source: Box::new(self),
        }
    }
}

impl CostestErrorCode for EstimateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Mapping(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::ItemFailed { .. } => error_code::ESTIMATE_ERROR,
        }
    }
}
