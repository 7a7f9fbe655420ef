//! Malformed input errors.
//!
//! Raised while validating codes, records, and summary rows. The engine
//! excludes the offending value, logs it, and keeps going.

use super::error_code::{self, CostestErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("invalid pay item code {raw:?}: expected NNN-NNNNN or NNN-NNNNNN")]
    InvalidItemCode { raw: String },

    #[error("record {contract_id} for {item_code}: unit price {unit_price} is not positive")]
    NonPositivePrice {
        item_code: String,
        contract_id: String,
        unit_price: f64,
    },

    #[error("record {contract_id} for {item_code}: quantity {quantity} is not positive")]
    NonPositiveQuantity {
        item_code: String,
        contract_id: String,
        quantity: f64,
    },

    #[error("unknown district {raw:?}")]
    UnknownDistrict { raw: String },

    #[error("unknown summary period {raw:?}")]
    UnknownPeriod { raw: String },

    #[error("summary entry {item_code} ({period}): low {low} exceeds high {high}")]
    InvalidSummaryRange {
        item_code: String,
        period: String,
        low: f64,
        high: f64,
    },

    #[error("invalid date {raw:?}: expected YYYY-MM-DD")]
    InvalidDate { raw: String },
}

impl CostestErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_INPUT
    }
}
