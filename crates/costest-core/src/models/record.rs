//! Historical bid records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{District, PayItemCode};
use crate::errors::InputError;

/// One awarded unit price for a pay item on a past contract (a bid tab row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub item_code: PayItemCode,
    pub contract_id: String,
    pub bid_date: NaiveDate,
    pub district: District,
    pub unit_price: f64,
    pub quantity: f64,
}

impl HistoricalRecord {
    /// Build a record, rejecting non-positive or non-finite price/quantity.
    pub fn new(
        item_code: PayItemCode,
        contract_id: impl Into<String>,
        bid_date: NaiveDate,
        district: District,
        unit_price: f64,
        quantity: f64,
    ) -> Result<Self, InputError> {
        let record = Self {
            item_code,
            contract_id: contract_id.into(),
            bid_date,
            district,
            unit_price,
            quantity,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the price/quantity invariants on an already-built record
    /// (records deserialized by ingestion skip the constructor).
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.unit_price.is_finite() && self.unit_price > 0.0) {
            return Err(InputError::NonPositivePrice {
                item_code: self.item_code.to_string(),
                contract_id: self.contract_id.clone(),
                unit_price: self.unit_price,
            });
        }
        if !(self.quantity.is_finite() && self.quantity > 0.0) {
            return Err(InputError::NonPositiveQuantity {
                item_code: self.item_code.to_string(),
                contract_id: self.contract_id.clone(),
                quantity: self.quantity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> PayItemCode {
        PayItemCode::parse("401-10258").unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_valid_record() {
        let r = HistoricalRecord::new(code(), "C-1", day(), District::Seymour, 10.0, 5.0).unwrap();
        assert_eq!(r.contract_id, "C-1");
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let err =
            HistoricalRecord::new(code(), "C-1", day(), District::Seymour, 0.0, 5.0).unwrap_err();
        assert!(matches!(err, InputError::NonPositivePrice { .. }));
        let err = HistoricalRecord::new(code(), "C-1", day(), District::Seymour, f64::NAN, 5.0)
            .unwrap_err();
        assert!(matches!(err, InputError::NonPositivePrice { .. }));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let err =
            HistoricalRecord::new(code(), "C-2", day(), District::Seymour, 3.0, -1.0).unwrap_err();
        assert!(matches!(err, InputError::NonPositiveQuantity { .. }));
    }
}
