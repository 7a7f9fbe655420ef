//! Unit Price Summary entries.

use serde::{Deserialize, Serialize};

use super::{PayItemCode, SummaryPeriod};
use crate::errors::InputError;

/// Statewide weighted-average price for one item over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub item_code: PayItemCode,
    pub weighted_avg: f64,
    pub low: f64,
    pub high: f64,
    pub supporting_contracts: u32,
    pub period: SummaryPeriod,
    /// Calendar year the summary was published for, when known.
    #[serde(default)]
    pub calendar_year: Option<i32>,
}

impl SummaryEntry {
    /// Rejects a reversed `[low, high]` range.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.low > self.high || self.low.is_nan() || self.high.is_nan() {
            return Err(InputError::InvalidSummaryRange {
                item_code: self.item_code.to_string(),
                period: self.period.to_string(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}
