//! Per-project estimation context.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{District, PayItemCode};

/// What the engine knows about the project being estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Project district; `None` restricts aggregation to statewide windows.
    pub district: Option<District>,
    /// Reference date for window look-backs.
    pub as_of: NaiveDate,
    /// Planned quantity per item, used for quantity-band filtering.
    #[serde(default)]
    pub target_quantities: BTreeMap<PayItemCode, f64>,
}

impl ProjectContext {
    pub fn new(district: Option<District>, as_of: NaiveDate) -> Self {
        Self {
            district,
            as_of,
            target_quantities: BTreeMap::new(),
        }
    }

    pub fn with_quantity(mut self, code: PayItemCode, quantity: f64) -> Self {
        self.target_quantities.insert(code, quantity);
        self
    }

    /// Positive, finite target quantity for `code`, if any.
    pub fn target_quantity(&self, code: &PayItemCode) -> Option<f64> {
        self.target_quantities
            .get(code)
            .copied()
            .filter(|q| q.is_finite() && *q > 0.0)
    }

    /// The project district when it is one of the six regions.
    pub fn regional_district(&self) -> Option<District> {
        self.district.filter(District::is_regional)
    }
}
