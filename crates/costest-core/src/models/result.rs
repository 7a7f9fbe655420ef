//! Estimate results handed to the estimate/audit writers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    COL_COEF_VAR, COL_CONFIDENCE, COL_DATA_POINTS_USED, COL_ITEM_CODE, COL_MEAN_UNIT_PRICE,
    COL_NOTES, COL_SOURCE, COL_STD_DEV, COL_UNIT_PRICE_EST,
};

/// Which data tier priced an item. Tiers are tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceTier {
    CategoryMix,
    DesignMemoRollup,
    UnitPriceSummary,
    NoData,
}

impl SourceTier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CategoryMix => "CATEGORY_MIX",
            Self::DesignMemoRollup => "DESIGN_MEMO_ROLLUP",
            Self::UnitPriceSummary => "UNIT_PRICE_SUMMARY",
            Self::NoData => "NO_DATA",
        }
    }
}

impl fmt::Display for SourceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The priced, annotated row for one pay item.
///
/// Built once per item per run and never mutated; fields are read through
/// accessors. Two runs over identical inputs produce equal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    #[serde(rename = "ITEM_CODE")]
    item_code: String,
    #[serde(rename = "SOURCE")]
    source_tier: SourceTier,
    #[serde(rename = "MEAN_UNIT_PRICE")]
    mean_unit_price: f64,
    #[serde(rename = "UNIT_PRICE_EST")]
    unit_price_est: f64,
    #[serde(rename = "STD_DEV")]
    std_dev: Option<f64>,
    #[serde(rename = "COEF_VAR")]
    coef_var: Option<f64>,
    #[serde(rename = "DATA_POINTS_USED")]
    data_points_used: usize,
    #[serde(rename = "CONFIDENCE")]
    confidence: f64,
    #[serde(rename = "NOTES")]
    notes: String,
}

/// Statistics backing a priced result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedFigures {
    pub mean_unit_price: f64,
    pub unit_price_est: f64,
    pub std_dev: Option<f64>,
    pub coef_var: Option<f64>,
    pub data_points_used: usize,
    pub confidence: f64,
}

impl EstimateResult {
    /// Column order used by [`EstimateResult::to_row`].
    pub const COLUMNS: [&'static str; 9] = [
        COL_ITEM_CODE,
        COL_UNIT_PRICE_EST,
        COL_MEAN_UNIT_PRICE,
        COL_DATA_POINTS_USED,
        COL_STD_DEV,
        COL_COEF_VAR,
        COL_CONFIDENCE,
        COL_SOURCE,
        COL_NOTES,
    ];

    /// A result priced by one of the data tiers.
    pub fn priced(
        item_code: impl Into<String>,
        source_tier: SourceTier,
        figures: PricedFigures,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            source_tier,
            mean_unit_price: figures.mean_unit_price,
            unit_price_est: figures.unit_price_est,
            std_dev: figures.std_dev,
            coef_var: figures.coef_var,
            data_points_used: figures.data_points_used,
            confidence: figures.confidence,
            notes: notes.into(),
        }
    }

    /// The zero-priced placeholder for an item no tier could price.
    pub fn no_data(item_code: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            source_tier: SourceTier::NoData,
            mean_unit_price: 0.0,
            unit_price_est: 0.0,
            std_dev: None,
            coef_var: None,
            data_points_used: 0,
            confidence: 0.0,
            notes: notes.into(),
        }
    }

    pub fn item_code(&self) -> &str {
        &self.item_code
    }

    pub fn source_tier(&self) -> SourceTier {
        self.source_tier
    }

    /// Unrounded central price from the winning tier.
    pub fn mean_unit_price(&self) -> f64 {
        self.mean_unit_price
    }

    /// Published (rounded) unit price.
    pub fn unit_price_est(&self) -> f64 {
        self.unit_price_est
    }

    /// `None` for the summary and no-data tiers.
    pub fn std_dev(&self) -> Option<f64> {
        self.std_dev
    }

    /// `None` for the summary and no-data tiers.
    pub fn coef_var(&self) -> Option<f64> {
        self.coef_var
    }

    pub fn data_points_used(&self) -> usize {
        self.data_points_used
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Render as `(column, cell)` pairs in [`EstimateResult::COLUMNS`] order.
    /// Undefined statistics render as empty cells.
    pub fn to_row(&self) -> Vec<(&'static str, String)> {
        let optional = |v: Option<f64>| v.map(|x| format!("{x:.4}")).unwrap_or_default();
        vec![
            (COL_ITEM_CODE, self.item_code.clone()),
            (COL_UNIT_PRICE_EST, format!("{:.2}", self.unit_price_est)),
            (COL_MEAN_UNIT_PRICE, format!("{:.4}", self.mean_unit_price)),
            (COL_DATA_POINTS_USED, self.data_points_used.to_string()),
            (COL_STD_DEV, optional(self.std_dev)),
            (COL_COEF_VAR, optional(self.coef_var)),
            (COL_CONFIDENCE, format!("{:.4}", self.confidence)),
            (COL_SOURCE, self.source_tier.name().to_string()),
            (COL_NOTES, self.notes.clone()),
        ]
    }
}
