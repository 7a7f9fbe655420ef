//! # costest-pricing
//!
//! Tiered unit-price estimation for construction pay items.
//!
//! Each item is priced by the first sufficient tier:
//! 1. CATEGORY_MIX: the item's own bid history, windowed district-first.
//! 2. DESIGN_MEMO_ROLLUP: history pooled across a design memo's obsolete codes.
//! 3. UNIT_PRICE_SUMMARY: the statewide summary, adjusted and clamped.
//! 4. NO_DATA: a zero-priced placeholder with explanatory notes.

pub mod aggregation;
pub mod estimate;
pub mod mapping;
pub mod summary;

pub use aggregation::{AggregateStat, Aggregator, HistoricalPool};
pub use estimate::{
    confidence, round_unit_price, EstimateBatch, EstimateContext, EstimationRun, Estimator,
    ItemEstimate, RunInputs,
};
pub use mapping::{group_overlay_rows, resolve, MappingTable, ResolvedMapping};
pub use summary::{AdjustedPrice, SummaryAdjuster, SummaryOutcome, SummaryTable};
