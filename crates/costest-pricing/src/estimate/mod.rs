//! Tier Selector and Confidence Engine.
//!
//! Tiers are tried strictly in order (CATEGORY_MIX, DESIGN_MEMO_ROLLUP,
//! UNIT_PRICE_SUMMARY) and the first sufficient one prices the item. There is
//! no blending across tiers. NO_DATA is the terminal fallback.

pub mod confidence;
mod notes;
pub mod rounding;
pub mod run;
pub mod selector;

pub use confidence::confidence;
pub use rounding::round_unit_price;
pub use run::{EstimateBatch, EstimationRun, RunInputs};
pub use selector::{EstimateContext, Estimator, ItemEstimate};
