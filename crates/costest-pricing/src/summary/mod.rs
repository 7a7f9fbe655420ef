//! Summary Adjuster: prices an item from the statewide Unit Price Summary
//! when no historical window is sufficient.

pub mod adjuster;
pub mod table;

pub use adjuster::{AdjustedPrice, Adjustment, Shortfall, SummaryAdjuster, SummaryOutcome};
pub use table::SummaryTable;
