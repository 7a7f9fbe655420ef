//! Shared constants for the costest pricing engine.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "COSTEST_LOG";

/// Filter used when `COSTEST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "costest_core=info,costest_pricing=info";

/// Scale of the sample-size term in the confidence formula: `1 - e^(-n/30)`.
pub const CONFIDENCE_SAMPLE_SCALE: f64 = 30.0;

/// Upper bound applied to every confidence score so it stays in `[0, 1)`.
pub const MAX_CONFIDENCE: f64 = 1.0 - f64::EPSILON;

/// Minimum supporting contracts before a summary entry may price an item.
pub const MIN_SUMMARY_CONTRACTS: u32 = 3;

/// Note text emitted for items no tier could price.
pub const NO_DATA_NOTE: &str = "NO_DATA: no tier produced sufficient data; review manually";

// ---- Column names consumed by the estimate/audit writers ----

pub const COL_ITEM_CODE: &str = "ITEM_CODE";
pub const COL_UNIT_PRICE_EST: &str = "UNIT_PRICE_EST";
pub const COL_MEAN_UNIT_PRICE: &str = "MEAN_UNIT_PRICE";
pub const COL_DATA_POINTS_USED: &str = "DATA_POINTS_USED";
pub const COL_STD_DEV: &str = "STD_DEV";
pub const COL_COEF_VAR: &str = "COEF_VAR";
pub const COL_CONFIDENCE: &str = "CONFIDENCE";
pub const COL_SOURCE: &str = "SOURCE";
pub const COL_NOTES: &str = "NOTES";
