// Single source of truth for all estimator default values.

// --- Aggregation ---
pub const DEFAULT_MIN_SAMPLES: usize = 3;
pub const DEFAULT_SIGMA_THRESHOLD: f64 = 2.0;
pub const DEFAULT_MIN_TRIM_POINTS: usize = 3;
pub const DEFAULT_QTY_LOWER: f64 = 0.5;
pub const DEFAULT_QTY_UPPER: f64 = 1.5;
pub const DEFAULT_RELAX_EMPTY_QUANTITY_BAND: bool = false;
pub const DEFAULT_SAMPLE_TARGET: usize = 50;

// --- Summary adjustment ---
pub const DEFAULT_PERIOD_FACTOR: f64 = 1.0;
pub const DEFAULT_DISTRICT_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_MAX_COMBINED_ADJUSTMENT: f64 = 0.25;
