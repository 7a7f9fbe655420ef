//! CostestErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable code string that
/// audit writers can key on.
pub trait CostestErrorCode {
    /// Returns the error code string (e.g., "MAPPING_CONFLICT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const MAPPING_CONFLICT: &str = "MAPPING_CONFLICT";
pub const ESTIMATE_ERROR: &str = "ESTIMATE_ERROR";
