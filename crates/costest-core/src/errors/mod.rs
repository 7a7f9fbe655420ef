//! Error handling for costest.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Data insufficiency is never an error: tiers report it as a value and the
//! selector falls through to the next tier.

pub mod config_error;
pub mod error_code;
pub mod estimate_error;
pub mod input_error;
pub mod mapping_error;

pub use config_error::ConfigError;
pub use error_code::CostestErrorCode;
pub use estimate_error::EstimateError;
pub use input_error::InputError;
pub use mapping_error::MappingError;
