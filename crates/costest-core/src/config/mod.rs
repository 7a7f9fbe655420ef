//! Estimator configuration.
//! TOML-based, immutable once handed to the engine.

pub mod defaults;
pub mod estimator_config;

pub use estimator_config::{EstimatorConfig, PriceBasis};
