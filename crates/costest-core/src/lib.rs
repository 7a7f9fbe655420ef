//! # costest-core
//!
//! Foundation crate for the costest pricing engine.
//! Defines the data model, configuration, errors, constants, and tracing setup.
//! The pricing engine and every ingestion/writer collaborator depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::{EstimatorConfig, PriceBasis};
pub use errors::{ConfigError, CostestErrorCode, EstimateError, InputError, MappingError};
pub use models::{
    District, EstimateResult, HistoricalRecord, MappingDebugRow, MappingOrigin, PayItemCode,
    ProjectContext, RollupMapping, Scope, SourceTier, SummaryEntry, SummaryPeriod, Window,
};
