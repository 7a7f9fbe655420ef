//! Logging setup: `tracing` events filtered per engine stage.

pub mod setup;

pub use setup::{engine_filter, init_tracing};
