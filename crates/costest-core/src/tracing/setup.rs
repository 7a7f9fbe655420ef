//! Subscriber setup for the estimation engine.
//!
//! Useful targets under `COSTEST_LOG`:
//! - `costest_pricing::mapping`: resolved/superseded rollups, rejected overlay rows
//! - `costest_pricing::aggregation`: per-window band, trim, and sample counts
//! - `costest_pricing::summary`: summary eligibility and clamping
//! - `costest_pricing::estimate`: the tier that priced each item, batch totals
//! - `costest_core::config`: config file loads

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Filter built from `directives`, or [`DEFAULT_LOG_FILTER`] when they are
/// absent or do not parse.
pub fn engine_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a formatted subscriber filtered by `COSTEST_LOG`,
/// e.g. `COSTEST_LOG=costest_pricing::aggregation=debug`.
///
/// Only the first call does anything; a subscriber installed elsewhere is
/// left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV_VAR).ok();
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(engine_filter(directives.as_deref()))
            .try_init();
    });
}
