//! Audit notes attached to every estimate.
//!
//! Notes always name the tier and the window, pool, or period that priced
//! the item; rollup notes also name the memo id(s). Parts are joined with
//! `"; "`.

use costest_core::config::{EstimatorConfig, PriceBasis};
use costest_core::constants::NO_DATA_NOTE;
use costest_core::models::{PayItemCode, SourceTier, Window};

use crate::aggregation::{AggregateStat, BandStatus};
use crate::mapping::ResolvedMapping;
use crate::summary::{AdjustedPrice, Shortfall};

/// Accumulates note fragments for one item.
#[derive(Debug, Default)]
pub(crate) struct Notes {
    parts: Vec<String>,
}

impl Notes {
    pub(crate) fn push(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    pub(crate) fn finish(self) -> String {
        self.parts.join("; ")
    }
}

/// Statistics shared by both historical tiers.
pub(crate) fn aggregate(notes: &mut Notes, stat: &AggregateStat, config: &EstimatorConfig) {
    notes.push(format!("n={}", stat.n));
    if stat.trimmed > 0 {
        notes.push(format!(
            "{} trimmed beyond {} sigma",
            stat.trimmed, config.sigma_threshold
        ));
    }
    match stat.band {
        BandStatus::NotApplied => {}
        BandStatus::Applied { lower, upper } => {
            notes.push(format!("qty band {lower:.2}-{upper:.2}"));
        }
        BandStatus::Relaxed => notes.push("qty_relaxed"),
    }
    if config.price_basis != PriceBasis::Mean {
        notes.push(format!("basis {}", config.price_basis.name()));
    }
}

pub(crate) fn category_mix(stat: &AggregateStat, config: &EstimatorConfig) -> Notes {
    let mut notes = Notes::default();
    notes.push(format!("{} {}", SourceTier::CategoryMix, stat.window));
    aggregate(&mut notes, stat, config);
    notes
}

pub(crate) fn rollup(
    stat: &AggregateStat,
    mapping: &ResolvedMapping,
    adder: Option<f64>,
    config: &EstimatorConfig,
) -> Notes {
    let mut notes = Notes::default();
    notes.push(format!("{} {}", SourceTier::DesignMemoRollup, stat.window));
    notes.push(format!("memo {} ({})", mapping.memo_label(), mapping.origin));
    let pool: Vec<&str> = mapping
        .obsolete_codes
        .iter()
        .map(PayItemCode::as_str)
        .collect();
    notes.push(format!("pool {}", pool.join("+")));
    aggregate(&mut notes, stat, config);
    if let Some(adder) = adder {
        notes.push(format!("transitional adder +{adder:.2}"));
    }
    notes
}

pub(crate) fn summary(adjusted: &AdjustedPrice) -> Notes {
    let mut notes = Notes::default();
    notes.push(format!("{} {}", SourceTier::UnitPriceSummary, adjusted.period));
    if let Some(year) = adjusted.calendar_year {
        notes.push(format!("CY{year}"));
    }
    notes.push(format!("as of {}", adjusted.as_of));
    notes.push(format!("n={} contracts", adjusted.data_points_used));
    if (adjusted.factor - 1.0).abs() > f64::EPSILON {
        notes.push(format!("adj x{:.4}", adjusted.factor));
    }
    if adjusted.capped {
        notes.push("combined adj capped");
    }
    if adjusted.clamped {
        notes.push(format!(
            "clamped to summary range {:.2}-{:.2}",
            adjusted.low, adjusted.high
        ));
    }
    notes
}

/// Warn when fewer data points than the sampling target back a price.
pub(crate) fn sampling(notes: &mut Notes, n: usize, config: &EstimatorConfig) {
    if n > 0 && n < config.sample_target {
        notes.push(format!(
            "only {n} data points (target {})",
            config.sample_target
        ));
    }
}

/// What each tier found for an item that ends as NO_DATA.
#[derive(Debug, Default)]
pub(crate) struct Misses {
    pub(crate) historical: Option<(Window, usize)>,
    pub(crate) rollup: Option<(String, Option<(Window, usize)>)>,
    pub(crate) summary: Vec<Shortfall>,
}

pub(crate) fn no_data(misses: &Misses, min_samples: usize) -> String {
    let mut notes = Notes::default();
    notes.push(NO_DATA_NOTE);
    if let Some((window, n)) = misses.historical {
        notes.push(format!("best window {window} had {n} of {min_samples} records"));
    }
    match &misses.rollup {
        Some((memo, Some((window, n)))) => notes.push(format!(
            "memo {memo} pool best window {window} had {n} of {min_samples} records"
        )),
        Some((memo, None)) => notes.push(format!("memo {memo} pool had no records")),
        None => {}
    }
    for shortfall in &misses.summary {
        notes.push(format!("summary {shortfall}"));
    }
    notes.finish()
}
