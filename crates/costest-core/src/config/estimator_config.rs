//! Estimator configuration: sample thresholds, trimming, quantity band, and
//! summary adjustment factors.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use ::tracing::debug;
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::models::{District, PayItemCode, SummaryPeriod};

/// Central price reported for an aggregated set of bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    #[default]
    Mean,
    Median,
    /// Mean weighted by each bid's quantity.
    QuantityWeighted,
}

impl PriceBasis {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::QuantityWeighted => "quantity_weighted",
        }
    }
}

/// Immutable configuration handed to the engine at construction.
///
/// Map keys are kept as strings in the file format and resolved through the
/// typed accessors (`recency_factor`, `district_multiplier`,
/// `transitional_adder`); `validate` rejects keys that do not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Minimum retained records for the historical and rollup tiers. Default: 3.
    pub min_samples: usize,
    /// Trim bids further than this many standard deviations. 0 disables. Default: 2.0.
    pub sigma_threshold: f64,
    /// Fewest prices a set must hold before trimming applies. Default: 3.
    pub min_trim_points: usize,
    /// Lower quantity-band multiplier of the target quantity. Default: 0.5.
    pub qty_lower: f64,
    /// Upper quantity-band multiplier of the target quantity. Default: 1.5.
    pub qty_upper: f64,
    /// Keep the unfiltered set when the quantity band would empty it. Default: false.
    pub relax_empty_quantity_band: bool,
    pub price_basis: PriceBasis,
    /// Data points below which a sampling warning is noted. Default: 50.
    pub sample_target: usize,
    /// Per-period step factor for older summary periods (`STATE-24M`, `STATE-36M`).
    pub recency_steps: BTreeMap<String, f64>,
    /// Per-district multiplier applied to statewide summary prices.
    pub district_multipliers: BTreeMap<String, f64>,
    /// Cap on the combined summary adjustment, as a fraction. Default: 0.25.
    pub max_combined_adjustment: f64,
    /// Per-unit adder applied to rollup prices of a replacement code.
    pub transitional_adders: BTreeMap<String, f64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
            sigma_threshold: defaults::DEFAULT_SIGMA_THRESHOLD,
            min_trim_points: defaults::DEFAULT_MIN_TRIM_POINTS,
            qty_lower: defaults::DEFAULT_QTY_LOWER,
            qty_upper: defaults::DEFAULT_QTY_UPPER,
            relax_empty_quantity_band: defaults::DEFAULT_RELAX_EMPTY_QUANTITY_BAND,
            price_basis: PriceBasis::default(),
            sample_target: defaults::DEFAULT_SAMPLE_TARGET,
            recency_steps: BTreeMap::new(),
            district_multipliers: BTreeMap::new(),
            max_combined_adjustment: defaults::DEFAULT_MAX_COMBINED_ADJUSTMENT,
            transitional_adders: BTreeMap::new(),
        }
    }
}

impl EstimatorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(toml_str, "<string>")
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config = Self::parse_toml(&content, &path.display().to_string())?;
        debug!(path = %path.display(), "estimator config loaded");
        Ok(config)
    }

    fn parse_toml(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_samples == 0 {
            return Err(ConfigError::invalid("min_samples", "must be at least 1"));
        }
        if !(self.sigma_threshold.is_finite() && self.sigma_threshold >= 0.0) {
            return Err(ConfigError::invalid(
                "sigma_threshold",
                "must be a finite value >= 0",
            ));
        }
        if !(self.qty_lower.is_finite() && self.qty_lower > 0.0) {
            return Err(ConfigError::invalid("qty_lower", "must be greater than 0"));
        }
        if !(self.qty_upper.is_finite() && self.qty_upper >= self.qty_lower) {
            return Err(ConfigError::invalid(
                "qty_upper",
                "must be finite and >= qty_lower",
            ));
        }
        if !(0.0..1.0).contains(&self.max_combined_adjustment) {
            return Err(ConfigError::invalid(
                "max_combined_adjustment",
                "must be in [0, 1)",
            ));
        }
        let mut periods = BTreeMap::new();
        for (key, factor) in &self.recency_steps {
            let field = format!("recency_steps.{key}");
            let period = key
                .parse::<SummaryPeriod>()
                .map_err(|e| ConfigError::invalid(&field, e.to_string()))?;
            check_factor(&field, *factor)?;
            claim_key(&mut periods, "recency_steps", key, period)?;
        }
        let mut districts = BTreeMap::new();
        for (key, factor) in &self.district_multipliers {
            let field = format!("district_multipliers.{key}");
            let district = key
                .parse::<District>()
                .map_err(|e| ConfigError::invalid(&field, e.to_string()))?;
            check_factor(&field, *factor)?;
            claim_key(&mut districts, "district_multipliers", key, district)?;
        }
        let mut codes = BTreeMap::new();
        for (key, adder) in &self.transitional_adders {
            let field = format!("transitional_adders.{key}");
            let code =
                PayItemCode::parse(key).map_err(|e| ConfigError::invalid(&field, e.to_string()))?;
            if !(adder.is_finite() && *adder >= 0.0) {
                return Err(ConfigError::invalid(field, "must be a finite value >= 0"));
            }
            claim_key(&mut codes, "transitional_adders", key, code)?;
        }
        Ok(())
    }

    /// Step factor configured for a single period; 1.0 when absent.
    pub fn recency_step(&self, period: SummaryPeriod) -> f64 {
        self.recency_steps
            .iter()
            .find(|(key, _)| key.parse::<SummaryPeriod>().ok() == Some(period))
            .map_or(defaults::DEFAULT_PERIOD_FACTOR, |(_, factor)| *factor)
    }

    /// Cumulative escalation for an entry from `period`: the product of the
    /// step factors of every period between the most recent one and `period`.
    pub fn recency_factor(&self, period: SummaryPeriod) -> f64 {
        SummaryPeriod::ALL
            .iter()
            .filter(|p| (1..=period.gap()).contains(&p.gap()))
            .map(|p| self.recency_step(*p))
            .product()
    }

    /// Multiplier for a project district; 1.0 when absent or statewide.
    pub fn district_multiplier(&self, district: District) -> f64 {
        if !district.is_regional() {
            return defaults::DEFAULT_DISTRICT_MULTIPLIER;
        }
        self.district_multipliers
            .iter()
            .find(|(key, _)| key.parse::<District>().ok() == Some(district))
            .map_or(defaults::DEFAULT_DISTRICT_MULTIPLIER, |(_, factor)| *factor)
    }

    /// Adder configured for a replacement code, if any.
    pub fn transitional_adder(&self, code: &PayItemCode) -> Option<f64> {
        self.transitional_adders
            .iter()
            .find(|(key, _)| PayItemCode::parse(key).ok().as_ref() == Some(code))
            .map(|(_, adder)| *adder)
    }
}

/// Record that `key` resolves to `resolved`; a second key for the same
/// target is refused.
fn claim_key<'k, K: Ord + fmt::Display>(
    claimed: &mut BTreeMap<K, &'k str>,
    table: &'static str,
    key: &'k str,
    resolved: K,
) -> Result<(), ConfigError> {
    match claimed.entry(resolved) {
        Entry::Occupied(entry) => Err(ConfigError::AliasedKeys {
            table,
            first: entry.get().to_string(),
            second: key.to_string(),
            resolved: entry.key().to_string(),
        }),
        Entry::Vacant(entry) => {
            entry.insert(key);
            Ok(())
        }
    }
}

fn check_factor(field: &str, factor: f64) -> Result<(), ConfigError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a finite value > 0"))
    }
}
