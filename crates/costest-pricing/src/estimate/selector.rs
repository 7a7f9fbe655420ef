//! Per-item tier selection.

use std::collections::BTreeSet;

use costest_core::config::EstimatorConfig;
use costest_core::errors::ConfigError;
use costest_core::models::{
    EstimateResult, MappingDebugRow, PayItemCode, PricedFigures, ProjectContext, SourceTier,
};
use tracing::debug;

use super::confidence::confidence;
use super::notes::{self, Misses};
use super::rounding::round_unit_price;
use crate::aggregation::{AggregateStat, AggregationRequest, Aggregator, HistoricalPool};
use crate::mapping::{MappingTable, ResolvedMapping};
use crate::summary::{SummaryAdjuster, SummaryOutcome, SummaryTable};

/// Read-only inputs shared by every item of a run, plus the project being
/// estimated.
#[derive(Debug, Clone, Copy)]
pub struct EstimateContext<'a> {
    pub records: &'a HistoricalPool,
    pub mappings: &'a MappingTable,
    pub summaries: &'a SummaryTable,
    pub project: &'a ProjectContext,
}

/// One item's result and, when the rollup tier priced it, its mapping audit
/// rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEstimate {
    pub result: EstimateResult,
    pub mapping_debug: Vec<MappingDebugRow>,
}

impl ItemEstimate {
    fn plain(result: EstimateResult) -> Self {
        Self {
            result,
            mapping_debug: Vec::new(),
        }
    }
}

/// The pricing engine. Holds only its validated configuration; every
/// estimate is a pure function of the configuration and the context.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Price one item. The first sufficient tier wins.
    pub fn estimate(&self, code: &PayItemCode, ctx: &EstimateContext<'_>) -> ItemEstimate {
        let aggregator = Aggregator::new(&self.config);
        let target_quantity = ctx.project.target_quantity(code);
        let mut misses = Misses::default();

        // Tier 1: the item's own history.
        let own = BTreeSet::from([code.clone()]);
        let request = AggregationRequest {
            codes: &own,
            project: ctx.project,
            target_quantity,
        };
        let search = aggregator.first_sufficient(ctx.records, &request);
        if let Some(stat) = search.stat {
            debug!(item = %code, window = %stat.window, n = stat.n, "priced from own history");
            let mut notes = notes::category_mix(&stat, &self.config);
            notes::sampling(&mut notes, stat.n, &self.config);
            let result = self.historical_result(code, SourceTier::CategoryMix, &stat, 0.0, notes);
            return ItemEstimate::plain(result);
        }
        misses.historical = search.closest;

        // Tier 2: pooled history of the design memo rollup.
        if let Some(mapping) = ctx.mappings.get(code) {
            let request = AggregationRequest {
                codes: &mapping.obsolete_codes,
                project: ctx.project,
                target_quantity,
            };
            let search = aggregator.first_sufficient(ctx.records, &request);
            if let Some(stat) = search.stat {
                return self.rollup_estimate(code, mapping, &stat);
            }
            misses.rollup = Some((mapping.memo_label(), search.closest));
        }

        // Tier 3: statewide summary.
        let adjuster = SummaryAdjuster::new(&self.config);
        match adjuster.adjust_item(ctx.summaries, code, ctx.project.district, ctx.project.as_of) {
            SummaryOutcome::Adjusted(adjusted) => {
                debug!(item = %code, period = %adjusted.period, "priced from unit price summary");
                let mut notes = notes::summary(&adjusted);
                notes::sampling(&mut notes, adjusted.data_points_used, &self.config);
                let figures = PricedFigures {
                    mean_unit_price: adjusted.price,
                    unit_price_est: round_unit_price(adjusted.price),
                    std_dev: None,
                    coef_var: None,
                    data_points_used: adjusted.data_points_used,
                    confidence: confidence(adjusted.data_points_used, None),
                };
                let result = EstimateResult::priced(
                    code.as_str(),
                    SourceTier::UnitPriceSummary,
                    figures,
                    notes.finish(),
                );
                return ItemEstimate::plain(result);
            }
            SummaryOutcome::Insufficient(shortfalls) => misses.summary = shortfalls,
            SummaryOutcome::Missing => {}
        }

        debug!(item = %code, "no tier produced sufficient data");
        let notes = notes::no_data(&misses, self.config.min_samples);
        ItemEstimate::plain(EstimateResult::no_data(code.as_str(), notes))
    }

    fn rollup_estimate(
        &self,
        code: &PayItemCode,
        mapping: &ResolvedMapping,
        stat: &AggregateStat,
    ) -> ItemEstimate {
        let adder = self.config.transitional_adder(code);
        debug!(
            item = %code,
            memo = %mapping.memo_label(),
            window = %stat.window,
            n = stat.n,
            "priced from design memo rollup"
        );

        let mut notes = notes::rollup(stat, mapping, adder, &self.config);
        notes::sampling(&mut notes, stat.n, &self.config);
        let result = self.historical_result(
            code,
            SourceTier::DesignMemoRollup,
            stat,
            adder.unwrap_or(0.0),
            notes,
        );

        let mapping_rule = format!("DM {}", mapping.memo_label());
        let mapping_debug = mapping
            .obsolete_codes
            .iter()
            .map(|obsolete| {
                let contributed = stat.contributions.get(obsolete).copied().unwrap_or(0);
                MappingDebugRow {
                    source_item: obsolete.to_string(),
                    mapped_item: code.to_string(),
                    mapping_rule: mapping_rule.clone(),
                    adder_applied: adder.is_some(),
                    evidence: format!(
                        "{contributed} of {} records in {}; origin {}",
                        stat.n, stat.window, mapping.origin
                    ),
                }
            })
            .collect();

        ItemEstimate {
            result,
            mapping_debug,
        }
    }

    fn historical_result(
        &self,
        code: &PayItemCode,
        tier: SourceTier,
        stat: &AggregateStat,
        adder: f64,
        notes: notes::Notes,
    ) -> EstimateResult {
        let price = stat.price + adder;
        let figures = PricedFigures {
            mean_unit_price: price,
            unit_price_est: round_unit_price(price),
            std_dev: Some(stat.std_dev),
            coef_var: Some(stat.coef_var),
            data_points_used: stat.n,
            confidence: confidence(stat.n, Some(stat.coef_var)),
        };
        EstimateResult::priced(code.as_str(), tier, figures, notes.finish())
    }
}
