//! Recency and region adjustment of statewide summary prices.

use std::fmt;

use chrono::NaiveDate;
use costest_core::config::EstimatorConfig;
use costest_core::constants::MIN_SUMMARY_CONTRACTS;
use costest_core::models::{District, PayItemCode, SummaryEntry, SummaryPeriod};
use serde::Serialize;
use tracing::debug;

use super::table::SummaryTable;

/// A summary price after adjustment and clamping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedPrice {
    pub price: f64,
    /// The entry's weighted average before adjustment.
    pub base_price: f64,
    pub period: SummaryPeriod,
    pub calendar_year: Option<i32>,
    pub data_points_used: usize,
    /// Combined recency × district factor actually applied.
    pub factor: f64,
    /// The combined factor hit the configured cap.
    pub capped: bool,
    /// The adjusted price was pulled into `[low, high]`.
    pub clamped: bool,
    pub low: f64,
    pub high: f64,
    pub as_of: NaiveDate,
}

/// Why a summary entry could not price an item.
#[derive(Debug, Clone, PartialEq)]
pub enum Shortfall {
    TooFewContracts { period: SummaryPeriod, contracts: u32 },
    NonPositiveAverage { period: SummaryPeriod, weighted_avg: f64 },
    ReversedRange { period: SummaryPeriod, low: f64, high: f64 },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewContracts { period, contracts } => write!(
                f,
                "{period} has {contracts} supporting contracts (need {MIN_SUMMARY_CONTRACTS})"
            ),
            Self::NonPositiveAverage {
                period,
                weighted_avg,
            } => write!(f, "{period} weighted average {weighted_avg} is not positive"),
            Self::ReversedRange { period, low, high } => {
                write!(f, "{period} range low {low} exceeds high {high}")
            }
        }
    }
}

/// Outcome of adjusting one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    Adjusted(AdjustedPrice),
    Insufficient(Shortfall),
}

/// Outcome of pricing an item from its summary entries.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Adjusted(AdjustedPrice),
    /// Entries exist but none qualifies; one shortfall per entry.
    Insufficient(Vec<Shortfall>),
    /// The item has no summary entry.
    Missing,
}

#[derive(Debug, Clone, Copy)]
pub struct SummaryAdjuster<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> SummaryAdjuster<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Adjust a single entry.
    ///
    /// The price is `weighted_avg × clamp(recency × district, 1 ± cap)`,
    /// then clamped into `[low, high]`. Nothing is applied after the clamp.
    pub fn adjust(
        &self,
        entry: &SummaryEntry,
        district: Option<District>,
        as_of: NaiveDate,
    ) -> Adjustment {
        if let Some(shortfall) = eligibility(entry) {
            debug!(item = %entry.item_code, %shortfall, "summary entry insufficient");
            return Adjustment::Insufficient(shortfall);
        }

        let recency = self.config.recency_factor(entry.period);
        let regional = district.map_or(1.0, |d| self.config.district_multiplier(d));
        let combined = recency * regional;
        let cap = self.config.max_combined_adjustment;
        let factor = combined.clamp(1.0 - cap, 1.0 + cap);
        let adjusted = entry.weighted_avg * factor;
        let price = adjusted.clamp(entry.low, entry.high);

        debug!(
            item = %entry.item_code,
            period = %entry.period,
            recency,
            regional,
            factor,
            price,
            "summary entry adjusted"
        );

        Adjustment::Adjusted(AdjustedPrice {
            price,
            base_price: entry.weighted_avg,
            period: entry.period,
            calendar_year: entry.calendar_year,
            data_points_used: entry.supporting_contracts as usize,
            factor,
            capped: factor != combined,
            clamped: price != adjusted,
            low: entry.low,
            high: entry.high,
            as_of,
        })
    }

    /// Price `code` from the most recent qualifying period.
    pub fn adjust_item(
        &self,
        table: &SummaryTable,
        code: &PayItemCode,
        district: Option<District>,
        as_of: NaiveDate,
    ) -> SummaryOutcome {
        let mut shortfalls = Vec::new();
        for entry in table.entries_for(code) {
            match self.adjust(entry, district, as_of) {
                Adjustment::Adjusted(price) => return SummaryOutcome::Adjusted(price),
                Adjustment::Insufficient(shortfall) => shortfalls.push(shortfall),
            }
        }
        if shortfalls.is_empty() {
            SummaryOutcome::Missing
        } else {
            SummaryOutcome::Insufficient(shortfalls)
        }
    }
}

fn eligibility(entry: &SummaryEntry) -> Option<Shortfall> {
    if entry.validate().is_err() {
        return Some(Shortfall::ReversedRange {
            period: entry.period,
            low: entry.low,
            high: entry.high,
        });
    }
    if entry.supporting_contracts < MIN_SUMMARY_CONTRACTS {
        return Some(Shortfall::TooFewContracts {
            period: entry.period,
            contracts: entry.supporting_contracts,
        });
    }
    if !(entry.weighted_avg.is_finite() && entry.weighted_avg > 0.0) {
        return Some(Shortfall::NonPositiveAverage {
            period: entry.period,
            weighted_avg: entry.weighted_avg,
        });
    }
    None
}
