//! Per-window aggregation and the specificity-ordered window search.

use std::collections::{BTreeMap, BTreeSet};

use costest_core::config::EstimatorConfig;
use costest_core::models::{HistoricalRecord, PayItemCode, ProjectContext, Scope, Window};
use serde::Serialize;
use tracing::debug;

use super::filters::{self, BandStatus};
use super::pool::HistoricalPool;
use super::stats::{self, SampleStats};
use super::trim;

/// What to aggregate: the pooled codes, whose project, and the target
/// quantity of the item being priced.
#[derive(Debug, Clone, Copy)]
pub struct AggregationRequest<'a> {
    pub codes: &'a BTreeSet<PayItemCode>,
    pub project: &'a ProjectContext,
    pub target_quantity: Option<f64>,
}

/// Statistics of the records retained in one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStat {
    pub window: Window,
    /// Retained records after band filtering and trimming.
    pub n: usize,
    pub mean: f64,
    /// Central price under the configured basis.
    pub price: f64,
    pub std_dev: f64,
    pub coef_var: f64,
    /// Records removed by sigma trimming.
    pub trimmed: usize,
    pub band: BandStatus,
    /// Retained records per contributing code.
    pub contributions: BTreeMap<PayItemCode, usize>,
}

/// Outcome of aggregating one window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowAggregate {
    Sufficient(AggregateStat),
    /// Fewer than `min_samples` records survived; `n` is how many did.
    Insufficient { window: Window, n: usize },
}

/// Result of walking the windows in specificity order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSearch {
    /// The first sufficient window, if any.
    pub stat: Option<AggregateStat>,
    /// The insufficient window that came closest, for notes.
    pub closest: Option<(Window, usize)>,
}

/// Stateless aggregation over a shared [`HistoricalPool`].
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Windows applicable to a project, in specificity order. District
    /// windows are skipped without a regional project district.
    pub fn windows_for(project: &ProjectContext) -> impl Iterator<Item = Window> {
        let has_district = project.regional_district().is_some();
        Window::ALL
            .into_iter()
            .filter(move |w| has_district || w.scope == Scope::State)
    }

    /// Aggregate the requested codes within one window.
    pub fn aggregate(
        &self,
        pool: &HistoricalPool,
        request: &AggregationRequest<'_>,
        window: Window,
    ) -> WindowAggregate {
        let in_window: Vec<&HistoricalRecord> = pool
            .records_for(request.codes)
            .filter(|r| filters::in_window(r, window, request.project))
            .collect();

        let (banded, band) = filters::quantity_band(
            in_window,
            request.target_quantity,
            self.config.qty_lower,
            self.config.qty_upper,
            self.config.relax_empty_quantity_band,
        );

        let prices: Vec<f64> = banded.iter().map(|r| r.unit_price).collect();
        let mask = trim::keep_mask(&prices, self.config.sigma_threshold, self.config.min_trim_points);
        let retained: Vec<&HistoricalRecord> = banded
            .iter()
            .zip(&mask)
            .filter_map(|(r, keep)| keep.then_some(*r))
            .collect();
        let trimmed = banded.len() - retained.len();

        let retained_prices: Vec<f64> = retained.iter().map(|r| r.unit_price).collect();
        let sample = SampleStats::from_prices(&retained_prices);

        debug!(
            window = %window,
            codes = request.codes.len(),
            banded = banded.len(),
            trimmed,
            n = sample.n,
            "aggregated window"
        );

        if sample.n < self.config.min_samples {
            return WindowAggregate::Insufficient {
                window,
                n: sample.n,
            };
        }

        let mut contributions: BTreeMap<PayItemCode, usize> = BTreeMap::new();
        for record in &retained {
            *contributions.entry(record.item_code.clone()).or_default() += 1;
        }

        WindowAggregate::Sufficient(AggregateStat {
            window,
            n: sample.n,
            mean: sample.mean,
            price: stats::central_price(self.config.price_basis, &retained, &sample),
            std_dev: sample.std_dev,
            coef_var: sample.coef_var,
            trimmed,
            band,
            contributions,
        })
    }

    /// Try each applicable window in order; the first sufficient one wins.
    pub fn first_sufficient(
        &self,
        pool: &HistoricalPool,
        request: &AggregationRequest<'_>,
    ) -> WindowSearch {
        let mut search = WindowSearch::default();
        for window in Self::windows_for(request.project) {
            match self.aggregate(pool, request, window) {
                WindowAggregate::Sufficient(stat) => {
                    search.stat = Some(stat);
                    return search;
                }
                WindowAggregate::Insufficient { window, n } => {
                    let closer = search.closest.map_or(n > 0, |(_, best)| n > best);
                    if closer {
                        search.closest = Some((window, n));
                    }
                }
            }
        }
        search
    }
}
