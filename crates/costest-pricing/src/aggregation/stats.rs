//! Sample statistics and price basis selection.

use costest_core::config::PriceBasis;
use costest_core::models::HistoricalRecord;
use statrs::statistics::{Data, Median, Statistics};

/// Count, mean, and dispersion of a set of unit prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (n-1); 0 when `n <= 1`.
    pub std_dev: f64,
    /// `std_dev / mean`; 0 when the mean is 0.
    pub coef_var: f64,
}

impl SampleStats {
    pub fn from_prices(prices: &[f64]) -> Self {
        let n = prices.len();
        if n == 0 {
            return Self {
                n,
                mean: 0.0,
                std_dev: 0.0,
                coef_var: 0.0,
            };
        }
        let mean = prices.iter().mean();
        let std_dev = if n > 1 { prices.iter().std_dev() } else { 0.0 };
        let std_dev = if std_dev.is_finite() { std_dev } else { 0.0 };
        let coef_var = if mean == 0.0 { 0.0 } else { std_dev / mean };
        Self {
            n,
            mean,
            std_dev,
            coef_var,
        }
    }
}

/// Central price of the retained records under `basis`.
pub fn central_price(basis: PriceBasis, records: &[&HistoricalRecord], stats: &SampleStats) -> f64 {
    match basis {
        PriceBasis::Mean => stats.mean,
        PriceBasis::Median => {
            if records.is_empty() {
                return 0.0;
            }
            Data::new(records.iter().map(|r| r.unit_price).collect::<Vec<f64>>()).median()
        }
        PriceBasis::QuantityWeighted => {
            let total_quantity: f64 = records.iter().map(|r| r.quantity).sum();
            if total_quantity <= 0.0 {
                return stats.mean;
            }
            records.iter().map(|r| r.unit_price * r.quantity).sum::<f64>() / total_quantity
        }
    }
}
