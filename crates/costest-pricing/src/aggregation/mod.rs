//! Historical Aggregator: window, scope, and quantity-band filtering, sigma
//! trimming, and summary statistics over historical bid records.

pub mod aggregator;
pub mod filters;
pub mod pool;
pub mod stats;
pub mod trim;

pub use aggregator::{AggregateStat, AggregationRequest, Aggregator, WindowAggregate, WindowSearch};
pub use filters::BandStatus;
pub use pool::HistoricalPool;
pub use stats::SampleStats;
