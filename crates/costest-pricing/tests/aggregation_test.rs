use std::collections::BTreeSet;

use chrono::NaiveDate;
use costest_core::config::{EstimatorConfig, PriceBasis};
use costest_core::models::{District, HistoricalRecord, PayItemCode, ProjectContext, Window};
use costest_pricing::aggregation::{AggregationRequest, BandStatus, WindowAggregate};
use costest_pricing::{Aggregator, HistoricalPool};

fn code() -> PayItemCode {
    PayItemCode::parse("401-10258").unwrap()
}

fn record(contract: &str, date: (i32, u32, u32), price: f64, quantity: f64) -> HistoricalRecord {
    HistoricalRecord::new(
        code(),
        contract,
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        District::Crawfordsville,
        price,
        quantity,
    )
    .unwrap()
}

fn project() -> ProjectContext {
    ProjectContext::new(
        Some(District::Crawfordsville),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    )
}

fn aggregate(
    config: &EstimatorConfig,
    records: Vec<HistoricalRecord>,
    window: Window,
    target_quantity: Option<f64>,
) -> WindowAggregate {
    let (pool, _) = HistoricalPool::from_records(records);
    let codes = BTreeSet::from([code()]);
    let project = project();
    let request = AggregationRequest {
        codes: &codes,
        project: &project,
        target_quantity,
    };
    Aggregator::new(config).aggregate(&pool, &request, window)
}

#[test]
fn outlier_scenario_yields_four_points() {
    let config = EstimatorConfig::default();
    let records = [100.0, 102.0, 98.0, 300.0, 101.0]
        .iter()
        .enumerate()
        .map(|(i, p)| record(&format!("C{i}"), (2025, 2, 1), *p, 10.0))
        .collect();
    let WindowAggregate::Sufficient(stat) = aggregate(&config, records, Window::DIST_12M, None)
    else {
        panic!("expected sufficient data");
    };
    assert_eq!(stat.n, 4);
    assert_eq!(stat.trimmed, 1);
    assert!((stat.mean - 100.25).abs() < 1e-9);
    let deviations: f64 = [100.0f64, 102.0, 98.0, 101.0]
        .iter()
        .map(|p| (p - 100.25).powi(2))
        .sum();
    assert!((stat.std_dev - (deviations / 3.0).sqrt()).abs() < 1e-9);
    assert!((stat.coef_var - stat.std_dev / stat.mean).abs() < 1e-12);
}

#[test]
fn below_min_samples_is_insufficient() {
    let config = EstimatorConfig::default();
    let records = vec![
        record("A", (2025, 2, 1), 10.0, 1.0),
        record("B", (2025, 2, 2), 11.0, 1.0),
    ];
    assert_eq!(
        aggregate(&config, records, Window::DIST_12M, None),
        WindowAggregate::Insufficient {
            window: Window::DIST_12M,
            n: 2
        }
    );
}

#[test]
fn longer_horizon_picks_up_older_bids() {
    let config = EstimatorConfig::default();
    let records = vec![
        record("A", (2025, 2, 1), 10.0, 1.0),
        record("B", (2024, 2, 1), 11.0, 1.0),
        record("C", (2023, 8, 1), 12.0, 1.0),
    ];
    assert!(matches!(
        aggregate(&config, records.clone(), Window::DIST_12M, None),
        WindowAggregate::Insufficient { n: 1, .. }
    ));
    assert!(matches!(
        aggregate(&config, records, Window::DIST_24M, None),
        WindowAggregate::Sufficient(_)
    ));
}

#[test]
fn empty_quantity_band_relaxed_when_enabled() {
    let records: Vec<HistoricalRecord> = (0..3)
        .map(|i| record(&format!("C{i}"), (2025, 1, 10), 40.0 + i as f64, 5000.0))
        .collect();

    let strict = EstimatorConfig::default();
    assert!(matches!(
        aggregate(&strict, records.clone(), Window::DIST_12M, Some(10.0)),
        WindowAggregate::Insufficient { n: 0, .. }
    ));

    let relaxed = EstimatorConfig {
        relax_empty_quantity_band: true,
        ..EstimatorConfig::default()
    };
    let WindowAggregate::Sufficient(stat) =
        aggregate(&relaxed, records, Window::DIST_12M, Some(10.0))
    else {
        panic!("expected relaxed band to keep the window");
    };
    assert_eq!(stat.band, BandStatus::Relaxed);
    assert_eq!(stat.n, 3);
}

#[test]
fn median_basis_reported_as_price() {
    let config = EstimatorConfig {
        price_basis: PriceBasis::Median,
        sigma_threshold: 0.0,
        ..EstimatorConfig::default()
    };
    let records = vec![
        record("A", (2025, 2, 1), 10.0, 1.0),
        record("B", (2025, 2, 2), 12.0, 1.0),
        record("C", (2025, 2, 3), 50.0, 1.0),
    ];
    let WindowAggregate::Sufficient(stat) = aggregate(&config, records, Window::DIST_12M, None)
    else {
        panic!("expected sufficient data");
    };
    assert_eq!(stat.price, 12.0);
    assert!((stat.mean - 24.0).abs() < 1e-12);
}

#[test]
fn contributions_count_retained_records() {
    let config = EstimatorConfig::default();
    let records = vec![
        record("A", (2025, 2, 1), 10.0, 1.0),
        record("B", (2025, 2, 2), 10.5, 1.0),
        record("C", (2025, 2, 3), 11.0, 1.0),
    ];
    let WindowAggregate::Sufficient(stat) = aggregate(&config, records, Window::STATE_12M, None)
    else {
        panic!("expected sufficient data");
    };
    assert_eq!(stat.contributions.get(&code()), Some(&3));
}
