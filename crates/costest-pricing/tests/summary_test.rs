use chrono::NaiveDate;
use costest_core::config::EstimatorConfig;
use costest_core::models::{District, PayItemCode, SummaryEntry, SummaryPeriod};
use costest_pricing::summary::{Adjustment, Shortfall};
use costest_pricing::{SummaryAdjuster, SummaryOutcome, SummaryTable};

fn entry(avg: f64, low: f64, high: f64, contracts: u32, period: SummaryPeriod) -> SummaryEntry {
    SummaryEntry {
        item_code: PayItemCode::parse("401-10258").unwrap(),
        weighted_avg: avg,
        low,
        high,
        supporting_contracts: contracts,
        period,
        calendar_year: None,
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn adjusted(config: &EstimatorConfig, e: &SummaryEntry, district: Option<District>) -> f64 {
    match SummaryAdjuster::new(config).adjust(e, district, as_of()) {
        Adjustment::Adjusted(price) => price.price,
        Adjustment::Insufficient(s) => panic!("unexpected shortfall: {s}"),
    }
}

#[test]
fn scenario_price_stays_in_range() {
    let config = EstimatorConfig::default();
    let e = entry(50.0, 40.0, 55.0, 10, SummaryPeriod::State12M);
    let price = adjusted(&config, &e, Some(District::Greenfield));
    assert!((40.0..=55.0).contains(&price));
}

#[test]
fn recency_step_applies_to_older_periods() {
    let mut config = EstimatorConfig::default();
    config.recency_steps.insert("STATE-24M".into(), 1.05);
    let e = entry(100.0, 50.0, 200.0, 10, SummaryPeriod::State24M);
    assert!((adjusted(&config, &e, None) - 105.0).abs() < 1e-9);

    let recent = entry(100.0, 50.0, 200.0, 10, SummaryPeriod::State12M);
    assert_eq!(adjusted(&config, &recent, None), 100.0);
}

#[test]
fn district_multiplier_only_for_regional_projects() {
    let mut config = EstimatorConfig::default();
    config.district_multipliers.insert("LAPORTE".into(), 0.9);
    let e = entry(100.0, 50.0, 200.0, 10, SummaryPeriod::State12M);
    assert!((adjusted(&config, &e, Some(District::Laporte)) - 90.0).abs() < 1e-9);
    assert_eq!(adjusted(&config, &e, Some(District::Seymour)), 100.0);
    assert_eq!(adjusted(&config, &e, Some(District::Statewide)), 100.0);
    assert_eq!(adjusted(&config, &e, None), 100.0);
}

#[test]
fn clamp_is_terminal_below_low() {
    let mut config = EstimatorConfig::default();
    config.district_multipliers.insert("VINCENNES".into(), 0.8);
    let e = entry(50.0, 45.0, 55.0, 10, SummaryPeriod::State12M);
    assert_eq!(adjusted(&config, &e, Some(District::Vincennes)), 45.0);
}

#[test]
fn item_outcome_lists_every_shortfall() {
    let config = EstimatorConfig::default();
    let table = SummaryTable::from_entries(vec![
        entry(50.0, 40.0, 55.0, 1, SummaryPeriod::State12M),
        entry(50.0, 60.0, 40.0, 9, SummaryPeriod::State36M),
    ]);
    let code = PayItemCode::parse("401-10258").unwrap();
    let SummaryOutcome::Insufficient(shortfalls) =
        SummaryAdjuster::new(&config).adjust_item(&table, &code, None, as_of())
    else {
        panic!("expected shortfalls");
    };
    assert_eq!(shortfalls.len(), 2);
    assert!(matches!(shortfalls[0], Shortfall::TooFewContracts { contracts: 1, .. }));
    assert!(matches!(shortfalls[1], Shortfall::ReversedRange { .. }));
}
