use std::collections::BTreeSet;

use chrono::NaiveDate;
use costest_core::config::EstimatorConfig;
use costest_core::models::{
    District, HistoricalRecord, MappingOrigin, PayItemCode, ProjectContext, RollupMapping,
    SourceTier, SummaryEntry, SummaryPeriod,
};
use costest_pricing::aggregation::trim;
use costest_pricing::summary::Adjustment;
use costest_pricing::{
    confidence, resolve, round_unit_price, EstimationRun, Estimator, RunInputs, SummaryAdjuster,
};
use proptest::prelude::*;

fn code_from(n: u32) -> PayItemCode {
    PayItemCode::parse(&format!("401-{:05}", 10_000 + n)).unwrap()
}

proptest! {
    #[test]
    fn confidence_in_unit_interval(n in 0usize..1_000_000, cv in proptest::option::of(0.0f64..10.0)) {
        let c = confidence(n, cv);
        prop_assert!((0.0..1.0).contains(&c), "confidence {} out of range", c);
        if n == 0 {
            prop_assert_eq!(c, 0.0);
        } else {
            prop_assert!(c > 0.0);
        }
    }

    #[test]
    fn retrimming_removes_nothing(
        values in proptest::collection::vec(0.01f64..10_000.0, 0..40),
        threshold in 0.5f64..4.0,
        min_points in 0usize..6,
    ) {
        let once = trim::trim(&values, threshold, min_points);
        let twice = trim::trim(&once, threshold, min_points);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn retained_prices_form_a_contiguous_run(values in proptest::collection::vec(0.01f64..10_000.0, 3..40)) {
        let kept = trim::trim(&values, 2.0, 3);
        let lowest = kept.iter().cloned().fold(f64::INFINITY, f64::min);
        let highest = kept.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let inside = values.iter().filter(|v| (lowest..=highest).contains(*v)).count();
        prop_assert_eq!(inside, kept.len());
    }

    #[test]
    fn trimming_never_grows_or_empties(values in proptest::collection::vec(0.01f64..10_000.0, 0..40)) {
        let kept = trim::trim(&values, 2.0, 3);
        prop_assert!(kept.len() <= values.len());
        prop_assert_eq!(kept.is_empty(), values.is_empty());
    }

    #[test]
    fn adjusted_summary_price_within_range(
        avg in 0.01f64..10_000.0,
        low in 0.0f64..5_000.0,
        width in 0.0f64..5_000.0,
        contracts in 3u32..500,
        step in 0.5f64..1.5,
        multiplier in 0.5f64..1.5,
        cap in 0.0f64..0.99,
    ) {
        let mut config = EstimatorConfig::default();
        config.recency_steps.insert("STATE-36M".into(), step);
        config.district_multipliers.insert("GREENFIELD".into(), multiplier);
        config.max_combined_adjustment = cap;
        let entry = SummaryEntry {
            item_code: code_from(1),
            weighted_avg: avg,
            low,
            high: low + width,
            supporting_contracts: contracts,
            period: SummaryPeriod::State36M,
            calendar_year: None,
        };
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        match SummaryAdjuster::new(&config).adjust(&entry, Some(District::Greenfield), as_of) {
            Adjustment::Adjusted(adj) => {
                prop_assert!(adj.price >= entry.low && adj.price <= entry.high);
                prop_assert_eq!(adj.data_points_used, contracts as usize);
            }
            Adjustment::Insufficient(s) => prop_assert!(false, "unexpected shortfall {}", s),
        }
    }

    #[test]
    fn static_mapping_never_unioned_with_overlay(
        static_set in proptest::collection::btree_set(1u32..50, 1..6),
        overlay_set in proptest::collection::btree_set(50u32..100, 1..6),
    ) {
        let replacement = code_from(999);
        let static_codes: BTreeSet<PayItemCode> = static_set.iter().map(|n| code_from(*n)).collect();
        let overlay_codes: BTreeSet<PayItemCode> = overlay_set.iter().map(|n| code_from(*n)).collect();
        let statics = [RollupMapping::new(
            "S",
            None,
            replacement.clone(),
            static_codes.clone(),
            MappingOrigin::Static,
        )];
        let overlay = [RollupMapping::new(
            "O",
            None,
            replacement.clone(),
            overlay_codes,
            MappingOrigin::Overlay,
        )];
        let table = resolve(&statics, &overlay).unwrap();
        let entry = table.get(&replacement).unwrap();
        prop_assert_eq!(&entry.obsolete_codes, &static_codes);
        prop_assert_eq!(entry.origin, MappingOrigin::Static);
    }

    #[test]
    fn rounding_stays_near_price(price in 1.0f64..1_000_000.0) {
        let rounded = round_unit_price(price);
        prop_assert!((rounded - price).abs() <= price * 0.05 + 0.005, "{} -> {}", price, rounded);
    }

    #[test]
    fn estimates_are_bounded_and_repeatable(prices in proptest::collection::vec(1u32..2_000, 3..25)) {
        let item = code_from(258);
        let records: Vec<HistoricalRecord> = prices
            .iter()
            .enumerate()
            .map(|(i, p)| HistoricalRecord {
                item_code: item.clone(),
                contract_id: format!("C{i}"),
                bid_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
                district: District::FortWayne,
                unit_price: *p as f64,
                quantity: 1.0,
            })
            .collect();
        let estimator = Estimator::new(EstimatorConfig::default()).unwrap();
        let inputs = RunInputs { records, ..RunInputs::default() };
        let run = EstimationRun::prepare(&estimator, inputs).unwrap();
        let project = ProjectContext::new(
            Some(District::FortWayne),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        let requested = [item.to_string()];

        let first = run.estimate_all(&project, &requested);
        let second = run.estimate_all(&project, &requested);
        prop_assert_eq!(&first.results, &second.results);

        let result = &first.results[0];
        prop_assert_eq!(result.source_tier(), SourceTier::CategoryMix);
        prop_assert!(result.data_points_used() <= prices.len());
        prop_assert!((0.0..1.0).contains(&result.confidence()));
    }
}
