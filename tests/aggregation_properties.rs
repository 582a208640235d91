use ecodash_lib::analysis::aggregate::{aggregate_by_company, aggregate_by_year};
use ecodash_lib::analysis::ranking::top_n;
use ecodash_lib::analysis::threshold::evaluate;
use ecodash_lib::models::record::Record;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        2015i32..2030,
        "[A-F]",
        0.0f64..1.0e6,
        0.0f64..1.0e6,
        0.0f64..1.0e6,
    )
        .prop_map(|(year, company, carbon, energy, waste)| {
            Record::new(year, &company, carbon, energy, waste)
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn grouping_conserves_record_count(records in prop::collection::vec(record_strategy(), 0..64)) {
        let by_year = aggregate_by_year(&records);
        let by_company = aggregate_by_company(&records);

        prop_assert_eq!(by_year.values().map(|g| g.count).sum::<usize>(), records.len());
        prop_assert_eq!(by_company.values().map(|g| g.count).sum::<usize>(), records.len());
        prop_assert!(by_year.values().all(|g| g.count > 0));
    }

    #[test]
    fn grouping_conserves_metric_totals(records in prop::collection::vec(record_strategy(), 1..64)) {
        let groups = aggregate_by_company(&records);

        let carbon: f64 = records.iter().map(|r| r.carbon_footprint).sum();
        let energy: f64 = records.iter().map(|r| r.energy).sum();
        let waste: f64 = records.iter().map(|r| r.waste).sum();

        prop_assert!(close(groups.values().map(|g| g.sum_carbon).sum(), carbon));
        prop_assert!(close(groups.values().map(|g| g.sum_energy).sum(), energy));
        prop_assert!(close(groups.values().map(|g| g.sum_waste).sum(), waste));
    }

    #[test]
    fn top_n_is_bounded_and_non_increasing(
        records in prop::collection::vec(record_strategy(), 0..64),
        n in 1i64..10,
    ) {
        let groups = aggregate_by_company(&records);
        let top = top_n(&groups, |g| g.sum_carbon, n).expect("rank");

        prop_assert_eq!(top.len(), (n as usize).min(groups.len()));
        prop_assert!(top.windows(2).all(|w| w[0].value >= w[1].value));
        for entry in &top {
            prop_assert_eq!(entry.value, groups[&entry.label].sum_carbon);
        }
    }

    #[test]
    fn limit_boundary_complies_and_any_breach_fails(
        limit in 0.0f64..1.0e6,
        epsilon in 1.0e-3f64..1.0e3,
    ) {
        prop_assert!(evaluate(limit, limit).meets_criteria);
        prop_assert!(!evaluate(limit + epsilon, limit).meets_criteria);
        prop_assert!(evaluate(limit - epsilon, limit).meets_criteria);
    }
}
