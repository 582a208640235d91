use crate::models::aggregate::GroupAggregate;
use crate::models::record::Record;
use std::collections::BTreeMap;

/// Group records by `key_fn`, summing each metric per group.
/// The map is ordered by key; empty input yields an empty map.
pub fn aggregate_by_key<K, F>(records: &[Record], key_fn: F) -> BTreeMap<K, GroupAggregate<K>>
where
    K: Ord + Clone,
    F: Fn(&Record) -> K,
{
    let mut groups: BTreeMap<K, GroupAggregate<K>> = BTreeMap::new();

    for record in records {
        let key = key_fn(record);
        match groups.get_mut(&key) {
            Some(group) => group.add(record),
            None => {
                groups.insert(key.clone(), GroupAggregate::from_first(key, record));
            }
        }
    }

    groups
}

pub fn aggregate_by_year(records: &[Record]) -> BTreeMap<i32, GroupAggregate<i32>> {
    aggregate_by_key(records, |r| r.year)
}

pub fn aggregate_by_company(records: &[Record]) -> BTreeMap<String, GroupAggregate<String>> {
    aggregate_by_key(records, |r| r.company.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_records() -> Vec<Record> {
        vec![
            Record::new(2020, "A", 100.0, 50.0, 10.0),
            Record::new(2020, "B", 200.0, 150.0, 20.0),
        ]
    }

    fn mixed_records() -> Vec<Record> {
        vec![
            Record::new(2020, "A", 10.5, 1.0, 2.0),
            Record::new(2021, "B", 3.25, 4.0, 0.5),
            Record::new(2020, "A", 7.0, 2.0, 1.0),
            Record::new(2022, "C", 0.0, 9.0, 3.0),
            Record::new(2021, "A", 12.0, 0.5, 7.5),
        ]
    }

    #[test]
    fn groups_two_records_of_one_year() {
        let groups = aggregate_by_year(&scenario_records());
        assert_eq!(groups.len(), 1);

        let group = &groups[&2020];
        assert_eq!(group.key, 2020);
        assert_eq!(group.sum_carbon, 300.0);
        assert_eq!(group.sum_energy, 200.0);
        assert_eq!(group.sum_waste, 30.0);
        assert_eq!(group.count, 2);
        assert_eq!(group.avg_carbon(), 150.0);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let groups = aggregate_by_key(&[], |r: &Record| r.year);
        assert!(groups.is_empty());
    }

    #[test]
    fn counts_cover_every_record() {
        let records = mixed_records();
        let by_year = aggregate_by_year(&records);
        let by_company = aggregate_by_company(&records);

        assert_eq!(by_year.values().map(|g| g.count).sum::<usize>(), records.len());
        assert_eq!(by_company.values().map(|g| g.count).sum::<usize>(), records.len());
        assert!(by_year.values().all(|g| g.count >= 1));
    }

    #[test]
    fn sums_are_conserved_across_groups() {
        let records = mixed_records();
        let expected_carbon: f64 = records.iter().map(|r| r.carbon_footprint).sum();
        let expected_waste: f64 = records.iter().map(|r| r.waste).sum();

        let by_year = aggregate_by_year(&records);
        let year_carbon: f64 = by_year.values().map(|g| g.sum_carbon).sum();
        let year_waste: f64 = by_year.values().map(|g| g.sum_waste).sum();
        assert!((year_carbon - expected_carbon).abs() < 1e-9);
        assert!((year_waste - expected_waste).abs() < 1e-9);

        let by_company = aggregate_by_company(&records);
        let company_carbon: f64 = by_company.values().map(|g| g.sum_carbon).sum();
        assert!((company_carbon - expected_carbon).abs() < 1e-9);
    }

    #[test]
    fn duplicate_year_company_pairs_both_contribute() {
        let records = vec![
            Record::new(2020, "A", 1.0, 1.0, 1.0),
            Record::new(2020, "A", 2.0, 2.0, 2.0),
        ];
        let groups = aggregate_by_company(&records);
        assert_eq!(groups["A"].count, 2);
        assert_eq!(groups["A"].sum_carbon, 3.0);
    }

    #[test]
    fn invalid_values_propagate_into_sums() {
        let records = vec![
            Record::new(2020, "A", f64::NAN, -5.0, 1.0),
            Record::new(2020, "B", 1.0, 2.0, 1.0),
        ];
        let groups = aggregate_by_year(&records);
        assert!(groups[&2020].sum_carbon.is_nan());
        assert_eq!(groups[&2020].sum_energy, -3.0);
    }
}
