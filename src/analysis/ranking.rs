use crate::error::AnalyticsError;
use crate::models::aggregate::{GroupAggregate, RankedEntry, RankedShare};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Rank groups descending by `projection` and keep the first `n`.
///
/// Ties keep key-ascending order: the map iterates by key and the sort is
/// stable. NaN projections sort after every other value.
pub fn top_n<K, F>(
    aggregates: &BTreeMap<K, GroupAggregate<K>>,
    projection: F,
    n: i64,
) -> Result<Vec<RankedEntry>, AnalyticsError>
where
    K: Ord + Display,
    F: Fn(&GroupAggregate<K>) -> f64,
{
    if n <= 0 {
        return Err(AnalyticsError::InvalidArgument(format!(
            "top_n requires n > 0, got {n}"
        )));
    }

    let mut ranked: Vec<RankedEntry> = aggregates
        .values()
        .map(|group| RankedEntry {
            label: group.key.to_string(),
            value: projection(group),
        })
        .collect();

    ranked.sort_by(|a, b| descending(a.value, b.value));
    ranked.truncate(usize::try_from(n).unwrap_or(usize::MAX));
    Ok(ranked)
}

/// Attach each entry's fraction of the ranked total. A non-positive total
/// yields zero shares.
pub fn with_shares(entries: &[RankedEntry]) -> Vec<RankedShare> {
    let total: f64 = entries.iter().map(|e| e.value).sum();

    entries
        .iter()
        .map(|entry| RankedShare {
            label: entry.label.clone(),
            value: entry.value,
            share: if total > 0.0 && total.is_finite() {
                entry.value / total
            } else {
                0.0
            },
        })
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // -0.0 and 0.0 compare equal; the stable sort keeps key order.
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
