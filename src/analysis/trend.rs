use crate::models::aggregate::GroupAggregate;
use crate::models::record::Metric;
use crate::models::risk::{PeriodChange, Trend};

/// Compare the last two years of a key-ordered yearly trend, per metric.
/// Fewer than two years yields no changes.
pub fn period_changes(yearly_trend: &[GroupAggregate<i32>]) -> Vec<PeriodChange> {
    let [.., previous, current] = yearly_trend else {
        return Vec::new();
    };

    Metric::ALL
        .into_iter()
        .map(|metric| {
            let now = current.avg(metric);
            let before = previous.avg(metric);
            PeriodChange {
                metric,
                year: current.key,
                previous_year: previous.key,
                current: now,
                previous: before,
                change_pct: (before != 0.0 && before.is_finite() && now.is_finite())
                    .then(|| (now - before) / before.abs() * 100.0),
                trend: if now > before {
                    Trend::Increase
                } else if now < before {
                    Trend::Decrease
                } else {
                    Trend::Flat
                },
            }
        })
        .collect()
}
