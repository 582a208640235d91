use crate::models::aggregate::GroupAggregate;
use crate::models::dashboard::{ChartPoint, ChartSeries};
use crate::models::view::{AnalyticsView, Grouping};
use std::fmt::Display;

/// Series for the current view: one per visible metric, one point per group
/// holding the group total.
pub fn chart_series(
    view: &AnalyticsView,
    yearly: &[GroupAggregate<i32>],
    by_company: &[GroupAggregate<String>],
) -> Vec<ChartSeries> {
    match view.grouping {
        Grouping::Year => series_for(view, yearly),
        Grouping::Company => series_for(view, by_company),
    }
}

fn series_for<K: Display>(view: &AnalyticsView, groups: &[GroupAggregate<K>]) -> Vec<ChartSeries> {
    view.filter
        .metrics()
        .into_iter()
        .map(|metric| ChartSeries {
            metric,
            points: groups
                .iter()
                .map(|group| ChartPoint {
                    label: group.key.to_string(),
                    value: group.sum(metric),
                })
                .collect(),
        })
        .collect()
}
