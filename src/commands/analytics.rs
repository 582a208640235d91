use crate::analysis::aggregate::{aggregate_by_company, aggregate_by_year};
use crate::analysis::chart::chart_series;
use crate::analysis::integrity::scan_integrity;
use crate::analysis::ranking::{top_n, with_shares};
use crate::analysis::risk::company_risk_alerts;
use crate::analysis::summary::{build_recommendations, build_summary};
use crate::analysis::trend::period_changes;
use crate::commands::datasource::{load_with_timeout, DataSource};
use crate::commands::settings::EffectiveAnalyticsSettings;
use crate::models::aggregate::{GroupAggregate, RankedShare};
use crate::models::dashboard::*;
use crate::models::record::Record;
use crate::models::summary::SummaryReport;
use crate::models::view::{AnalyticsView, ViewEvent};
use std::sync::{Arc, Mutex};

pub async fn run_analytics(
    workspace_path: String,
    source: Arc<dyn DataSource>,
    cache: Arc<Mutex<AnalyticsCache>>,
) -> Result<DashboardResult, String> {
    run_analytics_internal(&workspace_path, source, &cache, |progress| {
        log::debug!(
            "analytics {} ({}/{})",
            progress.stage,
            progress.current,
            progress.total
        );
    })
    .await
}

pub async fn run_analytics_internal<F>(
    workspace_path: &str,
    source: Arc<dyn DataSource>,
    cache: &Arc<Mutex<AnalyticsCache>>,
    mut emit_progress: F,
) -> Result<DashboardResult, String>
where
    F: FnMut(AnalyticsProgress),
{
    let start = std::time::Instant::now();
    let settings = crate::commands::settings::load_effective_analytics_settings(workspace_path)?;
    let source_name = source.name();

    emit_progress(progress("load", 1));
    let records = load_with_timeout(source, settings.data_timeout)
        .await
        .map_err(|e| e.to_string())?;
    log::info!("Loaded {} records from {source_name}", records.len());

    emit_progress(progress("integrity", 2));
    let warnings = scan_integrity(&records);
    for warning in &warnings {
        log::warn!("{}", warning.describe());
    }

    emit_progress(progress("aggregate", 3));
    let view = AnalyticsView::with_grouping(settings.default_grouping);
    let mut result = build_dashboard(&records, &settings, view).map_err(|e| e.to_string())?;
    result.source = source_name;
    result.warning_count = warnings.len();
    result.duration_ms = start.elapsed().as_millis() as u64;

    emit_progress(progress("done", 4));
    update_cache(cache, workspace_path.to_string(), result.clone());

    Ok(result)
}

/// Assemble the dashboard from a record snapshot.
pub fn build_dashboard(
    records: &[Record],
    settings: &EffectiveAnalyticsSettings,
    view: AnalyticsView,
) -> Result<DashboardResult, crate::error::AnalyticsError> {
    let summary = build_summary(records, &settings.policy)?;
    let recommendations = build_recommendations(&summary, &settings.impact_table);

    let yearly = aggregate_by_year(records);
    let companies = aggregate_by_company(records);
    let ranked = top_n(&companies, |g| g.sum_carbon, settings.top_companies as i64)?;

    let yearly_trend: Vec<GroupAggregate<i32>> = yearly.into_values().collect();
    let by_company: Vec<GroupAggregate<String>> = companies.into_values().collect();
    let chart = chart_series(&view, &yearly_trend, &by_company);
    let risk_alerts = company_risk_alerts(&by_company, &settings.policy, &settings.impact_table);
    let period_changes = period_changes(&yearly_trend);

    Ok(DashboardResult {
        source: String::new(),
        record_count: records.len(),
        warning_count: 0,
        policy: settings.policy,
        summary,
        recommendations,
        yearly_trend,
        by_company,
        top_companies: with_shares(&ranked),
        risk_alerts,
        period_changes,
        view,
        chart,
        duration_ms: 0,
    })
}

pub async fn get_summary(cache: Arc<Mutex<AnalyticsCache>>) -> Result<SummaryReport, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    cache_lock
        .result
        .as_ref()
        .map(|r| r.summary)
        .ok_or(NO_DATA.to_string())
}

pub async fn get_top_companies(cache: Arc<Mutex<AnalyticsCache>>) -> Result<Vec<RankedShare>, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    cache_lock
        .result
        .as_ref()
        .map(|r| r.top_companies.clone())
        .ok_or(NO_DATA.to_string())
}

pub async fn get_yearly_trend(
    cache: Arc<Mutex<AnalyticsCache>>,
) -> Result<Vec<GroupAggregate<i32>>, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    cache_lock
        .result
        .as_ref()
        .map(|r| r.yearly_trend.clone())
        .ok_or(NO_DATA.to_string())
}

/// Move the cached view through `event` and rebuild its chart series.
pub async fn apply_view_event(
    event: ViewEvent,
    cache: Arc<Mutex<AnalyticsCache>>,
) -> Result<DashboardResult, String> {
    let mut cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    let result = cache_lock.result.as_mut().ok_or(NO_DATA)?;

    result.view = result.view.apply(event);
    result.chart = chart_series(&result.view, &result.yearly_trend, &result.by_company);

    Ok(result.clone())
}

const NO_DATA: &str = "No analytics data available. Run analytics first.";

fn progress(stage: &str, current: usize) -> AnalyticsProgress {
    AnalyticsProgress {
        stage: stage.to_string(),
        current,
        total: 4,
    }
}

fn update_cache(cache: &Arc<Mutex<AnalyticsCache>>, workspace_path: String, result: DashboardResult) {
    if let Ok(mut lock) = cache.lock() {
        lock.workspace_path = Some(workspace_path);
        lock.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::settings::effective_from_value;
    use crate::models::policy::ImpactRating;
    use crate::models::record::Metric;
    use crate::models::view::{Grouping, MetricFilter};

    fn default_settings() -> EffectiveAnalyticsSettings {
        effective_from_value(&serde_json::json!({}))
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new(2020, "A", 100.0, 50.0, 10.0),
            Record::new(2020, "B", 200.0, 150.0, 20.0),
            Record::new(2021, "A", 3500.0, 3000.0, 2500.0),
        ]
    }

    #[test]
    fn dashboard_combines_summary_ranking_and_trend() {
        let dashboard = build_dashboard(&records(), &default_settings(), AnalyticsView::default())
            .expect("dashboard");

        assert_eq!(dashboard.record_count, 3);
        assert_eq!(dashboard.yearly_trend.len(), 2);
        assert_eq!(dashboard.yearly_trend[0].key, 2020);
        assert_eq!(dashboard.yearly_trend[0].count, 2);
        assert_eq!(dashboard.top_companies[0].label, "A");
        assert_eq!(dashboard.top_companies[0].value, 3600.0);
        assert!((dashboard.summary.emissions.value - 1266.6666666666667).abs() < 1e-9);
        assert_eq!(dashboard.recommendations[0].impact, ImpactRating::Low);
        assert_eq!(dashboard.chart.len(), 3);
    }

    #[test]
    fn dashboard_flags_breaching_companies_and_year_over_year_change() {
        let mut records = records();
        records.push(Record::new(2021, "C", 4500.0, 100.0, 100.0));
        let dashboard = build_dashboard(&records, &default_settings(), AnalyticsView::default())
            .expect("dashboard");

        assert_eq!(dashboard.risk_alerts.len(), 1);
        assert_eq!(dashboard.risk_alerts[0].company, "C");
        assert_eq!(dashboard.risk_alerts[0].severity, ImpactRating::High);
        assert_eq!(dashboard.risk_alerts[0].breach_pct, Some(50.0));

        assert_eq!(dashboard.period_changes.len(), 3);
        assert_eq!(dashboard.period_changes[0].year, 2021);
        assert_eq!(dashboard.period_changes[0].previous, 150.0);
        assert_eq!(dashboard.period_changes[0].current, 4000.0);
    }

    #[test]
    fn empty_records_cannot_build_a_dashboard() {
        let err = build_dashboard(&[], &default_settings(), AnalyticsView::default()).unwrap_err();
        assert!(matches!(err, crate::error::AnalyticsError::EmptyDataset));
    }

    #[tokio::test]
    async fn view_events_require_a_cached_result() {
        let cache = Arc::new(Mutex::new(AnalyticsCache::default()));
        let err = apply_view_event(ViewEvent::Reset, cache.clone()).await.unwrap_err();
        assert_eq!(err, NO_DATA);

        let dashboard = build_dashboard(&records(), &default_settings(), AnalyticsView::default())
            .expect("dashboard");
        update_cache(&cache, "/tmp/ws".to_string(), dashboard);

        let updated = apply_view_event(ViewEvent::SelectGrouping(Grouping::Company), cache.clone())
            .await
            .expect("grouping");
        assert_eq!(updated.chart[0].points.len(), 2);

        let updated = apply_view_event(ViewEvent::SelectFilter(MetricFilter::Energy), cache.clone())
            .await
            .expect("filter");
        assert_eq!(updated.chart.len(), 1);
        assert_eq!(updated.chart[0].metric, Metric::Energy);
        assert_eq!(updated.view.grouping, Grouping::Company);
    }
}
