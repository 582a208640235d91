use crate::models::aggregate::{GroupAggregate, RankedShare};
use crate::models::policy::ThresholdPolicy;
use crate::models::record::Metric;
use crate::models::risk::{PeriodChange, RiskAlert};
use crate::models::summary::{Recommendation, SummaryReport};
use crate::models::view::AnalyticsView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One named numeric series handed to the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub metric: Metric,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResult {
    pub source: String,
    pub record_count: usize,
    pub warning_count: usize,
    pub policy: ThresholdPolicy,
    pub summary: SummaryReport,
    pub recommendations: Vec<Recommendation>,
    pub yearly_trend: Vec<GroupAggregate<i32>>,
    pub by_company: Vec<GroupAggregate<String>>,
    pub top_companies: Vec<RankedShare>,
    pub risk_alerts: Vec<RiskAlert>,
    pub period_changes: Vec<PeriodChange>,
    pub view: AnalyticsView,
    pub chart: Vec<ChartSeries>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsProgress {
    pub stage: String,
    pub current: usize,
    pub total: usize,
}

/// Last computed dashboard, replaced wholesale on every run.
#[derive(Debug, Default)]
pub struct AnalyticsCache {
    pub workspace_path: Option<String>,
    pub result: Option<DashboardResult>,
}
