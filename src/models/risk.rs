use crate::models::policy::ImpactRating;
use crate::models::record::Metric;
use serde::{Deserialize, Serialize};

/// A company whose average for `metric` is above the policy limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub company: String,
    pub metric: Metric,
    pub value: f64,
    pub limit: f64,
    /// Percent above the limit; `None` when the limit is not positive.
    pub breach_pct: Option<f64>,
    pub severity: ImpactRating,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increase,
    Decrease,
    Flat,
}

/// Latest-period average of one metric against the period before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodChange {
    pub metric: Metric,
    pub year: i32,
    pub previous_year: i32,
    pub current: f64,
    pub previous: f64,
    pub change_pct: Option<f64>,
    pub trend: Trend,
}
