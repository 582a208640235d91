use crate::models::policy::ImpactRating;
use crate::models::record::Metric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub value: f64,
    pub meets_criteria: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub emissions: MetricSummary,
    pub energy: MetricSummary,
    pub waste: MetricSummary,
}

impl SummaryReport {
    pub fn metric(&self, metric: Metric) -> &MetricSummary {
        match metric {
            Metric::Emissions => &self.emissions,
            Metric::Energy => &self.energy,
            Metric::Waste => &self.waste,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub metric: Metric,
    pub title: String,
    pub description: String,
    pub impact: ImpactRating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub id: i64,
    pub timestamp: i64,
    pub record_count: usize,
    pub avg_emissions: f64,
    pub avg_energy: f64,
    pub avg_waste: f64,
    pub compliant_metrics: usize,
}
