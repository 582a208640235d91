use crate::analysis::threshold::{classify, evaluate};
use crate::error::AnalyticsError;
use crate::models::policy::{ImpactTable, ThresholdPolicy};
use crate::models::record::{Metric, Record};
use crate::models::summary::{MetricSummary, Recommendation, SummaryReport};

/// Flat mean of each metric over all records, each checked against `policy`.
pub fn build_summary(records: &[Record], policy: &ThresholdPolicy) -> Result<SummaryReport, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }

    let summarize = |metric: Metric| {
        let value = mean(records, metric);
        MetricSummary {
            value,
            meets_criteria: evaluate(value, policy.limit(metric)).meets_criteria,
        }
    };

    Ok(SummaryReport {
        emissions: summarize(Metric::Emissions),
        energy: summarize(Metric::Energy),
        waste: summarize(Metric::Waste),
    })
}

pub fn build_recommendations(summary: &SummaryReport, impact_table: &ImpactTable) -> Vec<Recommendation> {
    Metric::ALL
        .iter()
        .map(|metric| {
            let (title, description) = recommendation_text(*metric);
            let meets = summary.metric(*metric).meets_criteria;
            Recommendation {
                metric: *metric,
                title: title.to_string(),
                description: description.to_string(),
                impact: classify(meets, impact_table.rating_for(*metric)),
            }
        })
        .collect()
}

/// Number of metrics at or below their limit.
pub fn compliant_count(summary: &SummaryReport) -> usize {
    Metric::ALL
        .iter()
        .filter(|metric| summary.metric(**metric).meets_criteria)
        .count()
}

fn mean(records: &[Record], metric: Metric) -> f64 {
    let total: f64 = records.iter().map(|r| r.metric(metric)).sum();
    total / records.len() as f64
}

fn recommendation_text(metric: Metric) -> (&'static str, &'static str) {
    match metric {
        Metric::Emissions => (
            "Reduce Manufacturing Emissions",
            "Current emissions are 15% above industry standard. Consider upgrading equipment efficiency.",
        ),
        Metric::Energy => (
            "Optimize Energy Usage",
            "Implementing smart lighting systems could reduce energy consumption by 25%.",
        ),
        Metric::Waste => (
            "Waste Management",
            "Current recycling rate is 45%. Industry leaders achieve 75%. Review waste segregation processes.",
        ),
    }
}
