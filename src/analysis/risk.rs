use crate::analysis::threshold::{classify, evaluate};
use crate::models::aggregate::GroupAggregate;
use crate::models::policy::{ImpactTable, ThresholdPolicy};
use crate::models::record::Metric;
use crate::models::risk::RiskAlert;
use std::cmp::Ordering;

/// Check every company's per-metric average against `policy`.
///
/// Alerts are ordered by severity (high first), then by breach size, then by
/// company. Non-finite averages are left to the integrity scan.
pub fn company_risk_alerts(
    companies: &[GroupAggregate<String>],
    policy: &ThresholdPolicy,
    impact_table: &ImpactTable,
) -> Vec<RiskAlert> {
    let mut alerts: Vec<RiskAlert> = companies
        .iter()
        .flat_map(|group| {
            Metric::ALL.into_iter().filter_map(move |metric| {
                let value = group.avg(metric);
                let limit = policy.limit(metric);
                let evaluation = evaluate(value, limit);
                if evaluation.meets_criteria || !value.is_finite() {
                    return None;
                }

                let breach_pct = (limit > 0.0).then(|| (value - limit) / limit * 100.0);
                Some(RiskAlert {
                    company: group.key.clone(),
                    metric,
                    value,
                    limit,
                    breach_pct,
                    severity: classify(evaluation.meets_criteria, impact_table.rating_for(metric)),
                    message: alert_message(&group.key, metric, breach_pct),
                })
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| {
                let a_pct = a.breach_pct.unwrap_or(f64::INFINITY);
                let b_pct = b.breach_pct.unwrap_or(f64::INFINITY);
                b_pct.partial_cmp(&a_pct).unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.company.cmp(&b.company))
    });
    alerts
}

fn alert_message(company: &str, metric: Metric, breach_pct: Option<f64>) -> String {
    let subject = match metric {
        Metric::Emissions => "carbon emission",
        Metric::Energy => "energy usage",
        Metric::Waste => "waste generation",
    };
    match breach_pct {
        Some(pct) => format!("{company} has exceeded {subject} limits by {pct:.0}%."),
        None => format!("{company} has exceeded {subject} limits."),
    }
}
