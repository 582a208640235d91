use crate::models::record::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CARBON_LIMIT: f64 = 3000.0;
pub const DEFAULT_ENERGY_LIMIT: f64 = 2500.0;
pub const DEFAULT_WASTE_LIMIT: f64 = 2000.0;

/// Compliance limits per metric. A metric complies when its average is at or
/// below the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub carbon_limit: f64,
    pub energy_limit: f64,
    pub waste_limit: f64,
}

impl ThresholdPolicy {
    pub fn limit(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Emissions => self.carbon_limit,
            Metric::Energy => self.energy_limit,
            Metric::Waste => self.waste_limit,
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            carbon_limit: DEFAULT_CARBON_LIMIT,
            energy_limit: DEFAULT_ENERGY_LIMIT,
            waste_limit: DEFAULT_WASTE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactRating {
    Low,
    Medium,
    High,
}

impl ImpactRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactRating::Low => "low",
            ImpactRating::Medium => "medium",
            ImpactRating::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<ImpactRating> {
        match raw {
            "low" => Some(ImpactRating::Low),
            "medium" => Some(ImpactRating::Medium),
            "high" => Some(ImpactRating::High),
            _ => None,
        }
    }
}

/// Rating applied to a metric when it fails its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactTable(BTreeMap<Metric, ImpactRating>);

impl ImpactTable {
    pub fn new(entries: BTreeMap<Metric, ImpactRating>) -> Self {
        Self(entries)
    }

    /// Metrics missing from the table fall back to the default rating.
    pub fn rating_for(&self, metric: Metric) -> ImpactRating {
        self.0
            .get(&metric)
            .copied()
            .unwrap_or_else(|| default_impact_rating(metric))
    }

    pub fn set(&mut self, metric: Metric, rating: ImpactRating) {
        self.0.insert(metric, rating);
    }
}

impl Default for ImpactTable {
    fn default() -> Self {
        Self(
            Metric::ALL
                .iter()
                .map(|metric| (*metric, default_impact_rating(*metric)))
                .collect(),
        )
    }
}

fn default_impact_rating(metric: Metric) -> ImpactRating {
    match metric {
        Metric::Emissions => ImpactRating::High,
        Metric::Energy | Metric::Waste => ImpactRating::Medium,
    }
}
