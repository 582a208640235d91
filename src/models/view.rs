use crate::models::record::Metric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    Year,
    Company,
}

impl Grouping {
    pub fn parse(raw: &str) -> Option<Grouping> {
        match raw {
            "year" => Some(Grouping::Year),
            "company" => Some(Grouping::Company),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFilter {
    #[default]
    All,
    Emissions,
    Energy,
    Waste,
}

impl MetricFilter {
    /// Metrics whose series are shown under this filter, in display order.
    pub fn metrics(&self) -> Vec<Metric> {
        match self {
            MetricFilter::All => Metric::ALL.to_vec(),
            MetricFilter::Emissions => vec![Metric::Emissions],
            MetricFilter::Energy => vec![Metric::Energy],
            MetricFilter::Waste => vec![Metric::Waste],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ViewEvent {
    SelectGrouping(Grouping),
    SelectFilter(MetricFilter),
    Reset,
}

/// Selection state of the analytics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub grouping: Grouping,
    pub filter: MetricFilter,
}

impl AnalyticsView {
    pub fn with_grouping(grouping: Grouping) -> Self {
        Self {
            grouping,
            filter: MetricFilter::All,
        }
    }

    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::SelectGrouping(grouping) => Self { grouping, ..self },
            ViewEvent::SelectFilter(filter) => Self { filter, ..self },
            ViewEvent::Reset => Self::default(),
        }
    }
}
