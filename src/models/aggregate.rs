use crate::models::record::{Metric, Record};
use serde::{Deserialize, Serialize};

/// Summed metrics for one grouping key. `count` is the number of records
/// folded in and is never zero; averages are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate<K> {
    pub key: K,
    pub sum_carbon: f64,
    pub sum_energy: f64,
    pub sum_waste: f64,
    pub count: usize,
}

impl<K> GroupAggregate<K> {
    pub(crate) fn from_first(key: K, record: &Record) -> Self {
        Self {
            key,
            sum_carbon: record.carbon_footprint,
            sum_energy: record.energy,
            sum_waste: record.waste,
            count: 1,
        }
    }

    pub(crate) fn add(&mut self, record: &Record) {
        self.sum_carbon += record.carbon_footprint;
        self.sum_energy += record.energy;
        self.sum_waste += record.waste;
        self.count += 1;
    }

    pub fn sum(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Emissions => self.sum_carbon,
            Metric::Energy => self.sum_energy,
            Metric::Waste => self.sum_waste,
        }
    }

    pub fn avg(&self, metric: Metric) -> f64 {
        self.sum(metric) / self.count as f64
    }

    pub fn avg_carbon(&self) -> f64 {
        self.avg(Metric::Emissions)
    }

    pub fn avg_energy(&self) -> f64 {
        self.avg(Metric::Energy)
    }

    pub fn avg_waste(&self) -> f64 {
        self.avg(Metric::Waste)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// A ranked entry with its fraction of the ranked total (pie-chart feed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedShare {
    pub label: String,
    pub value: f64,
    pub share: f64,
}
