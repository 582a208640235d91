use serde::{Deserialize, Serialize};

/// One raw environmental observation for a company in a reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub year: i32,
    pub company: String,
    pub carbon_footprint: f64,
    pub energy: f64,
    pub waste: f64,
}

impl Record {
    pub fn new(year: i32, company: &str, carbon_footprint: f64, energy: f64, waste: f64) -> Self {
        Self {
            year,
            company: company.to_string(),
            carbon_footprint,
            energy,
            waste,
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Emissions => self.carbon_footprint,
            Metric::Energy => self.energy,
            Metric::Waste => self.waste,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Emissions,
    Energy,
    Waste,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Emissions, Metric::Energy, Metric::Waste];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Emissions => "emissions",
            Metric::Energy => "energy",
            Metric::Waste => "waste",
        }
    }

    pub fn parse(raw: &str) -> Option<Metric> {
        match raw {
            "emissions" => Some(Metric::Emissions),
            "energy" => Some(Metric::Energy),
            "waste" => Some(Metric::Waste),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_and_coerces_integers() {
        let raw = r#"{"year":2021,"company":"A","carbonFootprint":120,"energy":40.5,"waste":3}"#;
        let record: Record = serde_json::from_str(raw).expect("parse record");

        assert_eq!(record, Record::new(2021, "A", 120.0, 40.5, 3.0));
        assert_eq!(record.metric(Metric::Emissions), 120.0);
        assert_eq!(record.metric(Metric::Waste), 3.0);
    }

    #[test]
    fn metric_names_parse_back() {
        for metric in Metric::ALL {
            assert_eq!(Metric::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(Metric::parse("water"), None);
    }
}
