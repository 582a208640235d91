use crate::models::record::{Metric, Record};
use serde::{Deserialize, Serialize};

/// Non-fatal finding: a record carries a negative or non-finite metric.
/// The value is still aggregated as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataIntegrityWarning {
    pub index: usize,
    pub year: i32,
    pub company: String,
    pub metric: Metric,
    pub value: f64,
}

impl DataIntegrityWarning {
    pub fn describe(&self) -> String {
        format!(
            "record #{} ({} {}) has suspicious {} value {}",
            self.index,
            self.company,
            self.year,
            self.metric.as_str(),
            self.value
        )
    }
}

pub fn scan_integrity(records: &[Record]) -> Vec<DataIntegrityWarning> {
    let mut warnings = Vec::new();

    for (index, record) in records.iter().enumerate() {
        for metric in Metric::ALL {
            let value = record.metric(metric);
            if !value.is_finite() || value < 0.0 {
                warnings.push(DataIntegrityWarning {
                    index,
                    year: record.year,
                    company: record.company.clone(),
                    metric,
                    value,
                });
            }
        }
    }

    warnings
}
