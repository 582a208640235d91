use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub report_name: String,
    pub report_type: String, // "environmental" | "compliance" | "energy"
    pub date: String, // YYYY-MM-DD
    pub status: String, // "completed" | "pending" | "failed"
    pub created_at: i64,
}
