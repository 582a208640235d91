use crate::models::dashboard::DashboardResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub report_id: String,
    pub format: String, // "csv" | "json" | "xlsx" | "pdf"
    pub dashboard: DashboardResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub report_id: String,
    pub path: String,
    pub bytes: usize,
    pub exported_at: i64,
}

/// Accepts a report payload and reports success or failure.
pub trait Exporter {
    fn export(&self, request: &ExportRequest) -> Result<ExportReceipt, String>;
}

/// Writes `report_<id>.<ext>` under `<workspace>/.ecodash/exports`.
pub struct FileExporter {
    workspace_path: String,
}

impl FileExporter {
    pub fn new(workspace_path: &str) -> Self {
        Self {
            workspace_path: workspace_path.to_string(),
        }
    }

    fn export_dir(&self) -> PathBuf {
        Path::new(&self.workspace_path).join(".ecodash").join("exports")
    }
}

impl Exporter for FileExporter {
    fn export(&self, request: &ExportRequest) -> Result<ExportReceipt, String> {
        if request.report_id.is_empty()
            || !request
                .report_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!("Invalid report id: {:?}", request.report_id));
        }

        let body = match request.format.as_str() {
            "csv" => render_csv(&request.dashboard),
            "json" => serde_json::to_string_pretty(&request.dashboard)
                .map_err(|e| format!("Failed to serialize dashboard: {e}"))?,
            other => return Err(format!("Unsupported export format: {other}")),
        };

        let dir = self.export_dir();
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create exports directory: {e}"))?;
        let path = dir.join(format!("report_{}.{}", request.report_id, request.format));
        fs::write(&path, &body).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

        log::info!("Exported report {} to {}", request.report_id, path.display());

        Ok(ExportReceipt {
            report_id: request.report_id.clone(),
            path: path.to_string_lossy().to_string(),
            bytes: body.len(),
            exported_at: chrono::Utc::now().timestamp(),
        })
    }
}

pub async fn export_report(exporter: &dyn Exporter, request: ExportRequest) -> Result<ExportReceipt, String> {
    exporter.export(&request)
}

fn render_csv(dashboard: &DashboardResult) -> String {
    let mut out = String::from("year,records,carbon_footprint,energy,waste,avg_carbon_footprint,avg_energy,avg_waste\n");
    for group in &dashboard.yearly_trend {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{:.2},{:.2},{:.2}",
            group.key,
            group.count,
            group.sum_carbon,
            group.sum_energy,
            group.sum_waste,
            group.avg_carbon(),
            group.avg_energy(),
            group.avg_waste()
        );
    }
    out
}
