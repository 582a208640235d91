use crate::error::AnalyticsError;
use crate::models::record::Record;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SAMPLE_RECORDS_JSON: &str = include_str!("../../fixtures/sample_records.json");

/// Supplies the records an analytics run works on.
pub trait DataSource: Send + Sync {
    fn name(&self) -> String;
    fn load(&self) -> Result<Vec<Record>, AnalyticsError>;

    /// Ask an in-flight `load` to stop. Sources that cannot be interrupted
    /// keep running on the blocking pool and their result is discarded.
    fn cancel(&self) {}
}

/// In-memory records, e.g. the bundled sample set or a test fixture.
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    label: String,
    records: Vec<Record>,
}

impl StaticDataSource {
    pub fn new(label: &str, records: Vec<Record>) -> Self {
        Self {
            label: label.to_string(),
            records,
        }
    }

    pub fn sample() -> Result<Self, AnalyticsError> {
        let records = parse_records(SAMPLE_RECORDS_JSON)?;
        Ok(Self::new("sample", records))
    }
}

impl DataSource for StaticDataSource {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> Result<Vec<Record>, AnalyticsError> {
        Ok(self.records.clone())
    }
}

/// A JSON array of records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileDataSource {
    path: PathBuf,
}

impl JsonFileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for JsonFileDataSource {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn load(&self) -> Result<Vec<Record>, AnalyticsError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| AnalyticsError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        parse_records(&raw)
    }
}

/// The `records` table of a workspace database.
#[derive(Clone)]
pub struct SqliteDataSource {
    workspace_path: String,
    interrupt: Arc<Mutex<Option<rusqlite::InterruptHandle>>>,
}

impl SqliteDataSource {
    pub fn new(workspace_path: &str) -> Self {
        Self {
            workspace_path: workspace_path.to_string(),
            interrupt: Arc::new(Mutex::new(None)),
        }
    }

    fn set_interrupt(&self, handle: Option<rusqlite::InterruptHandle>) {
        if let Ok(mut slot) = self.interrupt.lock() {
            *slot = handle;
        }
    }
}

impl DataSource for SqliteDataSource {
    fn name(&self) -> String {
        format!("sqlite:{}", self.workspace_path)
    }

    fn load(&self) -> Result<Vec<Record>, AnalyticsError> {
        let conn = crate::commands::db::get_db_connection(&self.workspace_path)?;
        self.set_interrupt(Some(conn.get_interrupt_handle()));
        let records = crate::commands::db::load_records(&conn);
        self.set_interrupt(None);
        Ok(records?)
    }

    fn cancel(&self) {
        if let Ok(slot) = self.interrupt.lock() {
            if let Some(handle) = slot.as_ref() {
                handle.interrupt();
            }
        }
    }
}

pub fn parse_records(raw: &str) -> Result<Vec<Record>, AnalyticsError> {
    Ok(serde_json::from_str::<Vec<Record>>(raw)?)
}

/// Run `source.load()` on the blocking pool, giving up after `timeout`.
///
/// On timeout the source is asked to cancel; a load that ignores the request
/// is abandoned, not joined.
pub async fn load_with_timeout(
    source: Arc<dyn DataSource>,
    timeout: Duration,
) -> Result<Vec<Record>, AnalyticsError> {
    let source_name = source.name();
    let canceller = Arc::clone(&source);
    let task = tokio::task::spawn_blocking(move || source.load());

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(AnalyticsError::Join(join_err.to_string())),
        Err(_) => {
            log::warn!("Data source {source_name} exceeded {} ms", timeout.as_millis());
            canceller.cancel();
            Err(AnalyticsError::Timeout {
                source_name,
                millis: timeout.as_millis() as u64,
            })
        }
    }
}
