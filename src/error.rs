use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analytics core and its data sources.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dataset is empty; averages are undefined")]
    EmptyDataset,

    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse records: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Data source '{source_name}' timed out after {millis} ms")]
    Timeout { source_name: String, millis: u64 },

    #[error("Data source task failed: {0}")]
    Join(String),
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Parse(err.to_string())
    }
}
