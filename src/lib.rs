pub mod analysis;
pub mod commands;
pub mod error;
pub mod models;

use commands::{
    analytics::run_analytics,
    datasource::{DataSource, JsonFileDataSource, SqliteDataSource, StaticDataSource},
};
use models::dashboard::AnalyticsCache;
use std::sync::{Arc, Mutex};

/// Where an analytics run reads its records from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceArg {
    Sample,
    File(String),
    Database,
}

impl SourceArg {
    pub fn parse(raw: Option<&str>) -> SourceArg {
        match raw {
            None | Some("sample") => SourceArg::Sample,
            Some("db") => SourceArg::Database,
            Some(path) => SourceArg::File(path.to_string()),
        }
    }
}

fn open_source(arg: &SourceArg, workspace_path: &str) -> Result<Arc<dyn DataSource>, String> {
    let source: Arc<dyn DataSource> = match arg {
        SourceArg::Sample => Arc::new(StaticDataSource::sample().map_err(|e| e.to_string())?),
        SourceArg::File(path) => Arc::new(JsonFileDataSource::new(path)),
        SourceArg::Database => Arc::new(SqliteDataSource::new(workspace_path)),
    };
    Ok(source)
}

/// `ecodash [sample|db|<records.json>] [workspace]`. Prints the dashboard as JSON.
pub fn run() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let source_arg = SourceArg::parse(args.first().map(String::as_str));
    let workspace_path = args.get(1).cloned().unwrap_or_else(|| ".".to_string());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;

    let source = open_source(&source_arg, &workspace_path)?;
    let cache = Arc::new(Mutex::new(AnalyticsCache::default()));
    let dashboard = runtime.block_on(run_analytics(workspace_path, source, cache))?;

    let rendered = serde_json::to_string_pretty(&dashboard)
        .map_err(|e| format!("Failed to serialize dashboard: {e}"))?;
    println!("{rendered}");
    Ok(())
}
