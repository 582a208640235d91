use crate::models::record::Record;
use crate::models::report::ReportEntry;
use crate::models::summary::{SummaryReport, SummarySnapshot};
use rusqlite::{params, Connection, OptionalExtension, Result};

const DB_SCHEMA_VERSION: i64 = 2;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 2 {
        apply_migration_2(conn)?;
        version = 2;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        log::debug!("Database schema version {version} is newer than {DB_SCHEMA_VERSION}");
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER NOT NULL,
            company TEXT NOT NULL,
            carbon_footprint REAL NOT NULL DEFAULT 0,
            energy REAL NOT NULL DEFAULT 0,
            waste REAL NOT NULL DEFAULT 0,
            imported_at INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS summary_snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp INTEGER NOT NULL,
            record_count INTEGER NOT NULL,
            avg_emissions REAL NOT NULL,
            avg_energy REAL NOT NULL,
            avg_waste REAL NOT NULL,
            compliant_metrics INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS reports (
            id TEXT PRIMARY KEY,
            report_name TEXT NOT NULL,
            report_type TEXT NOT NULL,
            date TEXT NOT NULL,
            status TEXT CHECK(status IN ('completed', 'pending', 'failed')) DEFAULT 'pending',
            created_at INTEGER NOT NULL
        );
        ",
    )
}

fn apply_migration_2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_records_year ON records(year);
        CREATE INDEX IF NOT EXISTS idx_records_company ON records(company);
        CREATE INDEX IF NOT EXISTS idx_summary_snapshots_timestamp ON summary_snapshots(timestamp);
        ",
    )
}

pub fn get_db_connection(workspace_path: &str) -> Result<Connection> {
    let dir = std::path::Path::new(workspace_path).join(".ecodash");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Could not create {}: {e}", dir.display());
    }
    let conn = Connection::open(dir.join("state.db"))?;
    initialize_schema(&conn)?;
    Ok(conn)
}

pub fn insert_records(conn: &Connection, records: &[Record]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let now = chrono::Utc::now().timestamp();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO records (year, company, carbon_footprint, energy, waste, imported_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for record in records {
            stmt.execute(params![
                record.year,
                record.company,
                record.carbon_footprint,
                record.energy,
                record.waste,
                now,
            ])?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}

/// Records in insertion order.
pub fn load_records(conn: &Connection) -> Result<Vec<Record>> {
    let mut stmt = conn.prepare(
        "SELECT year, company, carbon_footprint, energy, waste FROM records ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Record {
            year: row.get(0)?,
            company: row.get(1)?,
            carbon_footprint: row.get(2)?,
            energy: row.get(3)?,
            waste: row.get(4)?,
        })
    })?;

    rows.collect()
}

pub fn clear_records(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM records", [])
}

pub fn insert_snapshot(
    conn: &Connection,
    summary: &SummaryReport,
    record_count: usize,
    compliant_metrics: usize,
) -> Result<SummarySnapshot> {
    let now = chrono::Utc::now().timestamp();

    conn.execute(
        "INSERT INTO summary_snapshots (timestamp, record_count, avg_emissions, avg_energy, avg_waste, compliant_metrics) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            now,
            record_count as i64,
            summary.emissions.value,
            summary.energy.value,
            summary.waste.value,
            compliant_metrics as i64,
        ],
    )?;

    Ok(SummarySnapshot {
        id: conn.last_insert_rowid(),
        timestamp: now,
        record_count,
        avg_emissions: summary.emissions.value,
        avg_energy: summary.energy.value,
        avg_waste: summary.waste.value,
        compliant_metrics,
    })
}

pub fn load_snapshots(conn: &Connection) -> Result<Vec<SummarySnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, record_count, avg_emissions, avg_energy, avg_waste, compliant_metrics FROM summary_snapshots ORDER BY timestamp ASC, id ASC",
    )?;

    let snapshots = stmt
        .query_map([], |row| {
            Ok(SummarySnapshot {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                record_count: row.get::<_, i64>(2)? as usize,
                avg_emissions: row.get(3)?,
                avg_energy: row.get(4)?,
                avg_waste: row.get(5)?,
                compliant_metrics: row.get::<_, i64>(6)? as usize,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(snapshots)
}

/// Keep only the newest `retention` snapshots.
pub fn prune_snapshots(conn: &Connection, retention: usize) -> Result<usize> {
    conn.execute(
        "DELETE FROM summary_snapshots WHERE id NOT IN (SELECT id FROM summary_snapshots ORDER BY timestamp DESC, id DESC LIMIT ?1)",
        params![retention as i64],
    )
}

pub async fn take_summary_snapshot(
    workspace_path: String,
    summary: SummaryReport,
    record_count: usize,
) -> Result<SummarySnapshot, String> {
    let conn = get_db_connection(&workspace_path).map_err(|e| format!("DB error: {e}"))?;
    let settings = crate::commands::settings::load_effective_analytics_settings(&workspace_path)?;

    let compliant = crate::analysis::summary::compliant_count(&summary);
    let snapshot = insert_snapshot(&conn, &summary, record_count, compliant)
        .map_err(|e| format!("Insert error: {e}"))?;

    let pruned = prune_snapshots(&conn, settings.snapshot_retention)
        .map_err(|e| format!("Prune error: {e}"))?;
    if pruned > 0 {
        log::info!("Pruned {pruned} summary snapshots beyond retention");
    }

    Ok(snapshot)
}

pub async fn get_summary_snapshots(workspace_path: String) -> Result<Vec<SummarySnapshot>, String> {
    let conn = get_db_connection(&workspace_path).map_err(|e| format!("DB error: {e}"))?;
    load_snapshots(&conn).map_err(|e| format!("Query error: {e}"))
}

pub async fn import_records(workspace_path: String, records: Vec<Record>) -> Result<usize, String> {
    let warnings = crate::analysis::integrity::scan_integrity(&records);
    for warning in &warnings {
        log::warn!("Importing {}", warning.describe());
    }

    let conn = get_db_connection(&workspace_path).map_err(|e| format!("DB error: {e}"))?;
    let inserted = insert_records(&conn, &records).map_err(|e| format!("Insert error: {e}"))?;
    log::info!("Imported {inserted} records into {workspace_path}");
    Ok(inserted)
}

fn row_to_report(row: &rusqlite::Row<'_>) -> Result<ReportEntry> {
    Ok(ReportEntry {
        id: row.get(0)?,
        report_name: row.get(1)?,
        report_type: row.get(2)?,
        date: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
    })
}

const REPORT_TYPES: [&str; 3] = ["environmental", "compliance", "energy"];
const REPORT_STATUSES: [&str; 3] = ["completed", "pending", "failed"];

fn validate_report(item: &ReportEntry) -> Result<(), String> {
    if item.report_name.trim().is_empty() {
        return Err("Report name is required".to_string());
    }
    if !REPORT_TYPES.contains(&item.report_type.as_str()) {
        return Err(format!("Invalid report type: {}", item.report_type));
    }
    if !REPORT_STATUSES.contains(&item.status.as_str()) {
        return Err(format!("Invalid report status: {}", item.status));
    }
    if chrono::NaiveDate::parse_from_str(&item.date, "%Y-%m-%d").is_err() {
        return Err(format!("Invalid report date (expected YYYY-MM-DD): {}", item.date));
    }
    Ok(())
}

pub async fn report_crud(
    workspace_path: String,
    operation: String,
    item: Option<ReportEntry>,
    id: Option<String>,
) -> Result<serde_json::Value, String> {
    let conn = get_db_connection(&workspace_path)
        .map_err(|e| format!("DB error: {e}"))?;

    match operation.as_str() {
        "create" => {
            let mut item = item.ok_or("Item required for create")?;
            validate_report(&item)?;
            if item.id.is_empty() {
                item.id = uuid::Uuid::new_v4().to_string();
            }
            if item.created_at == 0 {
                item.created_at = chrono::Utc::now().timestamp();
            }
            conn.execute(
                "INSERT INTO reports (id, report_name, report_type, date, status, created_at) VALUES (?1,?2,?3,?4,?5,?6)",
                params![&item.id, &item.report_name, &item.report_type, &item.date, &item.status, item.created_at],
            )
            .map_err(|e| format!("Insert error: {e}"))?;
            Ok(serde_json::json!({"status": "created", "id": item.id}))
        }
        "update" => {
            let item = item.ok_or("Item required for update")?;
            validate_report(&item)?;
            let changed = conn
                .execute(
                    "UPDATE reports SET report_name=?2, report_type=?3, date=?4, status=?5 WHERE id=?1",
                    params![&item.id, &item.report_name, &item.report_type, &item.date, &item.status],
                )
                .map_err(|e| format!("Update error: {e}"))?;
            if changed == 0 {
                return Err(format!("Report not found: {}", item.id));
            }
            Ok(serde_json::json!({"status": "updated", "id": item.id}))
        }
        "read" => {
            let id = id.ok_or("ID required for read")?;
            let item: Option<ReportEntry> = conn
                .query_row(
                    "SELECT id, report_name, report_type, date, status, created_at FROM reports WHERE id = ?1",
                    params![id],
                    row_to_report,
                )
                .optional()
                .map_err(|e| format!("Read error: {e}"))?;

            Ok(serde_json::to_value(item).unwrap_or(serde_json::Value::Null))
        }
        "list" => {
            let mut stmt = conn
                .prepare("SELECT id, report_name, report_type, date, status, created_at FROM reports ORDER BY date DESC, created_at DESC")
                .map_err(|e| format!("Query error: {e}"))?;

            let items: Vec<ReportEntry> = stmt
                .query_map([], row_to_report)
                .map_err(|e| format!("Map error: {e}"))?
                .filter_map(|r| r.ok())
                .collect();

            Ok(serde_json::to_value(items).unwrap_or_default())
        }
        "delete" => {
            let id = id.ok_or("ID required for delete")?;
            let changed = conn
                .execute("DELETE FROM reports WHERE id = ?1", params![&id])
                .map_err(|e| format!("Delete error: {e}"))?;
            if changed == 0 {
                return Err(format!("Report not found: {id}"));
            }
            Ok(serde_json::json!({"status": "deleted", "id": id}))
        }
        _ => Err(format!("Unknown operation: {operation}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::MetricSummary;

    fn summary(emissions: f64) -> SummaryReport {
        SummaryReport {
            emissions: MetricSummary { value: emissions, meets_criteria: true },
            energy: MetricSummary { value: 10.0, meets_criteria: true },
            waste: MetricSummary { value: 5000.0, meets_criteria: false },
        }
    }

    #[test]
    fn schema_initializes_with_expected_version() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("schema version");
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn records_load_back_in_insertion_order() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");

        let records = vec![
            Record::new(2022, "B", 2.0, 3.0, 4.0),
            Record::new(2020, "A", 1.0, 1.5, 0.5),
        ];
        assert_eq!(insert_records(&conn, &records).expect("insert"), 2);
        assert_eq!(load_records(&conn).expect("load"), records);

        clear_records(&conn).expect("clear");
        assert!(load_records(&conn).expect("load").is_empty());
    }

    #[test]
    fn snapshots_prune_to_retention() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");

        for i in 0..4 {
            insert_snapshot(&conn, &summary(100.0 + i as f64), 3, 2).expect("snapshot");
        }
        assert_eq!(prune_snapshots(&conn, 2).expect("prune"), 2);

        let remaining = load_snapshots(&conn).expect("load snapshots");
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[1].avg_emissions, 103.0);
        assert_eq!(remaining[0].compliant_metrics, 2);
    }

    #[test]
    fn report_validation_rejects_unknown_values() {
        let report = ReportEntry {
            id: String::new(),
            report_name: "Annual Energy Audit".to_string(),
            report_type: "energy".to_string(),
            date: "2024-02-28".to_string(),
            status: "completed".to_string(),
            created_at: 0,
        };
        assert!(validate_report(&report).is_ok());
        assert!(validate_report(&ReportEntry { report_type: "financial".to_string(), ..report.clone() }).is_err());
        assert!(validate_report(&ReportEntry { status: "draft".to_string(), ..report.clone() }).is_err());
        assert!(validate_report(&ReportEntry { date: "15/03/2024".to_string(), ..report.clone() }).is_err());
        assert!(validate_report(&ReportEntry { date: "2024-02-30".to_string(), ..report.clone() }).is_err());
        assert!(validate_report(&ReportEntry { report_name: " ".to_string(), ..report }).is_err());
    }
}
