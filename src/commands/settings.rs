use crate::models::policy::{
    ImpactRating, ImpactTable, ThresholdPolicy, DEFAULT_CARBON_LIMIT, DEFAULT_ENERGY_LIMIT,
    DEFAULT_WASTE_LIMIT,
};
use crate::models::record::Metric;
use crate::models::view::Grouping;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_SCHEMA_VERSION: i64 = 2;

#[derive(Debug, Clone)]
pub struct EffectiveAnalyticsSettings {
    pub policy: ThresholdPolicy,
    pub impact_table: ImpactTable,
    pub top_companies: usize,
    pub data_timeout: Duration,
    pub default_grouping: Grouping,
    pub snapshot_retention: usize,
}

pub async fn get_settings(workspace_path: String) -> Result<Value, String> {
    load_settings_from_disk(&workspace_path)
}

pub async fn save_settings(workspace_path: String, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(&workspace_path, settings)
}

pub fn load_effective_analytics_settings(workspace_path: &str) -> Result<EffectiveAnalyticsSettings, String> {
    let settings = load_settings_from_disk(workspace_path)?;
    Ok(effective_from_value(&settings))
}

pub fn effective_from_value(settings: &Value) -> EffectiveAnalyticsSettings {
    let limit = |key: &str, default: f64| {
        settings
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(default)
    };

    let mut impact_table = ImpactTable::default();
    if let Some(obj) = settings.get("impactTable").and_then(Value::as_object) {
        for (key, value) in obj {
            let metric = Metric::parse(key);
            let rating = value.as_str().and_then(ImpactRating::parse);
            if let (Some(metric), Some(rating)) = (metric, rating) {
                impact_table.set(metric, rating);
            }
        }
    }

    EffectiveAnalyticsSettings {
        policy: ThresholdPolicy {
            carbon_limit: limit("carbonLimit", DEFAULT_CARBON_LIMIT),
            energy_limit: limit("energyLimit", DEFAULT_ENERGY_LIMIT),
            waste_limit: limit("wasteLimit", DEFAULT_WASTE_LIMIT),
        },
        impact_table,
        top_companies: settings
            .get("topCompanies")
            .and_then(Value::as_u64)
            .unwrap_or(5)
            .clamp(1, 50) as usize,
        data_timeout: Duration::from_millis(
            settings
                .get("dataTimeoutMs")
                .and_then(Value::as_u64)
                .unwrap_or(5000)
                .clamp(100, 60_000),
        ),
        default_grouping: settings
            .get("defaultGrouping")
            .and_then(Value::as_str)
            .and_then(Grouping::parse)
            .unwrap_or_default(),
        snapshot_retention: settings
            .get("snapshotRetention")
            .and_then(Value::as_u64)
            .unwrap_or(52)
            .clamp(1, 520) as usize,
    }
}

pub fn load_settings_from_disk(workspace_path: &str) -> Result<Value, String> {
    let path = settings_path(workspace_path);
    ensure_ecodash_dir(workspace_path)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
            log::warn!("settings.json is not valid JSON, using defaults: {e}");
            json!({})
        })
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(workspace_path: &str, settings: Value) -> Result<Value, String> {
    let path = settings_path(workspace_path);
    ensure_ecodash_dir(workspace_path)?;

    let mut merged = load_settings_from_disk(workspace_path).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    Ok(migrated)
}

fn settings_path(workspace_path: &str) -> PathBuf {
    Path::new(workspace_path).join(".ecodash").join("settings.json")
}

fn ensure_ecodash_dir(workspace_path: &str) -> Result<(), String> {
    let dir = Path::new(workspace_path).join(".ecodash");
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create .ecodash directory: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version < 2 {
        // V1 kept limits under a nested `criteria` object.
        lift_legacy_criteria(&mut out);
    }

    deep_merge_defaults(&mut out, &default_settings());
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "carbonLimit": DEFAULT_CARBON_LIMIT,
        "energyLimit": DEFAULT_ENERGY_LIMIT,
        "wasteLimit": DEFAULT_WASTE_LIMIT,
        "impactTable": {
            "emissions": "high",
            "energy": "medium",
            "waste": "medium"
        },
        "topCompanies": 5,
        "dataTimeoutMs": 5000,
        "defaultGrouping": "year",
        "snapshotRetention": 52
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn lift_legacy_criteria(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };
    let Some(Value::Object(criteria)) = obj.remove("criteria") else {
        return;
    };

    for (legacy, key) in [
        ("emissions", "carbonLimit"),
        ("energy", "energyLimit"),
        ("waste", "wasteLimit"),
    ] {
        if let Some(value) = criteria.get(legacy).filter(|v| v.is_number()) {
            obj.entry(key.to_string()).or_insert_with(|| value.clone());
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    ensure_positive_f64(obj, "carbonLimit", DEFAULT_CARBON_LIMIT);
    ensure_positive_f64(obj, "energyLimit", DEFAULT_ENERGY_LIMIT);
    ensure_positive_f64(obj, "wasteLimit", DEFAULT_WASTE_LIMIT);

    clamp_u64(obj, "topCompanies", 1, 50, 5);
    clamp_u64(obj, "dataTimeoutMs", 100, 60_000, 5000);
    clamp_u64(obj, "snapshotRetention", 1, 520, 52);

    sanitize_enum(obj, "defaultGrouping", &["year", "company"], "year");

    let table = obj
        .entry("impactTable".to_string())
        .or_insert_with(|| json!({}));
    if !table.is_object() {
        *table = json!({});
    }
    if let Some(table_obj) = table.as_object_mut() {
        table_obj.retain(|key, _| Metric::parse(key).is_some());
        for (metric, default) in [("emissions", "high"), ("energy", "medium"), ("waste", "medium")] {
            sanitize_enum(table_obj, metric, &["low", "medium", "high"], default);
        }
    }
}

fn ensure_positive_f64(map: &mut Map<String, Value>, key: &str, default: f64) {
    let value = map
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default);
    map.insert(key.to_string(), json!(value));
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn sanitize_enum(map: &mut Map<String, Value>, key: &str, allowed: &[&str], default: &str) {
    let valid = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| allowed.contains(value))
        .unwrap_or(default);
    map.insert(key.to_string(), json!(valid));
}
