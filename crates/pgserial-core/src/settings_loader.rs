//! Settings loading from configuration files.
//!
//! [`Settings`] can be loaded from TOML or JSON. Keys present in the file
//! override the defaults; everything else keeps its default value.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `PGSERIAL_DEBUG` | `debug` |
//! | `PGSERIAL_LOG_LEVEL` | `log_level` |
//! | `PGSERIAL_DATABASE_ENGINE` | `databases.default.engine` |
//! | `PGSERIAL_DATABASE_NAME` | `databases.default.name` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use pgserial_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/pgserial.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::OrmError;
use crate::settings::{Settings, DEFAULT_DB_ALIAS};

/// Loads settings from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, OrmError> {
    // Go through serde_json so the file can be deep-merged over the defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| OrmError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, OrmError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| OrmError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Database overrides apply to the `default` alias, which is created from
/// the default database settings if it is missing.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("PGSERIAL_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("PGSERIAL_LOG_LEVEL") {
        settings.log_level = val;
    }

    let engine = std::env::var("PGSERIAL_DATABASE_ENGINE").ok();
    let name = std::env::var("PGSERIAL_DATABASE_NAME").ok();
    if engine.is_some() || name.is_some() {
        let db = settings
            .databases
            .entry(DEFAULT_DB_ALIAS.to_string())
            .or_default();
        if let Some(engine) = engine {
            db.engine = engine;
        }
        if let Some(name) = name {
            db.name = name;
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, OrmError> {
    std::fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = %path.display(), format, error = %e, "failed to read settings file");
        OrmError::from(e)
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, OrmError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        OrmError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        OrmError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
