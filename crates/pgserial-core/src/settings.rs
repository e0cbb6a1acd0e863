//! Settings for pgserial.
//!
//! [`Settings`] holds the database connection configuration used to resolve
//! a connection's vendor (serial columns only exist on PostgreSQL) together
//! with the logging configuration. Defaults describe a single PostgreSQL
//! database under the `default` alias.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The alias of the database used when none is given.
pub const DEFAULT_DB_ALIAS: &str = "default";

/// Database connection configuration.
///
/// Missing keys take their value from [`DatabaseSettings::default`], so an
/// extra alias in a settings file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// The database engine (e.g. `pgserial.db.backends.postgresql`).
    pub engine: String,
    /// The database name.
    pub name: String,
    /// The database user.
    pub user: String,
    /// The database password.
    pub password: String,
    /// The database host.
    pub host: String,
    /// The database port.
    pub port: u16,
    /// Additional engine-specific options.
    pub options: HashMap<String, String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: "pgserial.db.backends.postgresql".to_string(),
            name: "postgres".to_string(),
            user: String::new(),
            password: String::new(),
            host: "localhost".to_string(),
            port: 5432,
            options: HashMap::new(),
        }
    }
}

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use pgserial_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.log_level, "info");
/// assert!(settings.databases.contains_key("default"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// Database configurations, keyed by alias (e.g. "default").
    pub databases: HashMap<String, DatabaseSettings>,
    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut databases = HashMap::new();
        databases.insert(DEFAULT_DB_ALIAS.to_string(), DatabaseSettings::default());

        Self {
            debug: true,
            log_level: "info".to_string(),
            databases,
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the database configured under `alias`, if any.
    pub fn database(&self, alias: &str) -> Option<&DatabaseSettings> {
        self.databases.get(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_default_database() {
        let s = Settings::default();
        let db = s.database(DEFAULT_DB_ALIAS).expect("default db should exist");
        assert_eq!(db.engine, "pgserial.db.backends.postgresql");
        assert_eq!(db.port, 5432);
        assert!(s.database("replica").is_none());
    }
}
