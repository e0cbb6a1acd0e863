//! Database connection handles.
//!
//! Fields only need to know which database vendor they are talking to in
//! order to answer [`db_type`](crate::fields::NumericField::db_type), so a
//! [`Connection`] here is just an alias plus its vendor.

use pgserial_core::{OrmError, OrmResult, Settings};

/// The type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseBackendType {
    /// PostgreSQL (uses `$1, $2, ...` placeholders).
    PostgreSQL,
    /// SQLite (uses `?` placeholders).
    SQLite,
    /// MySQL (uses `?` placeholders).
    MySQL,
}

impl DatabaseBackendType {
    /// Resolves a backend from an engine path such as
    /// `pgserial.db.backends.postgresql`. Only the last segment is considered.
    pub fn from_engine(engine: &str) -> Option<Self> {
        match engine.rsplit('.').next()? {
            "postgresql" | "postgres" => Some(Self::PostgreSQL),
            "sqlite3" | "sqlite" => Some(Self::SQLite),
            "mysql" => Some(Self::MySQL),
            _ => None,
        }
    }

    /// Returns the vendor name used in log output.
    pub const fn vendor(self) -> &'static str {
        match self {
            Self::PostgreSQL => "postgresql",
            Self::SQLite => "sqlite",
            Self::MySQL => "mysql",
        }
    }
}

/// A handle naming a configured database and its vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// The database alias (e.g. "default").
    pub alias: String,
    /// The backend vendor.
    pub backend: DatabaseBackendType,
}

impl Connection {
    /// Creates a connection handle directly.
    pub fn new(alias: impl Into<String>, backend: DatabaseBackendType) -> Self {
        Self {
            alias: alias.into(),
            backend,
        }
    }

    /// Creates a handle for a PostgreSQL database under the `default` alias.
    pub fn postgres() -> Self {
        Self::new(pgserial_core::settings::DEFAULT_DB_ALIAS, DatabaseBackendType::PostgreSQL)
    }

    /// Resolves the database configured under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::ImproperlyConfigured`] if the alias is not
    /// configured or its engine is not a known backend.
    pub fn from_settings(settings: &Settings, alias: &str) -> OrmResult<Self> {
        let db = settings.database(alias).ok_or_else(|| {
            OrmError::ImproperlyConfigured(format!("The connection '{alias}' doesn't exist."))
        })?;
        let backend = DatabaseBackendType::from_engine(&db.engine).ok_or_else(|| {
            OrmError::ImproperlyConfigured(format!(
                "'{}' isn't an available database backend.",
                db.engine
            ))
        })?;
        Ok(Self::new(alias, backend))
    }

    /// Returns `true` if this connection targets PostgreSQL.
    pub fn is_postgres(&self) -> bool {
        self.backend == DatabaseBackendType::PostgreSQL
    }
}
