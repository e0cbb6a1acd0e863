//! # pgserial
//!
//! PostgreSQL `smallserial`, `serial` and `bigserial` field types for a
//! Django-style ORM.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient access.
//! You can depend on `pgserial` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! # Examples
//!
//! ```
//! use pgserial::prelude::*;
//!
//! let id = BigSerialField::new(FieldOptions::new("id").primary_key());
//! assert_eq!(id.db_type(&Connection::postgres()), "bigserial");
//! assert_eq!(id.get_prep_value(Value::Null).unwrap(), PrepValue::DatabaseDefault);
//! ```

/// Settings, system check messages, logging, and error types.
pub use pgserial_core as core;

/// Field types, values, connections, and insert compilation.
pub use pgserial_db as db;

/// DDL generation and serial column introspection.
#[cfg(feature = "schema")]
pub use pgserial_schema as schema;

/// Third-party crates used in the public API.
pub use serde_json;
pub use tracing;

/// The types most declarations need.
pub mod prelude {
    pub use pgserial_core::{CheckLevel, CheckMessage, OrmError, OrmResult, Settings};
    pub use pgserial_db::fields::{
        BigIntegerField, BigSerialField, FieldOptions, IntegerField, NumericField,
        SerialField, SmallIntegerField, SmallSerialField, SERIAL_DB_COMMENT,
    };
    pub use pgserial_db::value::{FieldDefault, PrepValue, Value};
    pub use pgserial_db::Connection;

    #[cfg(feature = "schema")]
    pub use pgserial_schema::{PostgresSchemaEditor, SchemaEditor};
}
