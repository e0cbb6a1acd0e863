//! Field definitions.
//!
//! Fields are composed rather than inherited: every concrete field implements
//! the [`NumericField`] capability, and [`Serial`] decorates any
//! [`SerialBase`] field with the PostgreSQL serial behaviour.
//!
//! | Field | Internal type | PostgreSQL type |
//! |---|---|---|
//! | [`SmallIntegerField`] | `SmallIntegerField` | `smallint` |
//! | [`IntegerField`] | `IntegerField` | `integer` |
//! | [`BigIntegerField`] | `BigIntegerField` | `bigint` |
//! | [`SmallSerialField`] | `SmallSerialField` | `smallserial` |
//! | [`SerialField`] | `SerialField` | `serial` |
//! | [`BigSerialField`] | `BigSerialField` | `bigserial` |

pub mod deconstruct;
pub mod integer;
pub mod options;
pub mod serial;

use std::fmt;

use pgserial_core::{CheckMessage, OrmResult};

use crate::connection::Connection;
use crate::value::{PrepValue, Value};

pub use deconstruct::{reconstruct, Deconstructed};
pub use integer::{BigIntegerField, IntField, IntegerField, IntegerWidth, SmallIntegerField};
pub use options::FieldOptions;
pub use serial::{
    BigSerialField, Serial, SerialBase, SerialField, SmallSerialField, SERIAL_DB_COMMENT,
};

/// The capability every numeric field exposes to the rest of the ORM.
///
/// The schema editor asks for [`db_type`](Self::db_type) and
/// [`db_comment`](Self::db_comment), write queries call
/// [`get_prep_value`](Self::get_prep_value), model validation calls
/// [`clean`](Self::clean), the check pass calls [`check`](Self::check), and
/// migration tooling calls [`deconstruct`](Self::deconstruct).
pub trait NumericField: fmt::Debug + Send + Sync {
    /// Returns the declaration options.
    fn options(&self) -> &FieldOptions;

    /// Returns the symbolic type tag used for type dispatch.
    fn internal_type(&self) -> &'static str;

    /// Returns the column type emitted during schema generation.
    fn db_type(&self, connection: &Connection) -> String;

    /// Converts a raw value into the field's native value.
    fn to_python(&self, value: Value) -> OrmResult<Value>;

    /// Prepares a value for a write query.
    fn get_prep_value(&self, value: Value) -> OrmResult<PrepValue>;

    /// Validates an already converted value.
    fn validate(&self, value: &Value) -> OrmResult<()>;

    /// Runs the advisory checks for this declaration.
    fn check(&self) -> Vec<CheckMessage>;

    /// Converts the declaration into a reconstructable record.
    fn deconstruct(&self) -> Deconstructed;

    /// Returns a human-readable description of the field type.
    fn description(&self) -> &'static str;

    /// Returns `true` if the database generates this column's value on
    /// insert, so the statement should read it back with `RETURNING`.
    fn db_returning(&self) -> bool {
        false
    }

    /// Returns the column comment, if any.
    fn db_comment(&self) -> Option<&str> {
        self.options().db_comment.as_deref()
    }

    /// Returns the database column name.
    fn column(&self) -> &str {
        self.options().column_name()
    }

    /// Converts and validates a value during model validation.
    ///
    /// Empty values of blank fields are accepted untouched, so an unsaved
    /// instance whose key is still unset passes validation.
    fn clean(&self, value: Value) -> OrmResult<Value> {
        if self.options().blank && is_empty_value(&value) {
            return Ok(value);
        }
        let value = self.to_python(value)?;
        self.validate(&value)?;
        Ok(value)
    }
}

/// Runs [`NumericField::check`] over the fields of one model.
///
/// Each field is checked inside its own tracing span and the messages are
/// returned in declaration order.
pub fn check_fields(model: &str, fields: &[&dyn NumericField]) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    for field in fields {
        let span = pgserial_core::logging::field_span(model, &field.options().name);
        let _guard = span.enter();
        let found = field.check();
        if found.iter().any(CheckMessage::is_serious) {
            tracing::warn!(issues = found.len(), "field check reported issues");
        }
        messages.extend(found);
    }
    messages
}

/// Returns `true` for the values validation treats as "empty".
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
