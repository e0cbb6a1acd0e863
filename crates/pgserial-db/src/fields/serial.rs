//! PostgreSQL serial fields.
//!
//! [`Serial`] decorates a numeric field so the column is backed by a
//! database sequence:
//!
//! - the declared type becomes `smallserial`, `serial` or `bigserial`;
//! - `blank` is always `true` and the column comment is always
//!   [`SERIAL_DB_COMMENT`], whatever the caller passed;
//! - a missing value is sent as [`PrepValue::DatabaseDefault`] so the
//!   sequence fills it in, and the generated value is read back through
//!   `RETURNING` ([`db_returning`](NumericField::db_returning));
//! - declaring the field nullable (`fields.E013`) or with a default
//!   (`fields.E014`) is reported by [`check`](NumericField::check). Neither
//!   prevents constructing or using the field.
//!
//! # Examples
//!
//! ```
//! use pgserial_db::connection::Connection;
//! use pgserial_db::fields::{BigSerialField, FieldOptions, NumericField, SERIAL_DB_COMMENT};
//! use pgserial_db::value::{PrepValue, Value};
//!
//! let id = BigSerialField::new(FieldOptions::new("id"));
//! assert_eq!(id.db_type(&Connection::postgres()), "bigserial");
//! assert!(id.check().is_empty());
//! assert_eq!(id.db_comment(), Some(SERIAL_DB_COMMENT));
//! assert_eq!(id.get_prep_value(Value::Null).unwrap(), PrepValue::DatabaseDefault);
//! ```

use pgserial_core::{CheckMessage, OrmResult};

use super::deconstruct::{expect_path, field_path, Deconstructed};
use super::{BigIntegerField, FieldOptions, IntegerField, NumericField, SmallIntegerField};
use crate::connection::Connection;
use crate::value::{PrepValue, Value};

/// The column comment marking a column as created by a serial field.
///
/// Introspection uses it to tell these columns apart from legacy
/// auto-increment columns.
pub const SERIAL_DB_COMMENT: &str = "38UIvRvC6xSOihIy4idv";

/// A numeric field that can be decorated by [`Serial`].
pub trait SerialBase: NumericField + Sized {
    /// The type tag of the serial variant.
    const SERIAL_INTERNAL_TYPE: &'static str;
    /// The PostgreSQL column type of the serial variant.
    const SERIAL_DB_TYPE: &'static str;
    /// Human-readable description of the serial variant.
    const SERIAL_DESCRIPTION: &'static str;

    /// Builds the base field from its options.
    fn from_options(options: FieldOptions) -> Self;
}

impl SerialBase for SmallIntegerField {
    const SERIAL_INTERNAL_TYPE: &'static str = "SmallSerialField";
    const SERIAL_DB_TYPE: &'static str = "smallserial";
    const SERIAL_DESCRIPTION: &'static str = "Small serial";

    fn from_options(options: FieldOptions) -> Self {
        Self::new(options)
    }
}

impl SerialBase for IntegerField {
    const SERIAL_INTERNAL_TYPE: &'static str = "SerialField";
    const SERIAL_DB_TYPE: &'static str = "serial";
    const SERIAL_DESCRIPTION: &'static str = "Serial";

    fn from_options(options: FieldOptions) -> Self {
        Self::new(options)
    }
}

impl SerialBase for BigIntegerField {
    const SERIAL_INTERNAL_TYPE: &'static str = "BigSerialField";
    const SERIAL_DB_TYPE: &'static str = "bigserial";
    const SERIAL_DESCRIPTION: &'static str = "Big serial";

    fn from_options(options: FieldOptions) -> Self {
        Self::new(options)
    }
}

/// A sequence-backed field wrapping the numeric field `F`.
#[derive(Debug, Clone, PartialEq)]
pub struct Serial<F> {
    base: F,
}

/// A `smallserial` column (16-bit).
pub type SmallSerialField = Serial<SmallIntegerField>;
/// A `serial` column (32-bit).
pub type SerialField = Serial<IntegerField>;
/// A `bigserial` column (64-bit).
pub type BigSerialField = Serial<BigIntegerField>;

impl<F: SerialBase> Serial<F> {
    /// Creates a serial field, forcing `blank = true` and the serial column
    /// comment. Never fails; misconfiguration is left to [`check`](NumericField::check).
    pub fn new(mut options: FieldOptions) -> Self {
        if !options.blank {
            tracing::debug!(field = %options.name, "serial field forces blank=true");
        }
        if let Some(comment) = options.db_comment.as_deref() {
            if comment != SERIAL_DB_COMMENT {
                tracing::debug!(
                    field = %options.name,
                    comment,
                    "replacing db_comment on serial field"
                );
            }
        }
        options.blank = true;
        options.db_comment = Some(SERIAL_DB_COMMENT.to_string());
        Self {
            base: F::from_options(options),
        }
    }

    /// Rebuilds a serial field from a [`Deconstructed`] record.
    ///
    /// # Errors
    ///
    /// Fails if the record describes another field type or carries
    /// malformed options.
    pub fn from_deconstructed(record: &Deconstructed) -> OrmResult<Self> {
        expect_path(record, F::SERIAL_INTERNAL_TYPE)?;
        Ok(Self::new(FieldOptions::from_kwargs(&record.name, &record.kwargs)?))
    }

    /// Returns the wrapped numeric field.
    pub const fn base(&self) -> &F {
        &self.base
    }

    fn check_null(&self) -> Option<CheckMessage> {
        self.options().null.then(|| {
            CheckMessage::error(
                "SerialFields do not accept null values.",
                None,
                Some(&self.options().label()),
                Some("fields.E013"),
            )
        })
    }

    fn check_default(&self) -> Option<CheckMessage> {
        self.options().default.is_provided().then(|| {
            CheckMessage::error(
                "SerialFields do not accept default values.",
                None,
                Some(&self.options().label()),
                Some("fields.E014"),
            )
        })
    }
}

impl<F: SerialBase> Default for Serial<F> {
    fn default() -> Self {
        Self::new(FieldOptions::new(""))
    }
}

impl<F: SerialBase> NumericField for Serial<F> {
    fn options(&self) -> &FieldOptions {
        self.base.options()
    }

    fn internal_type(&self) -> &'static str {
        F::SERIAL_INTERNAL_TYPE
    }

    fn db_type(&self, connection: &Connection) -> String {
        if !connection.is_postgres() {
            tracing::warn!(
                field = %self.options().label(),
                vendor = connection.backend.vendor(),
                alias = %connection.alias,
                "{} is only supported on PostgreSQL",
                F::SERIAL_DB_TYPE
            );
        }
        F::SERIAL_DB_TYPE.to_string()
    }

    fn description(&self) -> &'static str {
        F::SERIAL_DESCRIPTION
    }

    fn db_returning(&self) -> bool {
        true
    }

    fn to_python(&self, value: Value) -> OrmResult<Value> {
        self.base.to_python(value)
    }

    fn get_prep_value(&self, value: Value) -> OrmResult<PrepValue> {
        match self.base.get_prep_value(value)? {
            PrepValue::Value(Value::Null) => {
                tracing::trace!(field = %self.options().name, "no value, using database default");
                Ok(PrepValue::DatabaseDefault)
            }
            prepared => Ok(prepared),
        }
    }

    fn validate(&self, value: &Value) -> OrmResult<()> {
        self.base.validate(value)
    }

    fn check(&self) -> Vec<CheckMessage> {
        let mut messages = self.base.check();
        messages.extend(self.check_null());
        messages.extend(self.check_default());
        messages
    }

    fn deconstruct(&self) -> Deconstructed {
        let mut record = self.base.deconstruct();
        record.path = field_path(F::SERIAL_INTERNAL_TYPE);
        record.kwargs.remove("blank");
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseBackendType;
    use crate::value::FieldDefault;
    use pgserial_core::CheckLevel;

    fn ids(messages: &[CheckMessage]) -> Vec<&str> {
        messages.iter().filter_map(|m| m.id.as_deref()).collect()
    }

    fn every_width(options: &FieldOptions) -> Vec<Box<dyn NumericField>> {
        vec![
            Box::new(SmallSerialField::new(options.clone())),
            Box::new(SerialField::new(options.clone())),
            Box::new(BigSerialField::new(options.clone())),
        ]
    }

    #[test]
    fn test_variant_type_names() {
        let conn = Connection::postgres();
        let small = SmallSerialField::new(FieldOptions::new("a"));
        let normal = SerialField::new(FieldOptions::new("b"));
        let big = BigSerialField::new(FieldOptions::new("c"));
        assert_eq!(small.internal_type(), "SmallSerialField");
        assert_eq!(normal.internal_type(), "SerialField");
        assert_eq!(big.internal_type(), "BigSerialField");
        assert_eq!(small.db_type(&conn), "smallserial");
        assert_eq!(normal.db_type(&conn), "serial");
        assert_eq!(big.db_type(&conn), "bigserial");
    }

    #[test]
    fn test_db_type_on_other_vendors_is_unchanged() {
        let mysql = Connection::new("legacy", DatabaseBackendType::MySQL);
        assert_eq!(SerialField::default().db_type(&mysql), "serial");
    }

    #[test]
    fn test_construction_forces_blank_and_comment() {
        let f = SerialField::new(
            FieldOptions::new("number")
                .blank(false)
                .db_comment("order number"),
        );
        assert!(f.options().blank);
        assert_eq!(f.db_comment(), Some(SERIAL_DB_COMMENT));
        assert_eq!(f.base().internal_type(), "IntegerField");
    }

    #[test]
    fn test_construction_keeps_other_options() {
        let f = BigSerialField::new(
            FieldOptions::new("id")
                .model("shop.Order")
                .primary_key()
                .column("order_id"),
        );
        assert!(f.options().primary_key);
        assert_eq!(f.column(), "order_id");
        assert_eq!(f.options().label(), "shop.Order.id");
    }

    #[test]
    fn test_check_clean_declaration() {
        assert!(BigSerialField::default().check().is_empty());
        assert!(SmallSerialField::new(FieldOptions::new("seq")).check().is_empty());
    }

    #[test]
    fn test_check_nullable() {
        let options = FieldOptions::new("number").model("shop.Order").nullable();
        for f in every_width(&options) {
            let messages = f.check();
            assert_eq!(ids(&messages), vec!["fields.E013"], "{}", f.internal_type());
            assert_eq!(messages[0].level, CheckLevel::Error);
            assert_eq!(messages[0].msg, "SerialFields do not accept null values.");
            assert_eq!(messages[0].obj.as_deref(), Some("shop.Order.number"));
        }
    }

    #[test]
    fn test_check_default() {
        for f in every_width(&FieldOptions::new("seq").default(1)) {
            let messages = f.check();
            assert_eq!(ids(&messages), vec!["fields.E014"], "{}", f.internal_type());
            assert_eq!(messages[0].level, CheckLevel::Error);
            assert_eq!(messages[0].msg, "SerialFields do not accept default values.");
        }
    }

    #[test]
    fn test_description_and_returning() {
        let descriptions: Vec<&str> = every_width(&FieldOptions::new("id"))
            .iter()
            .map(|f| f.description())
            .collect();
        assert_eq!(descriptions, vec!["Small serial", "Serial", "Big serial"]);
        assert!(every_width(&FieldOptions::new("id"))
            .iter()
            .all(|f| f.db_returning()));
        assert!(!SerialField::default().base().db_returning());
    }

    #[test]
    fn test_check_explicit_null_default() {
        let f = SerialField::new(FieldOptions::new("seq").default(Value::Null));
        assert_eq!(f.options().default, FieldDefault::Null);
        assert_eq!(ids(&f.check()), vec!["fields.E014"]);
    }

    #[test]
    fn test_check_combines_base_and_serial() {
        let f = BigSerialField::new(
            FieldOptions::new("id_")
                .primary_key()
                .nullable()
                .default(7),
        );
        assert_eq!(
            ids(&f.check()),
            vec!["fields.E001", "fields.E007", "fields.E013", "fields.E014"]
        );
    }

    #[test]
    fn test_misconfigured_field_is_still_usable() {
        let f = SerialField::new(FieldOptions::new("n").nullable().default(3));
        assert_eq!(f.get_prep_value(Value::Null).unwrap(), PrepValue::DatabaseDefault);
        assert_eq!(f.db_type(&Connection::postgres()), "serial");
    }

    #[test]
    fn test_get_prep_value() {
        let f = SerialField::default();
        assert_eq!(f.get_prep_value(Value::Null).unwrap(), PrepValue::DatabaseDefault);
        assert_eq!(
            f.get_prep_value(Value::Int(42)).unwrap(),
            PrepValue::Value(Value::Int(42))
        );
        assert_eq!(
            f.get_prep_value(Value::String("42".into())).unwrap(),
            PrepValue::Value(Value::Int(42))
        );
        assert!(f.get_prep_value(Value::String("forty-two".into())).is_err());
    }

    #[test]
    fn test_validate_delegates_to_width() {
        let f = SmallSerialField::default();
        assert!(f.validate(&Value::Int(100)).is_ok());
        assert!(f.validate(&Value::Int(100_000)).is_err());
    }

    #[test]
    fn test_deconstruct_drops_blank_keeps_comment() {
        let record = SerialField::new(FieldOptions::new("number")).deconstruct();
        assert_eq!(record.name, "number");
        assert_eq!(record.path, "pgserial_db.fields.SerialField");
        assert!(!record.kwargs.contains_key("blank"));
        assert_eq!(record.kwargs["db_comment"], serde_json::json!(SERIAL_DB_COMMENT));
        assert_eq!(record.kwargs.len(), 1);
    }

    #[test]
    fn test_deconstruct_roundtrip() {
        let original = BigSerialField::new(FieldOptions::new("id").primary_key());
        let rebuilt = BigSerialField::from_deconstructed(&original.deconstruct()).unwrap();
        assert_eq!(rebuilt, original);
        assert!(rebuilt.options().blank);
        assert_eq!(rebuilt.db_comment(), Some(SERIAL_DB_COMMENT));
    }

    #[test]
    fn test_from_deconstructed_wrong_width() {
        let record = SmallSerialField::default().deconstruct();
        assert!(SerialField::from_deconstructed(&record).is_err());
    }
}
