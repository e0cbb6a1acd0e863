//! Integer fields of the three signed widths.
//!
//! [`IntField`] is generic over an [`IntegerWidth`] marker, which fixes the
//! value range, the type tag and the column type at compile time. Use the
//! aliases [`SmallIntegerField`], [`IntegerField`] and [`BigIntegerField`].

use std::marker::PhantomData;

use pgserial_core::{CheckMessage, OrmError, OrmResult, ValidationError};

use super::deconstruct::{expect_path, field_path, Deconstructed};
use super::{FieldOptions, NumericField};
use crate::connection::Connection;
use crate::validators::{MaxValueValidator, MinValueValidator, Validator};
use crate::value::{PrepValue, Value};

/// Compile-time description of an integer column width.
pub trait IntegerWidth: Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Smallest storable value.
    const MIN: i64;
    /// Largest storable value.
    const MAX: i64;
    /// The type tag of the plain integer field.
    const INTERNAL_TYPE: &'static str;
    /// The column type of the plain integer field.
    const DB_TYPE: &'static str;
    /// Human-readable description of the plain integer field.
    const DESCRIPTION: &'static str;
}

/// 16-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Small;

/// 32-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normal;

/// 64-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Big;

impl IntegerWidth for Small {
    const MIN: i64 = i16::MIN as i64;
    const MAX: i64 = i16::MAX as i64;
    const INTERNAL_TYPE: &'static str = "SmallIntegerField";
    const DB_TYPE: &'static str = "smallint";
    const DESCRIPTION: &'static str = "Small integer";
}

impl IntegerWidth for Normal {
    const MIN: i64 = i32::MIN as i64;
    const MAX: i64 = i32::MAX as i64;
    const INTERNAL_TYPE: &'static str = "IntegerField";
    const DB_TYPE: &'static str = "integer";
    const DESCRIPTION: &'static str = "Integer";
}

impl IntegerWidth for Big {
    const MIN: i64 = i64::MIN;
    const MAX: i64 = i64::MAX;
    const INTERNAL_TYPE: &'static str = "BigIntegerField";
    const DB_TYPE: &'static str = "bigint";
    const DESCRIPTION: &'static str = "Big (8 byte) integer";
}

/// An integer field of width `W`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntField<W: IntegerWidth> {
    options: FieldOptions,
    width: PhantomData<W>,
}

/// A 16-bit integer field.
pub type SmallIntegerField = IntField<Small>;
/// A 32-bit integer field.
pub type IntegerField = IntField<Normal>;
/// A 64-bit integer field.
pub type BigIntegerField = IntField<Big>;

impl<W: IntegerWidth> IntField<W> {
    /// Creates an integer field from its options.
    pub const fn new(options: FieldOptions) -> Self {
        Self {
            options,
            width: PhantomData,
        }
    }

    /// Rebuilds a field from a [`Deconstructed`] record.
    ///
    /// # Errors
    ///
    /// Fails if the record describes another field type or carries
    /// malformed options.
    pub fn from_deconstructed(record: &Deconstructed) -> OrmResult<Self> {
        expect_path(record, W::INTERNAL_TYPE)?;
        Ok(Self::new(FieldOptions::from_kwargs(&record.name, &record.kwargs)?))
    }

    /// Returns the validators implied by the width.
    pub const fn validators() -> (MinValueValidator, MaxValueValidator) {
        (MinValueValidator::new(W::MIN), MaxValueValidator::new(W::MAX))
    }

    fn invalid(&self, value: &Value) -> OrmError {
        OrmError::InvalidValue(format!(
            "Field '{}' expected a number but got {}.",
            self.options.name,
            value.repr()
        ))
    }

    fn check_field_name(&self) -> Option<CheckMessage> {
        let name = &self.options.name;
        let obj = self.options.label();
        if name.ends_with('_') {
            Some(CheckMessage::error(
                "Field names must not end with an underscore.",
                None,
                Some(&obj),
                Some("fields.E001"),
            ))
        } else if name.contains("__") {
            Some(CheckMessage::error(
                "Field names must not contain \"__\".",
                None,
                Some(&obj),
                Some("fields.E002"),
            ))
        } else if name == "pk" {
            Some(CheckMessage::error(
                "'pk' is a reserved word that cannot be used as a field name.",
                None,
                Some(&obj),
                Some("fields.E003"),
            ))
        } else {
            None
        }
    }

    fn check_null_allowed_for_primary_key(&self) -> Option<CheckMessage> {
        (self.options.primary_key && self.options.null).then(|| {
            CheckMessage::error(
                "Primary keys must not have null=True.",
                Some("Set null=False on the field, or remove primary_key=True argument."),
                Some(&self.options.label()),
                Some("fields.E007"),
            )
        })
    }

    fn check_max_length_warning(&self) -> Option<CheckMessage> {
        self.options.max_length.map(|_| {
            CheckMessage::warning(
                format!("'max_length' is ignored when used with {}.", W::INTERNAL_TYPE),
                Some("Remove 'max_length' from field"),
                Some(&self.options.label()),
                Some("fields.W122"),
            )
        })
    }
}

impl<W: IntegerWidth> NumericField for IntField<W> {
    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn internal_type(&self) -> &'static str {
        W::INTERNAL_TYPE
    }

    fn db_type(&self, _connection: &Connection) -> String {
        W::DB_TYPE.to_string()
    }

    fn description(&self) -> &'static str {
        W::DESCRIPTION
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn to_python(&self, value: Value) -> OrmResult<Value> {
        match value {
            Value::Null | Value::Int(_) => Ok(value),
            Value::Bool(b) => Ok(Value::Int(i64::from(b))),
            Value::Float(f) => {
                let truncated = f.trunc();
                if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
                    Ok(Value::Int(truncated as i64))
                } else {
                    Err(self.invalid(&Value::Float(f)))
                }
            }
            Value::String(ref s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.invalid(&value)),
            other => Err(self.invalid(&other)),
        }
    }

    fn get_prep_value(&self, value: Value) -> OrmResult<PrepValue> {
        self.to_python(value).map(PrepValue::Value)
    }

    fn validate(&self, value: &Value) -> OrmResult<()> {
        if value.is_null() {
            if self.options.null {
                return Ok(());
            }
            return Err(ValidationError::new("This field cannot be null.", "null").into());
        }
        let (min, max) = Self::validators();
        min.validate(value)?;
        max.validate(value)
    }

    fn check(&self) -> Vec<CheckMessage> {
        [
            self.check_field_name(),
            self.check_null_allowed_for_primary_key(),
            self.check_max_length_warning(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn deconstruct(&self) -> Deconstructed {
        Deconstructed {
            name: self.options.name.clone(),
            path: field_path(W::INTERNAL_TYPE),
            kwargs: self.options.to_kwargs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseBackendType;
    use pgserial_core::CheckLevel;

    #[test]
    fn test_type_names() {
        let conn = Connection::postgres();
        let small = SmallIntegerField::new(FieldOptions::new("a"));
        let normal = IntegerField::new(FieldOptions::new("b"));
        let big = BigIntegerField::new(FieldOptions::new("c"));
        assert_eq!(small.internal_type(), "SmallIntegerField");
        assert_eq!(normal.internal_type(), "IntegerField");
        assert_eq!(big.internal_type(), "BigIntegerField");
        assert_eq!(small.db_type(&conn), "smallint");
        assert_eq!(normal.db_type(&conn), "integer");
        assert_eq!(big.db_type(&conn), "bigint");
        let sqlite = Connection::new("default", DatabaseBackendType::SQLite);
        assert_eq!(normal.db_type(&sqlite), "integer");
        assert_eq!(small.description(), "Small integer");
        assert_eq!(big.description(), "Big (8 byte) integer");
        assert!(!normal.db_returning());
    }

    #[test]
    fn test_to_python_coercions() {
        let f = IntegerField::new(FieldOptions::new("quantity"));
        assert_eq!(f.to_python(Value::Null).unwrap(), Value::Null);
        assert_eq!(f.to_python(Value::Int(7)).unwrap(), Value::Int(7));
        assert_eq!(f.to_python(Value::Bool(true)).unwrap(), Value::Int(1));
        assert_eq!(f.to_python(Value::Float(3.9)).unwrap(), Value::Int(3));
        assert_eq!(f.to_python(Value::Float(-3.9)).unwrap(), Value::Int(-3));
        assert_eq!(f.to_python(Value::String("  -12 ".into())).unwrap(), Value::Int(-12));
    }

    #[test]
    fn test_to_python_rejects_non_numbers() {
        let f = IntegerField::new(FieldOptions::new("quantity"));
        let err = f.to_python(Value::String("abc".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field 'quantity' expected a number but got 'abc'."
        );
        assert!(f.to_python(Value::Float(f64::NAN)).is_err());
        assert!(f.to_python(Value::Float(1e300)).is_err());
        assert!(f.to_python(Value::Json(serde_json::json!([1]))).is_err());
    }

    #[test]
    fn test_get_prep_value_keeps_null() {
        let f = BigIntegerField::new(FieldOptions::new("total").nullable());
        assert_eq!(f.get_prep_value(Value::Null).unwrap(), PrepValue::Value(Value::Null));
        assert_eq!(
            f.get_prep_value(Value::Int(42)).unwrap(),
            PrepValue::Value(Value::Int(42))
        );
    }

    #[test]
    fn test_validate_ranges() {
        let small = SmallIntegerField::new(FieldOptions::new("a"));
        assert!(small.validate(&Value::Int(32_767)).is_ok());
        assert!(small.validate(&Value::Int(-32_768)).is_ok());
        assert_eq!(
            small.validate(&Value::Int(32_768)).unwrap_err().validation_code(),
            Some("max_value")
        );
        assert_eq!(
            small.validate(&Value::Int(-32_769)).unwrap_err().validation_code(),
            Some("min_value")
        );

        let normal = IntegerField::new(FieldOptions::new("b"));
        assert!(normal.validate(&Value::Int(2_147_483_648)).is_err());
        let big = BigIntegerField::new(FieldOptions::new("c"));
        assert!(big.validate(&Value::Int(i64::MAX)).is_ok());
    }

    #[test]
    fn test_validate_null() {
        let f = IntegerField::new(FieldOptions::new("a"));
        assert_eq!(f.validate(&Value::Null).unwrap_err().validation_code(), Some("null"));
        let f = IntegerField::new(FieldOptions::new("a").nullable());
        assert!(f.validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_check_clean_field() {
        let f = IntegerField::new(FieldOptions::new("quantity").model("shop.Order"));
        assert!(f.check().is_empty());
    }

    #[test]
    fn test_check_field_names() {
        let ids = |name: &str| -> Vec<Option<String>> {
            IntegerField::new(FieldOptions::new(name))
                .check()
                .into_iter()
                .map(|m| m.id)
                .collect()
        };
        assert_eq!(ids("count_"), vec![Some("fields.E001".to_string())]);
        assert_eq!(ids("a__b"), vec![Some("fields.E002".to_string())]);
        assert_eq!(ids("pk"), vec![Some("fields.E003".to_string())]);
    }

    #[test]
    fn test_check_nullable_primary_key() {
        let f = IntegerField::new(FieldOptions::new("id").primary_key().nullable());
        let messages = f.check();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].has_id("fields.E007"));
        assert_eq!(messages[0].level, CheckLevel::Error);
    }

    #[test]
    fn test_check_max_length_ignored() {
        let f = SmallIntegerField::new(FieldOptions::new("rank").max_length(3).model("game.Player"));
        let messages = f.check();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].has_id("fields.W122"));
        assert_eq!(messages[0].level, CheckLevel::Warning);
        assert_eq!(
            messages[0].msg,
            "'max_length' is ignored when used with SmallIntegerField."
        );
        assert_eq!(messages[0].obj.as_deref(), Some("game.Player.rank"));
    }

    #[test]
    fn test_deconstruct_roundtrip() {
        let f = BigIntegerField::new(FieldOptions::new("views").default(0).db_index());
        let record = f.deconstruct();
        assert_eq!(record.path, "pgserial_db.fields.BigIntegerField");
        let rebuilt = BigIntegerField::from_deconstructed(&record).unwrap();
        assert_eq!(rebuilt, f);
        assert!(IntegerField::from_deconstructed(&record).is_err());
    }
}
