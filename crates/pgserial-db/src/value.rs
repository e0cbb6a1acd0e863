//! Value types exchanged between fields and the database layer.
//!
//! - [`Value`] is the backend-agnostic representation of a field value or
//!   query parameter.
//! - [`PrepValue`] is what a field hands to a write query after preparation:
//!   either a concrete value or the marker asking the database to compute
//!   the column's own default.
//! - [`FieldDefault`] records whether a field declared a default at all,
//!   keeping "no default" distinct from "default is NULL".

use std::fmt;

/// A backend-agnostic representation of a database value.
///
/// # Examples
///
/// ```
/// use pgserial_db::value::Value;
///
/// let v = Value::from(42_i64);
/// assert_eq!(v, Value::Int(42));
///
/// let v = Value::from(None::<i32>);
/// assert!(v.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// SQL NULL.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number. Non-finite values serialize as
    /// `"NaN"`, `"inf"` or `"-inf"`.
    Float(#[serde(with = "float_repr")] f64),
    /// A UTF-8 string.
    String(String),
    /// A JSON value.
    Json(serde_json::Value),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Json(j) => write!(f, "{j}"),
        }
    }
}

/// Float (de)serialization that keeps NaN and the infinities, which JSON
/// numbers cannot represent.
mod float_repr {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::custom(format!("invalid float '{other}'"))),
            },
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl Value {
    /// Returns `true` if this value is `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract an integer value.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value the way it appears in error messages: strings are
    /// quoted, everything else uses its display form.
    pub fn repr(&self) -> String {
        match self {
            Self::String(s) => format!("'{s}'"),
            Self::Null => "None".to_string(),
            other => other.to_string(),
        }
    }
}

/// A value prepared for a write query.
///
/// [`DatabaseDefault`](PrepValue::DatabaseDefault) tells the query compiler
/// to leave the column to the database, so a sequence-backed default fires.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepValue {
    /// A concrete value sent as a query parameter.
    Value(Value),
    /// Let the database compute the column's default.
    DatabaseDefault,
}

impl PrepValue {
    /// Returns `true` for the database-default marker.
    pub const fn is_database_default(&self) -> bool {
        matches!(self, Self::DatabaseDefault)
    }

    /// Returns the concrete value, if any.
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::DatabaseDefault => None,
        }
    }
}

impl From<Value> for PrepValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

/// The default declared on a field.
///
/// # Examples
///
/// ```
/// use pgserial_db::value::{FieldDefault, Value};
///
/// assert!(!FieldDefault::NotProvided.is_provided());
/// assert!(FieldDefault::Null.is_provided());
/// assert_eq!(FieldDefault::from(Value::Null), FieldDefault::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FieldDefault {
    /// No default was declared.
    #[default]
    NotProvided,
    /// The default is explicitly NULL.
    Null,
    /// The default is a concrete value.
    Value(Value),
}

impl FieldDefault {
    /// Returns `true` when a default was declared, including an explicit NULL.
    pub const fn is_provided(&self) -> bool {
        !matches!(self, Self::NotProvided)
    }

    /// Returns the declared default as a value, if one was declared.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::NotProvided => None,
            Self::Null => Some(Value::Null),
            Self::Value(v) => Some(v.clone()),
        }
    }
}

impl From<Value> for FieldDefault {
    fn from(v: Value) -> Self {
        if v.is_null() {
            Self::Null
        } else {
            Self::Value(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_integers() {
        assert_eq!(Value::from(42_i16), Value::Int(42));
        assert_eq!(Value::from(42_i32), Value::Int(42));
        assert_eq!(Value::from(42_i64), Value::Int(42));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(Some(7_i64)), Value::Int(7));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Json(serde_json::json!([1])).to_string(), "[1]");
    }

    #[test]
    fn test_repr() {
        assert_eq!(Value::String("abc".into()).repr(), "'abc'");
        assert_eq!(Value::Null.repr(), "None");
        assert_eq!(Value::Float(1.5).repr(), "1.5");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn test_prep_value() {
        assert!(PrepValue::DatabaseDefault.is_database_default());
        assert_eq!(PrepValue::DatabaseDefault.as_value(), None);
        let p = PrepValue::from(Value::Int(3));
        assert!(!p.is_database_default());
        assert_eq!(p.as_value(), Some(&Value::Int(3)));
    }

    #[test]
    fn test_field_default_states() {
        assert_eq!(FieldDefault::default(), FieldDefault::NotProvided);
        assert_eq!(FieldDefault::NotProvided.to_value(), None);
        assert_eq!(FieldDefault::Null.to_value(), Some(Value::Null));
        assert_eq!(
            FieldDefault::from(Value::Int(5)),
            FieldDefault::Value(Value::Int(5))
        );
        assert!(FieldDefault::Value(Value::Int(0)).is_provided());
    }

    #[test]
    fn test_field_default_serde() {
        let json = serde_json::to_value(FieldDefault::Value(Value::Int(9))).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Value", "value": {"type": "Int", "value": 9}}));
        let back: FieldDefault = serde_json::from_value(json).unwrap();
        assert_eq!(back, FieldDefault::Value(Value::Int(9)));
    }

    #[test]
    fn test_non_finite_float_serde() {
        let json = serde_json::to_value(Value::Float(f64::NAN)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "Float", "value": "NaN"}));
        let back: Value = serde_json::from_value(json).unwrap();
        assert!(matches!(back, Value::Float(f) if f.is_nan()));

        for (value, text) in [(f64::INFINITY, "inf"), (f64::NEG_INFINITY, "-inf")] {
            let json = serde_json::to_value(Value::Float(value)).unwrap();
            assert_eq!(json["value"], serde_json::json!(text));
            assert_eq!(serde_json::from_value::<Value>(json).unwrap(), Value::Float(value));
        }

        let finite = serde_json::to_value(Value::Float(1.5)).unwrap();
        assert_eq!(finite["value"], serde_json::json!(1.5));
        let bad = serde_json::json!({"type": "Float", "value": "lots"});
        assert!(serde_json::from_value::<Value>(bad).is_err());
    }
}
