//! Reconstructable field declarations.
//!
//! Migration tooling compares fields by their [`Deconstructed`] form: a
//! field name, an import path naming the field type, and the keyword
//! options that differ from their defaults. A record can be turned back into
//! an equivalent field with [`reconstruct`] or with the typed
//! `from_deconstructed` constructors.

use std::collections::BTreeMap;

use pgserial_core::{OrmError, OrmResult};
use serde::{Deserialize, Serialize};

use super::{
    BigIntegerField, BigSerialField, FieldOptions, IntegerField, NumericField, SerialField,
    SmallIntegerField, SmallSerialField,
};
use crate::value::{FieldDefault, Value};

/// Module path prefix used in [`Deconstructed::path`].
pub const FIELD_PATH_PREFIX: &str = "pgserial_db.fields";

/// A field declaration in reconstructable form.
///
/// # Examples
///
/// ```
/// use pgserial_db::fields::{BigSerialField, FieldOptions, NumericField};
///
/// let record = BigSerialField::new(FieldOptions::new("id")).deconstruct();
/// assert_eq!(record.path, "pgserial_db.fields.BigSerialField");
/// assert!(!record.kwargs.contains_key("blank"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deconstructed {
    /// The field name.
    pub name: String,
    /// The import path of the field type.
    pub path: String,
    /// Options that differ from their defaults.
    pub kwargs: BTreeMap<String, serde_json::Value>,
}

impl Deconstructed {
    /// Returns the type tag at the end of [`path`](Self::path).
    pub fn internal_type(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

/// Returns the import path for a field type tag.
pub fn field_path(internal_type: &str) -> String {
    format!("{FIELD_PATH_PREFIX}.{internal_type}")
}

pub(crate) fn expect_path(record: &Deconstructed, internal_type: &str) -> OrmResult<()> {
    if record.path == field_path(internal_type) {
        Ok(())
    } else {
        Err(OrmError::SerializationError(format!(
            "Cannot rebuild a {internal_type} from '{}'.",
            record.path
        )))
    }
}

/// Rebuilds any known field type from its deconstructed record.
///
/// # Errors
///
/// Fails for unknown paths and malformed options.
pub fn reconstruct(record: &Deconstructed) -> OrmResult<Box<dyn NumericField>> {
    let field: Box<dyn NumericField> = match record.internal_type() {
        "SmallIntegerField" => Box::new(SmallIntegerField::from_deconstructed(record)?),
        "IntegerField" => Box::new(IntegerField::from_deconstructed(record)?),
        "BigIntegerField" => Box::new(BigIntegerField::from_deconstructed(record)?),
        "SmallSerialField" => Box::new(SmallSerialField::from_deconstructed(record)?),
        "SerialField" => Box::new(SerialField::from_deconstructed(record)?),
        "BigSerialField" => Box::new(BigSerialField::from_deconstructed(record)?),
        other => {
            return Err(OrmError::SerializationError(format!(
                "Unknown field type '{other}' in '{}'.",
                record.path
            )))
        }
    };
    Ok(field)
}

impl FieldOptions {
    /// Returns the options that differ from their defaults, keyed by name.
    pub fn to_kwargs(&self) -> BTreeMap<String, serde_json::Value> {
        use serde_json::Value as Json;

        let mut kwargs = BTreeMap::new();
        if let Some(column) = &self.db_column {
            kwargs.insert("db_column".to_string(), Json::from(column.as_str()));
        }
        for (key, set) in [
            ("null", self.null),
            ("blank", self.blank),
            ("primary_key", self.primary_key),
            ("unique", self.unique),
            ("db_index", self.db_index),
        ] {
            if set {
                kwargs.insert(key.to_string(), Json::Bool(true));
            }
        }
        match &self.default {
            FieldDefault::NotProvided => {}
            FieldDefault::Null => {
                kwargs.insert("default".to_string(), Json::Null);
            }
            FieldDefault::Value(v) => {
                kwargs.insert(
                    "default".to_string(),
                    serde_json::to_value(v).unwrap_or_default(),
                );
            }
        }
        if let Some(comment) = &self.db_comment {
            kwargs.insert("db_comment".to_string(), Json::from(comment.as_str()));
        }
        if let Some(max_length) = self.max_length {
            kwargs.insert("max_length".to_string(), Json::from(max_length));
        }
        if let Some(verbose_name) = &self.verbose_name {
            kwargs.insert("verbose_name".to_string(), Json::from(verbose_name.as_str()));
        }
        if !self.help_text.is_empty() {
            kwargs.insert("help_text".to_string(), Json::from(self.help_text.as_str()));
        }
        if !self.editable {
            kwargs.insert("editable".to_string(), Json::Bool(false));
        }
        kwargs
    }

    /// Builds options from a name and the keyword options of a record.
    ///
    /// # Errors
    ///
    /// Fails on unknown keys and values of the wrong type.
    pub fn from_kwargs(
        name: &str,
        kwargs: &BTreeMap<String, serde_json::Value>,
    ) -> OrmResult<Self> {
        let mut options = Self::new(name);
        for (key, value) in kwargs {
            match key.as_str() {
                "db_column" => options.db_column = Some(string_kwarg(key, value)?),
                "null" => options.null = bool_kwarg(key, value)?,
                "blank" => options.blank = bool_kwarg(key, value)?,
                "primary_key" => options.primary_key = bool_kwarg(key, value)?,
                "unique" => options.unique = bool_kwarg(key, value)?,
                "db_index" => options.db_index = bool_kwarg(key, value)?,
                "editable" => options.editable = bool_kwarg(key, value)?,
                "default" => {
                    options.default = if value.is_null() {
                        FieldDefault::Null
                    } else {
                        let v: Value = serde_json::from_value(value.clone())
                            .map_err(|e| bad_kwarg(key, &e.to_string()))?;
                        FieldDefault::from(v)
                    };
                }
                "db_comment" => options.db_comment = Some(string_kwarg(key, value)?),
                "max_length" => {
                    let n = value
                        .as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| bad_kwarg(key, "expected a non-negative integer"))?;
                    options.max_length = Some(n);
                }
                "verbose_name" => options.verbose_name = Some(string_kwarg(key, value)?),
                "help_text" => options.help_text = string_kwarg(key, value)?,
                _ => {
                    return Err(OrmError::SerializationError(format!(
                        "Unexpected keyword argument '{key}'."
                    )))
                }
            }
        }
        Ok(options)
    }
}

fn bad_kwarg(key: &str, reason: &str) -> OrmError {
    OrmError::SerializationError(format!("Invalid value for '{key}': {reason}"))
}

fn bool_kwarg(key: &str, value: &serde_json::Value) -> OrmResult<bool> {
    value.as_bool().ok_or_else(|| bad_kwarg(key, "expected a boolean"))
}

fn string_kwarg(key: &str, value: &serde_json::Value) -> OrmResult<String> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| bad_kwarg(key, "expected a string"))
}
