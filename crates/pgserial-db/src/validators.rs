//! Field validators.
//!
//! Integer fields attach a [`MinValueValidator`] and a [`MaxValueValidator`]
//! derived from their width, so a value that cannot fit the column is
//! rejected during model validation instead of by the database.

use std::fmt;

use pgserial_core::{OrmError, ValidationError};

use crate::value::Value;

/// A trait for validating field values.
///
/// # Examples
///
/// ```
/// use pgserial_db::validators::{MaxValueValidator, Validator};
/// use pgserial_db::value::Value;
///
/// let v = MaxValueValidator::new(32_767);
/// assert!(v.validate(&Value::Int(10)).is_ok());
/// assert!(v.validate(&Value::Int(40_000)).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &Value) -> Result<(), OrmError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;
}

/// Validates that an integer value does not exceed a maximum.
#[derive(Debug, Clone, Copy)]
pub struct MaxValueValidator {
    /// The maximum allowed value.
    pub limit_value: i64,
}

impl MaxValueValidator {
    /// Creates a new `MaxValueValidator` with the given maximum.
    pub const fn new(limit_value: i64) -> Self {
        Self { limit_value }
    }
}

impl Validator for MaxValueValidator {
    fn validate(&self, value: &Value) -> Result<(), OrmError> {
        match value.as_int() {
            Some(n) if n > self.limit_value => Err(ValidationError::new(
                format!(
                    "Ensure this value is less than or equal to {}.",
                    self.limit_value
                ),
                "max_value",
            )
            .with_param("limit_value", self.limit_value.to_string())
            .into()),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "MaxValueValidator"
    }
}

/// Validates that an integer value is not below a minimum.
#[derive(Debug, Clone, Copy)]
pub struct MinValueValidator {
    /// The minimum allowed value.
    pub limit_value: i64,
}

impl MinValueValidator {
    /// Creates a new `MinValueValidator` with the given minimum.
    pub const fn new(limit_value: i64) -> Self {
        Self { limit_value }
    }
}

impl Validator for MinValueValidator {
    fn validate(&self, value: &Value) -> Result<(), OrmError> {
        match value.as_int() {
            Some(n) if n < self.limit_value => Err(ValidationError::new(
                format!(
                    "Ensure this value is greater than or equal to {}.",
                    self.limit_value
                ),
                "min_value",
            )
            .with_param("limit_value", self.limit_value.to_string())
            .into()),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "MinValueValidator"
    }
}
