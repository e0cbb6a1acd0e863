//! Core error types for pgserial.
//!
//! [`OrmError`] covers the failures that can happen outside the advisory
//! check pass: value coercion, model validation, field reconstruction from a
//! serialized declaration, and configuration loading.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A validation error raised while cleaning a single field value.
///
/// Mirrors Django's `ValidationError`: a message, a short code identifying the
/// failure (e.g. "min_value"), and optional parameters used in the message.
///
/// # Examples
///
/// ```
/// use pgserial_core::error::ValidationError;
///
/// let err = ValidationError::new("Ensure this value is less than or equal to 32767.", "max_value")
///     .with_param("limit_value", "32767");
/// assert_eq!(err.code, "max_value");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The human-readable error message.
    pub message: String,
    /// A short code identifying the type of validation failure.
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for pgserial.
///
/// Misconfigured fields never produce an `OrmError` at construction time;
/// those are reported by the check pass as [`CheckMessage`](crate::checks::CheckMessage)s.
#[derive(Error, Debug)]
pub enum OrmError {
    // ── Values ───────────────────────────────────────────────────────

    /// A value could not be coerced to the type a field expects.
    #[error("{0}")]
    InvalidValue(String),

    /// A value failed field validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The ORM is improperly configured (unknown database alias, engine, ...).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Serialization ────────────────────────────────────────────────

    /// A field declaration could not be serialized or reconstructed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OrmError {
    /// Returns the validation code when this is a validation failure.
    pub fn validation_code(&self) -> Option<&str> {
        match self {
            Self::ValidationError(err) => Some(&err.code),
            _ => None,
        }
    }
}

impl From<ValidationError> for OrmError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

/// A convenience type alias for `Result<T, OrmError>`.
pub type OrmResult<T> = Result<T, OrmError>;
