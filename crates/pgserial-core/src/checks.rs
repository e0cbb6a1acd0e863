//! Diagnostic types for the system check framework.
//!
//! Field declarations report configuration problems through
//! [`CheckMessage`]s rather than failing at construction time. The messages
//! mirror Django's `django.core.checks` types: a severity level, a message,
//! an optional hint, the object the issue relates to, and a stable identifier
//! such as `fields.E013`.
//!
//! ## Examples
//!
//! ```
//! use pgserial_core::checks::{CheckLevel, CheckMessage};
//!
//! let msg = CheckMessage::error(
//!     "SerialFields do not accept null values.",
//!     None,
//!     Some("shop.Order.number"),
//!     Some("fields.E013"),
//! );
//! assert_eq!(msg.level, CheckLevel::Error);
//! assert!(msg.is_serious());
//! ```

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Debugging information.
    Debug = 0,
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem that should be fixed.
    Error = 3,
    /// A critical error that prevents the application from running.
    Critical = 4,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A diagnostic message produced by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The object (model field, setting, ...) that has the issue.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "fields.E013").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates a debug-level message.
    pub fn debug(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Debug, msg, hint, obj, id)
    }

    /// Creates an info-level message.
    pub fn info(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Info, msg, hint, obj, id)
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// Creates a critical-level message.
    pub fn critical(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Critical, msg, hint, obj, id)
    }

    /// Returns `true` if this is a warning or higher severity.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }

    /// Returns `true` if this message carries the given identifier.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}
