//! Options shared by every field.

use crate::value::{FieldDefault, Value};

/// The declaration options of a model field.
///
/// This captures what Django accepts in a field's `__init__`. Options are
/// set with chained builder methods; anything not set keeps Django's default
/// (not null, not blank, no default, editable).
///
/// # Examples
///
/// ```
/// use pgserial_db::fields::FieldOptions;
///
/// let opts = FieldOptions::new("order_number")
///     .model("shop.Order")
///     .column("number")
///     .unique();
/// assert_eq!(opts.column_name(), "number");
/// assert_eq!(opts.label(), "shop.Order.order_number");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOptions {
    /// The attribute name of this field.
    pub name: String,
    /// The label of the model declaring the field (e.g. "shop.Order").
    pub model: Option<String>,
    /// An explicit database column name.
    pub db_column: Option<String>,
    /// Whether NULL is allowed in the database.
    pub null: bool,
    /// Whether empty values are allowed during validation.
    pub blank: bool,
    /// The declared default.
    pub default: FieldDefault,
    /// A comment stored in the database catalog for the column.
    pub db_comment: Option<String>,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Whether a UNIQUE constraint is applied.
    pub unique: bool,
    /// Whether a database index should be created.
    pub db_index: bool,
    /// Maximum length. Meaningless for integer fields (see `fields.W122`).
    pub max_length: Option<usize>,
    /// Human-readable name for the field.
    pub verbose_name: Option<String>,
    /// Human-readable help text.
    pub help_text: String,
    /// Whether the field is editable in forms.
    pub editable: bool,
}

impl FieldOptions {
    /// Creates options for a field with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            db_column: None,
            null: false,
            blank: false,
            default: FieldDefault::NotProvided,
            db_comment: None,
            primary_key: false,
            unique: false,
            db_index: false,
            max_length: None,
            verbose_name: None,
            help_text: String::new(),
            editable: true,
        }
    }

    /// Sets the label of the declaring model.
    #[must_use]
    pub fn model(mut self, label: impl Into<String>) -> Self {
        self.model = Some(label.into());
        self
    }

    /// Sets the database column name.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.db_column = Some(column.into());
        self
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Sets whether empty values are allowed.
    #[must_use]
    pub const fn blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    /// Sets the default value. `Value::Null` declares an explicit NULL default.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = FieldDefault::from(value.into());
        self
    }

    /// Sets the database column comment.
    #[must_use]
    pub fn db_comment(mut self, comment: impl Into<String>) -> Self {
        self.db_comment = Some(comment.into());
        self
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks this field as having a UNIQUE constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks this field as having a database index.
    #[must_use]
    pub const fn db_index(mut self) -> Self {
        self.db_index = true;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the verbose (human-readable) name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = Some(name.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets whether the field is editable.
    #[must_use]
    pub const fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Returns the database column name (the field name unless overridden).
    pub fn column_name(&self) -> &str {
        self.db_column.as_deref().unwrap_or(&self.name)
    }

    /// Returns the label used to identify the field in diagnostics.
    pub fn label(&self) -> String {
        match &self.model {
            Some(model) => format!("{model}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
