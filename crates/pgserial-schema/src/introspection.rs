//! Recognizing serial columns in an existing database.
//!
//! PostgreSQL does not remember that a column was declared `serial`: once
//! created it is an `integer` with a `nextval(...)` default. Columns created
//! by a serial field carry [`SERIAL_DB_COMMENT`] as their comment, which is
//! what lets [`recognize`] report them as serial fields again instead of
//! legacy auto fields.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use pgserial_core::OrmResult;
use pgserial_db::fields::deconstruct::field_path;
use pgserial_db::fields::{reconstruct, Deconstructed, NumericField, SERIAL_DB_COMMENT};

/// A column descriptor produced by database introspection.
#[derive(Debug, Clone, Default)]
pub struct ColumnInfo {
    /// The column name.
    pub name: String,
    /// The SQL data type (e.g. "integer", "bigint").
    pub data_type: String,
    /// Whether the column allows NULL values.
    pub nullable: bool,
    /// Whether this column is a primary key.
    pub primary_key: bool,
    /// The column default expression, if any.
    pub default: Option<String>,
    /// The column comment, if any.
    pub comment: Option<String>,
}

/// A table descriptor produced by database introspection.
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// The table name.
    pub name: String,
    /// The columns in this table.
    pub columns: Vec<ColumnInfo>,
}

/// The field a column maps back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedField {
    /// The column name.
    pub name: String,
    /// The field type name (e.g. "BigSerialField", "AutoField").
    pub field_type: &'static str,
    /// Whether the column allows NULL values.
    pub nullable: bool,
    /// Whether this column is a primary key.
    pub primary_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    Small,
    Normal,
    Big,
}

impl Width {
    fn from_data_type(data_type: &str) -> Option<Self> {
        match data_type.trim().to_lowercase().as_str() {
            "smallint" | "int2" => Some(Self::Small),
            "integer" | "int" | "int4" => Some(Self::Normal),
            "bigint" | "int8" => Some(Self::Big),
            _ => None,
        }
    }

    const fn serial(self) -> &'static str {
        match self {
            Self::Small => "SmallSerialField",
            Self::Normal => "SerialField",
            Self::Big => "BigSerialField",
        }
    }

    const fn auto(self) -> &'static str {
        match self {
            Self::Small => "SmallAutoField",
            Self::Normal => "AutoField",
            Self::Big => "BigAutoField",
        }
    }

    const fn plain(self) -> &'static str {
        match self {
            Self::Small => "SmallIntegerField",
            Self::Normal => "IntegerField",
            Self::Big => "BigIntegerField",
        }
    }
}

fn has_sequence_default(column: &ColumnInfo) -> bool {
    column
        .default
        .as_deref()
        .is_some_and(|default| default.trim_start().starts_with("nextval("))
}

/// Maps an introspected column to the field type that would produce it.
///
/// Returns `None` for non-integer columns.
///
/// # Examples
///
/// ```
/// use pgserial_schema::introspection::{recognize, ColumnInfo};
///
/// let column = ColumnInfo {
///     name: "id".into(),
///     data_type: "bigint".into(),
///     default: Some("nextval('shop_order_id_seq'::regclass)".into()),
///     comment: Some("38UIvRvC6xSOihIy4idv".into()),
///     ..ColumnInfo::default()
/// };
/// assert_eq!(recognize(&column).unwrap().field_type, "BigSerialField");
/// ```
pub fn recognize(column: &ColumnInfo) -> Option<IntrospectedField> {
    let width = Width::from_data_type(&column.data_type)?;
    let field_type = if column.comment.as_deref() == Some(SERIAL_DB_COMMENT) {
        width.serial()
    } else if has_sequence_default(column) {
        width.auto()
    } else {
        width.plain()
    };
    tracing::trace!(column = %column.name, data_type = %column.data_type, field_type, "recognized column");
    Some(IntrospectedField {
        name: column.name.clone(),
        field_type,
        nullable: column.nullable,
        primary_key: column.primary_key,
    })
}

/// Recognizes every numeric column of a table, in column order.
pub fn inspect_table(table: &TableInfo) -> Vec<IntrospectedField> {
    let fields: Vec<IntrospectedField> = table.columns.iter().filter_map(recognize).collect();
    tracing::debug!(
        table = %table.name,
        columns = table.columns.len(),
        recognized = fields.len(),
        "inspected table"
    );
    fields
}

impl IntrospectedField {
    /// Returns `true` if the column was created by a serial field.
    pub fn is_serial(&self) -> bool {
        self.field_type.ends_with("SerialField")
    }

    /// Returns the deconstructed form of the field this column maps to.
    pub fn to_deconstructed(&self) -> Deconstructed {
        let mut kwargs = BTreeMap::new();
        if self.nullable {
            kwargs.insert("null".to_string(), serde_json::Value::Bool(true));
        }
        if self.primary_key {
            kwargs.insert("primary_key".to_string(), serde_json::Value::Bool(true));
        }
        Deconstructed {
            name: self.name.clone(),
            path: field_path(self.field_type),
            kwargs,
        }
    }

    /// Builds the field this column maps to.
    ///
    /// # Errors
    ///
    /// Fails for field types this crate does not provide, such as the legacy
    /// auto fields.
    pub fn to_field(&self) -> OrmResult<Box<dyn NumericField>> {
        reconstruct(&self.to_deconstructed())
    }
}

/// Generates field declarations for the numeric columns of a table.
pub fn generate_field_code(table: &TableInfo) -> String {
    let mut code = String::new();
    let _ = writeln!(code, "// Numeric fields of the `{}` table.", table.name);
    for field in inspect_table(table) {
        let mut options = format!("FieldOptions::new(\"{}\")", field.name);
        if field.primary_key {
            options.push_str(".primary_key()");
        }
        if field.nullable {
            options.push_str(".nullable()");
        }
        let _ = writeln!(
            code,
            "let {} = {}::new({options});",
            field.name, field.field_type
        );
    }
    code
}
