//! Schema editor for DDL generation.
//!
//! The [`SchemaEditor`] trait defines the operations a migration needs for
//! numeric columns. [`PostgresSchemaEditor`] generates PostgreSQL DDL, taking
//! each column's type from the field's [`db_type`](NumericField::db_type) and
//! emitting a `COMMENT ON COLUMN` statement for fields that carry a database
//! comment, which is how serial columns stay recognizable after creation.

use pgserial_db::connection::{Connection, DatabaseBackendType};
use pgserial_db::fields::NumericField;
use pgserial_db::value::{FieldDefault, Value};

/// Generates DDL SQL for schema operations.
///
/// Operations return `Vec<String>` because a column with a comment or an
/// index needs more than one statement.
pub trait SchemaEditor: Send + Sync {
    /// Returns the backend type this editor targets.
    fn backend_type(&self) -> DatabaseBackendType;

    /// Generates `CREATE TABLE` DDL followed by comments and indexes.
    fn create_table(&self, table_name: &str, fields: &[&dyn NumericField]) -> Vec<String>;

    /// Generates `DROP TABLE` DDL.
    fn drop_table(&self, table_name: &str) -> Vec<String>;

    /// Generates `ALTER TABLE ... ADD COLUMN` DDL followed by the column
    /// comment and index.
    fn add_column(&self, table_name: &str, field: &dyn NumericField) -> Vec<String>;

    /// Generates `ALTER TABLE ... DROP COLUMN` DDL.
    fn drop_column(&self, table_name: &str, column_name: &str) -> Vec<String>;

    /// Generates `CREATE INDEX` DDL for a field declared with `db_index`.
    fn create_index(&self, table_name: &str, field: &dyn NumericField) -> Vec<String>;

    /// Generates the `COMMENT ON COLUMN` statement, if the field has a comment.
    fn comment_sql(&self, table_name: &str, field: &dyn NumericField) -> Option<String>;

    /// Generates the SQL fragment for a column definition (type, constraints).
    fn column_sql(&self, field: &dyn NumericField) -> String;
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// Generates the default value SQL fragment for a field.
fn default_sql(field: &dyn NumericField) -> String {
    match &field.options().default {
        FieldDefault::NotProvided => String::new(),
        FieldDefault::Null => " DEFAULT NULL".to_string(),
        FieldDefault::Value(value) => match value {
            Value::Null => " DEFAULT NULL".to_string(),
            Value::Bool(b) => format!(" DEFAULT {}", if *b { "TRUE" } else { "FALSE" }),
            Value::Int(i) => format!(" DEFAULT {i}"),
            Value::Float(f) => format!(" DEFAULT {f}"),
            Value::String(s) => format!(" DEFAULT {}", quote_literal(s)),
            _ => String::new(),
        },
    }
}

/// Quotes a string as a SQL literal, doubling embedded single quotes.
fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Returns `true` for column types whose default is owned by a sequence.
fn is_serial_type(db_type: &str) -> bool {
    db_type.ends_with("serial")
}

/// Returns `true` when a field needs a separate index statement.
fn needs_index(field: &dyn NumericField) -> bool {
    let options = field.options();
    options.db_index && !options.unique && !options.primary_key
}

// ── PostgreSQL ───────────────────────────────────────────────────────────

/// Schema editor for PostgreSQL databases.
///
/// # Examples
///
/// ```
/// use pgserial_db::fields::{BigSerialField, FieldOptions};
/// use pgserial_schema::schema_editor::{PostgresSchemaEditor, SchemaEditor};
///
/// let id = BigSerialField::new(FieldOptions::new("id").primary_key());
/// let sql = PostgresSchemaEditor::new().create_table("shop_order", &[&id]);
/// assert_eq!(sql[0], r#"CREATE TABLE "shop_order" ("id" bigserial NOT NULL PRIMARY KEY)"#);
/// assert_eq!(
///     sql[1],
///     r#"COMMENT ON COLUMN "shop_order"."id" IS '38UIvRvC6xSOihIy4idv'"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PostgresSchemaEditor {
    connection: Connection,
}

impl PostgresSchemaEditor {
    /// Creates an editor for the `default` PostgreSQL database.
    pub fn new() -> Self {
        Self {
            connection: Connection::postgres(),
        }
    }

    /// Creates an editor bound to a specific connection.
    pub const fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Returns the connection column types are resolved against.
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    fn trailing_statements(&self, table_name: &str, field: &dyn NumericField) -> Vec<String> {
        let mut statements: Vec<String> = self.comment_sql(table_name, field).into_iter().collect();
        statements.extend(self.create_index(table_name, field));
        statements
    }
}

impl Default for PostgresSchemaEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEditor for PostgresSchemaEditor {
    fn backend_type(&self) -> DatabaseBackendType {
        DatabaseBackendType::PostgreSQL
    }

    fn create_table(&self, table_name: &str, fields: &[&dyn NumericField]) -> Vec<String> {
        let col_defs: Vec<String> = fields
            .iter()
            .map(|field| format!("\"{}\" {}", field.column(), self.column_sql(*field)))
            .collect();
        let mut statements = vec![format!(
            "CREATE TABLE \"{table_name}\" ({})",
            col_defs.join(", ")
        )];
        for field in fields {
            statements.extend(self.trailing_statements(table_name, *field));
        }
        tracing::debug!(table = table_name, statements = statements.len(), "create table");
        statements
    }

    fn drop_table(&self, table_name: &str) -> Vec<String> {
        vec![format!("DROP TABLE IF EXISTS \"{table_name}\"")]
    }

    fn add_column(&self, table_name: &str, field: &dyn NumericField) -> Vec<String> {
        let col_sql = self.column_sql(field);
        let mut statements = vec![format!(
            "ALTER TABLE \"{table_name}\" ADD COLUMN \"{}\" {col_sql}",
            field.column()
        )];
        statements.extend(self.trailing_statements(table_name, field));
        tracing::debug!(table = table_name, column = field.column(), "add column");
        statements
    }

    fn drop_column(&self, table_name: &str, column_name: &str) -> Vec<String> {
        vec![format!(
            "ALTER TABLE \"{table_name}\" DROP COLUMN \"{column_name}\""
        )]
    }

    fn create_index(&self, table_name: &str, field: &dyn NumericField) -> Vec<String> {
        if !needs_index(field) {
            return Vec::new();
        }
        let column = field.column();
        vec![format!(
            "CREATE INDEX \"{table_name}_{column}_idx\" ON \"{table_name}\" (\"{column}\")"
        )]
    }

    fn comment_sql(&self, table_name: &str, field: &dyn NumericField) -> Option<String> {
        field.db_comment().map(|comment| {
            format!(
                "COMMENT ON COLUMN \"{table_name}\".\"{}\" IS {}",
                field.column(),
                quote_literal(comment)
            )
        })
    }

    fn column_sql(&self, field: &dyn NumericField) -> String {
        let options = field.options();
        let type_str = field.db_type(&self.connection);
        let null_str = if options.null { " NULL" } else { " NOT NULL" };
        let key_str = if options.primary_key {
            " PRIMARY KEY"
        } else if options.unique {
            " UNIQUE"
        } else {
            ""
        };
        // A sequence-backed column already has its default.
        let default_str = if is_serial_type(&type_str) {
            String::new()
        } else {
            default_sql(field)
        };
        format!("{type_str}{null_str}{key_str}{default_str}")
    }
}
