//! INSERT compilation.
//!
//! The [`SqlCompiler`] turns prepared field values into parameterized SQL.
//! Values prepared as [`PrepValue::DatabaseDefault`] never become bound
//! parameters: a single-row insert leaves the column out entirely, and a
//! bulk insert writes the `DEFAULT` keyword in its place so every row keeps
//! the same column list.
//!
//! On PostgreSQL both statements can end in a `RETURNING` clause naming the
//! columns the database generates (see [`returning_columns`]), so the caller
//! reads back the values the sequence assigned. Other backends ignore the
//! returning list.
//!
//! The compiler supports PostgreSQL (`$1, $2, ...`) and SQLite/MySQL (`?`)
//! parameter placeholder styles.

use pgserial_core::{OrmError, OrmResult};

use crate::connection::DatabaseBackendType;
use crate::fields::NumericField;
use crate::value::{PrepValue, Value};

/// Translates prepared values into parameterized INSERT statements.
///
/// # Examples
///
/// ```
/// use pgserial_db::connection::DatabaseBackendType;
/// use pgserial_db::query::SqlCompiler;
/// use pgserial_db::value::{PrepValue, Value};
///
/// let compiler = SqlCompiler::new(DatabaseBackendType::PostgreSQL);
/// let (sql, params) = compiler.compile_insert(
///     "shop_order",
///     &[("id", PrepValue::DatabaseDefault), ("total", PrepValue::Value(Value::Int(10)))],
///     &["id"],
/// );
/// assert_eq!(sql, r#"INSERT INTO "shop_order" ("total") VALUES ($1) RETURNING "id""#);
/// assert_eq!(params, vec![Value::Int(10)]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SqlCompiler {
    backend: DatabaseBackendType,
}

impl SqlCompiler {
    /// Creates a new compiler for the given backend type.
    pub const fn new(backend: DatabaseBackendType) -> Self {
        Self { backend }
    }

    /// Returns the backend this compiler targets.
    pub const fn backend(&self) -> DatabaseBackendType {
        self.backend
    }

    /// Returns a parameter placeholder for the given 1-based index.
    fn placeholder(&self, index: usize) -> String {
        match self.backend {
            DatabaseBackendType::PostgreSQL => format!("${index}"),
            DatabaseBackendType::SQLite | DatabaseBackendType::MySQL => "?".to_string(),
        }
    }

    /// Appends ` RETURNING "a", "b"` on PostgreSQL when columns are requested.
    fn push_returning(&self, sql: &mut String, returning: &[&str]) {
        if returning.is_empty() {
            return;
        }
        if self.backend != DatabaseBackendType::PostgreSQL {
            tracing::trace!(backend = self.backend.vendor(), "RETURNING not emitted");
            return;
        }
        let cols = returning
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(" RETURNING ");
        sql.push_str(&cols);
    }

    /// Compiles a single-row INSERT.
    ///
    /// Columns whose value is [`PrepValue::DatabaseDefault`] are omitted. If
    /// nothing is left the statement is `INSERT INTO "t" DEFAULT VALUES`.
    /// `returning` names the columns to read back on PostgreSQL.
    pub fn compile_insert(
        &self,
        table: &str,
        fields: &[(&str, PrepValue)],
        returning: &[&str],
    ) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut columns = Vec::new();
        let mut placeholders = Vec::new();
        for (name, prepared) in fields {
            match prepared {
                PrepValue::DatabaseDefault => {
                    tracing::trace!(table, column = name, "omitting column for database default");
                }
                PrepValue::Value(value) => {
                    params.push(value.clone());
                    columns.push(format!("\"{name}\""));
                    placeholders.push(self.placeholder(params.len()));
                }
            }
        }

        let mut sql = if columns.is_empty() {
            format!("INSERT INTO \"{table}\" DEFAULT VALUES")
        } else {
            format!(
                "INSERT INTO \"{}\" ({}) VALUES ({})",
                table,
                columns.join(", "),
                placeholders.join(", ")
            )
        };
        self.push_returning(&mut sql, returning);
        tracing::debug!(sql = %sql, params = params.len(), "compiled insert");
        (sql, params)
    }

    /// Compiles a multi-row INSERT over a fixed column list.
    ///
    /// [`PrepValue::DatabaseDefault`] entries are written as `DEFAULT`.
    /// Returns an empty statement when there are no rows. `returning` names
    /// the columns to read back on PostgreSQL.
    ///
    /// # Errors
    ///
    /// Fails when a row does not have one value per column.
    pub fn compile_bulk_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<PrepValue>],
        returning: &[&str],
    ) -> OrmResult<(String, Vec<Value>)> {
        if rows.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let col_list = columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("INSERT INTO \"{table}\" ({col_list}) VALUES ");

        let mut params = Vec::new();
        let mut row_strings = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(OrmError::InvalidValue(format!(
                    "Row {i} has {} values but {} columns were given.",
                    row.len(),
                    columns.len()
                )));
            }
            let cells: Vec<String> = row
                .iter()
                .map(|prepared| match prepared {
                    PrepValue::DatabaseDefault => "DEFAULT".to_string(),
                    PrepValue::Value(value) => {
                        params.push(value.clone());
                        self.placeholder(params.len())
                    }
                })
                .collect();
            row_strings.push(format!("({})", cells.join(", ")));
        }
        sql.push_str(&row_strings.join(", "));
        self.push_returning(&mut sql, returning);
        tracing::debug!(sql = %sql, rows = rows.len(), "compiled bulk insert");
        Ok((sql, params))
    }
}

/// Prepares raw values through their fields, pairing each with its column.
///
/// # Errors
///
/// Propagates the first conversion error.
pub fn prepare_insert<'a>(
    values: &[(&'a dyn NumericField, Value)],
) -> OrmResult<Vec<(&'a str, PrepValue)>> {
    values
        .iter()
        .map(|&(field, ref value)| Ok((field.column(), field.get_prep_value(value.clone())?)))
        .collect()
}

/// Returns the columns of the fields whose values the database generates,
/// in field order.
pub fn returning_columns<'a>(fields: &[&'a dyn NumericField]) -> Vec<&'a str> {
    fields
        .iter()
        .copied()
        .filter(|field| field.db_returning())
        .map(|field| field.column())
        .collect()
}
