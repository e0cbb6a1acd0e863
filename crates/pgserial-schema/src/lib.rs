//! # pgserial-schema
//!
//! Schema support for serial fields. Generates the PostgreSQL DDL for a
//! field's column, including the column comment that marks serial columns,
//! and maps introspected columns back to field types.
//!
//! ## Module Overview
//!
//! - [`schema_editor`] - `SchemaEditor` trait and the PostgreSQL implementation
//! - [`introspection`] - `ColumnInfo`, `recognize`, and field code generation

// Clippy overrides appropriate for a DDL generation crate.
#![allow(clippy::format_push_string)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_const_for_fn)]

pub mod introspection;
pub mod schema_editor;

pub use introspection::{recognize, ColumnInfo, IntrospectedField, TableInfo};
pub use schema_editor::{PostgresSchemaEditor, SchemaEditor};
