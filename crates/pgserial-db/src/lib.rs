//! # pgserial-db
//!
//! ORM field layer for PostgreSQL serial columns. Provides the
//! [`NumericField`](fields::NumericField) capability, the plain integer fields
//! and the [`Serial`](fields::Serial) decorator that turns them into
//! `smallserial`, `serial` and `bigserial` columns.
//!
//! ## Module Overview
//!
//! - [`fields`] - Field options, integer fields, serial fields, deconstruction
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum and prepared values
//! - [`query`] - INSERT compilation that honours database defaults
//! - [`connection`] - Connection handles and backend vendors
//! - [`validators`] - Range validators

// These clippy lints are intentionally allowed for the ORM crate:
// - struct_excessive_bools: FieldOptions mirrors Django's field API which uses many booleans
// - result_large_err: OrmError is the crate error type and should be used consistently
// - doc_markdown: backtick requirements for documentation items are too strict
// - needless_pass_by_value: conversion methods take values the way Django's do
// - return_self_not_must_use: builder pattern methods are self-documenting
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::result_large_err)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]

pub mod connection;
pub mod fields;
pub mod query;
pub mod validators;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use connection::{Connection, DatabaseBackendType};
pub use fields::{
    BigIntegerField, BigSerialField, FieldOptions, IntegerField, NumericField, Serial,
    SerialField, SmallIntegerField, SmallSerialField, SERIAL_DB_COMMENT,
};
pub use query::SqlCompiler;
pub use validators::Validator;
pub use value::{FieldDefault, PrepValue, Value};
