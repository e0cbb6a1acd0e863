//! Write-query compilation.
//!
//! - [`compiler`] - INSERT compilation aware of database-supplied defaults and `RETURNING`

pub mod compiler;

pub use compiler::{prepare_insert, returning_columns, SqlCompiler};
