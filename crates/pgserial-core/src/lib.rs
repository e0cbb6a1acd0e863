//! # pgserial-core
//!
//! Core types shared by the pgserial crates: settings, the system check
//! message types, logging setup, and the error types.
//! This crate has no ORM dependencies and is the foundation for the others.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`checks`] - Check levels and diagnostic messages
//! - [`settings`] - Configuration (databases, logging)
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use checks::{CheckLevel, CheckMessage};
pub use error::{OrmError, OrmResult, ValidationError};
pub use settings::{DatabaseSettings, Settings};
