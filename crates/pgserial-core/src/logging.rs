//! Logging integration for pgserial.
//!
//! Provides a helper for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and a span helper for field check passes.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn").
/// In debug mode a pretty, human-readable format is used; otherwise a
/// structured JSON format is used. Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for work done on a single model field.
///
/// # Examples
///
/// ```
/// use pgserial_core::logging::field_span;
///
/// let span = field_span("shop.Order", "number");
/// let _guard = span.enter();
/// tracing::debug!("running field checks");
/// ```
pub fn field_span(model: &str, field: &str) -> tracing::Span {
    tracing::debug_span!("field", model = model, field = field)
}
