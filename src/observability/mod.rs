//! Observability for the list engine
//!
//! Structured JSON log lines and a small typed event set. Logging is
//! read-only with no effect on results; a failed write is ignored rather
//! than surfaced to the caller.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
