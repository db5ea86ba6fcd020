//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Request outcome counters
//! - Typed lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on request handling
//! 3. Logging failures never fail a request
//!
//! # Usage
//!
//! ```ignore
//! use stempredict::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ModelLoaded, &[("name", "stem-v3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

fn default_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(default_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(default_severity(event), event.as_str(), fields);
}

/// Log an event at an explicit severity
pub fn log_event_at(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::BootStart);
        log_event(Event::ShutdownComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("config", "/tmp/stempredict.json")]);
        log_event_at(Severity::Warn, Event::PredictionRejected, &[("field", "Age")]);
    }

    #[test]
    fn test_default_severity() {
        assert_eq!(default_severity(Event::ModelLoadFailed), Severity::Fatal);
        assert_eq!(default_severity(Event::PredictionServed), Severity::Info);
    }
}
