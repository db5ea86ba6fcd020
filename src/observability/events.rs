//! Observability events
//!
//! Every lifecycle and request outcome the service logs is one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Model artifact loaded
    ModelLoaded,
    /// Model artifact failed to load (FATAL)
    ModelLoadFailed,
    /// Startup aborted for another reason (FATAL)
    BootFailed,
    /// Listener bound, accepting requests
    Serving,
    /// Shutdown complete
    ShutdownComplete,

    // Requests
    /// Prediction returned to the caller
    PredictionServed,
    /// Input rejected by the validator
    PredictionRejected,
    /// Encoder tables and record disagree
    EncodingFailed,
    /// Request arrived with no model loaded
    ModelUnavailable,
    /// Model call failed or timed out
    InferenceFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ModelLoaded => "MODEL_LOADED",
            Event::ModelLoadFailed => "MODEL_LOAD_FAILED",
            Event::BootFailed => "STARTUP_FAILED",
            Event::Serving => "SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::PredictionServed => "PREDICTION_SERVED",
            Event::PredictionRejected => "PREDICTION_REJECTED",
            Event::EncodingFailed => "ENCODING_FAILED",
            Event::ModelUnavailable => "MODEL_UNAVAILABLE",
            Event::InferenceFailed => "INFERENCE_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ModelLoadFailed | Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_events() {
        assert!(Event::ModelLoadFailed.is_fatal());
        assert!(Event::BootFailed.is_fatal());
        assert!(!Event::InferenceFailed.is_fatal());
        assert!(!Event::PredictionRejected.is_fatal());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(Event::PredictionServed.as_str(), "PREDICTION_SERVED");
        assert_eq!(format!("{}", Event::ModelLoaded), "MODEL_LOADED");
    }
}
