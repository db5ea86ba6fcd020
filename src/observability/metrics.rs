//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Request outcome counters.
///
/// Relaxed ordering: counters are independent and only ever read for
/// reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    predictions_served: AtomicU64,
    validation_rejections: AtomicU64,
    encoding_failures: AtomicU64,
    model_unavailable: AtomicU64,
    inference_failures: AtomicU64,
    inference_timeouts: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_predictions_served(&self) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_rejections(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_encoding_failures(&self) {
        self.encoding_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_model_unavailable(&self) {
        self.model_unavailable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_inference_failures(&self) {
        self.inference_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Timeouts are also counted as inference failures
    pub fn increment_inference_timeouts(&self) {
        self.inference_timeouts.fetch_add(1, Ordering::Relaxed);
        self.increment_inference_failures();
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            predictions_served: self.predictions_served.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            encoding_failures: self.encoding_failures.load(Ordering::Relaxed),
            model_unavailable: self.model_unavailable.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
            inference_timeouts: self.inference_timeouts.load(Ordering::Relaxed),
        }
    }

    /// Current snapshot as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub predictions_served: u64,
    pub validation_rejections: u64,
    pub encoding_failures: u64,
    pub model_unavailable: u64,
    pub inference_failures: u64,
    pub inference_timeouts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.predictions_served, 0);
        assert_eq!(snapshot.validation_rejections, 0);
        assert_eq!(snapshot.inference_failures, 0);
    }

    #[test]
    fn test_timeout_counts_as_failure() {
        let registry = MetricsRegistry::new();
        registry.increment_inference_timeouts();
        registry.increment_inference_failures();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.inference_timeouts, 1);
        assert_eq!(snapshot.inference_failures, 2);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.increment_predictions_served();
        registry.increment_validation_rejections();
        registry.increment_validation_rejections();

        let json = registry.to_json();
        assert_eq!(json["predictions_served"], 1);
        assert_eq!(json["validation_rejections"], 2);
        assert_eq!(json["model_unavailable"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_predictions_served();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().predictions_served, 1000);
    }
}
