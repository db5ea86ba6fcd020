//! Inference gateway
//!
//! The boundary to the opaque model. Every call:
//! 1. fails with `ModelUnavailable` when no model is loaded
//! 2. checks the vector width against the model input width
//! 3. runs the model on the blocking pool, bounded by a timeout
//! 4. rejects non-finite outputs
//!
//! There are no retries.

use std::sync::Arc;
use std::time::Duration;

use super::artifact::LoadedModel;
use super::errors::{GatewayError, InferenceError};
use crate::encoder::FeatureVector;

/// Immutable handle to the process-wide model
pub type ModelHandle = Arc<LoadedModel>;

/// Default bound on a single inference call
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone)]
pub struct InferenceGateway {
    model: Option<ModelHandle>,
    timeout: Duration,
}

impl InferenceGateway {
    /// Gateway over a loaded model
    pub fn new(model: ModelHandle, timeout: Duration) -> Self {
        Self {
            model: Some(model),
            timeout,
        }
    }

    /// Gateway with no model. Every call fails with `ModelUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            model: None,
            timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }

    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs one prediction. Consumes the vector.
    pub async fn predict(&self, vector: FeatureVector) -> Result<f64, GatewayError> {
        let model = self.model.clone().ok_or(GatewayError::ModelUnavailable)?;

        if vector.len() != model.input_width() {
            return Err(InferenceError::ShapeMismatch {
                expected: model.input_width(),
                actual: vector.len(),
            }
            .into());
        }

        let task = tokio::task::spawn_blocking(move || model.predict(vector.as_slice()));

        let output = match tokio::time::timeout(self.timeout, task).await {
            Err(_) => return Err(InferenceError::Timeout(self.timeout.as_millis() as u64).into()),
            Ok(Err(join_error)) => {
                let reason = format!("model call aborted: {}", join_error);
                return Err(InferenceError::Failed(reason).into());
            }
            Ok(Ok(result)) => result?,
        };

        if !output.is_finite() {
            return Err(InferenceError::NonFinite(output).into());
        }

        Ok(output)
    }
}
