//! # Model Errors
//!
//! Load errors are FATAL: the process must not start serving without a
//! model. Inference errors are fatal to the current request only.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for artifact loading
pub type LoadResult<T> = Result<T, ModelLoadError>;

/// Result type for a single prediction call
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Startup failures of the model artifact
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// Artifact path does not exist
    #[error("Model artifact not found: {}", .0.display())]
    Missing(PathBuf),

    /// Artifact exists but cannot be read
    #[error("Model artifact {} is unreadable: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// Artifact is not a valid artifact document
    #[error("Model artifact {} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Artifact parsed but is internally inconsistent
    #[error("Invalid model: {0}")]
    Invalid(String),

    /// Encoder layout and model feature names disagree
    #[error("Feature layout mismatch: encoder produces {encoder:?}, model expects {model:?}")]
    FeatureMismatch {
        encoder: Vec<String>,
        model: Vec<String>,
    },
}

impl ModelLoadError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ModelLoadError::Missing(_) => "STEM_MODEL_MISSING",
            ModelLoadError::Unreadable { .. } => "STEM_MODEL_UNREADABLE",
            ModelLoadError::Malformed { .. } => "STEM_MODEL_MALFORMED",
            ModelLoadError::Invalid(_) => "STEM_MODEL_INVALID",
            ModelLoadError::FeatureMismatch { .. } => "STEM_MODEL_FEATURE_MISMATCH",
        }
    }
}

/// Failures of a single prediction call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Vector width differs from the model input width
    #[error("Feature vector has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Call did not finish within the configured timeout
    #[error("Inference timed out after {0} ms")]
    Timeout(u64),

    /// Model produced NaN or infinity
    #[error("Model produced a non-finite output: {0}")]
    NonFinite(f64),

    /// The underlying call failed or panicked
    #[error("Inference failed: {0}")]
    Failed(String),
}

impl InferenceError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            InferenceError::ShapeMismatch { .. } => "STEM_INFERENCE_SHAPE_MISMATCH",
            InferenceError::Timeout(_) => "STEM_INFERENCE_TIMEOUT",
            InferenceError::NonFinite(_) => "STEM_INFERENCE_NON_FINITE",
            InferenceError::Failed(_) => "STEM_INFERENCE_FAILED",
        }
    }
}

/// Errors surfaced by the inference gateway
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// No model is loaded
    #[error("Model not loaded")]
    ModelUnavailable,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_codes() {
        assert_eq!(
            ModelLoadError::Missing(PathBuf::from("m.json")).code(),
            "STEM_MODEL_MISSING"
        );
        assert_eq!(
            ModelLoadError::Invalid("x".into()).code(),
            "STEM_MODEL_INVALID"
        );
    }

    #[test]
    fn test_missing_message_names_path() {
        let err = ModelLoadError::Missing(PathBuf::from("models/best_model.json"));
        assert!(err.to_string().contains("models/best_model.json"));
    }

    #[test]
    fn test_inference_error_converts() {
        let err: GatewayError = InferenceError::Timeout(5000).into();
        assert_eq!(err, GatewayError::Inference(InferenceError::Timeout(5000)));
        assert!(err.to_string().contains("5000"));
    }
}
