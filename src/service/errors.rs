//! # Service Errors
//!
//! The per-request error taxonomy. Client faults (validation) are logged at
//! WARN; operator faults (encoding, inference, missing model) at ERROR.

use thiserror::Error;

use crate::encoder::EncodingError;
use crate::model::{GatewayError, InferenceError};
use crate::observability::Severity;
use crate::schema::{ValidationError, ValidationErrorCode};

/// Result type for prediction requests
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Caller supplied a bad record
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Encoder tables disagree with a validated record
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// No model is loaded
    #[error("Model not loaded")]
    ModelUnavailable,

    /// The model call failed
    #[error("{0}")]
    Inference(InferenceError),
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::ModelUnavailable => ServiceError::ModelUnavailable,
            GatewayError::Inference(e) => ServiceError::Inference(e),
        }
    }
}

impl ServiceError {
    /// Short machine-readable kind, used as the `error` key of responses
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::Encoding(_) => "encoding_error",
            ServiceError::ModelUnavailable => "model_unavailable",
            ServiceError::Inference(_) => "inference_error",
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(e) => e.code().code(),
            ServiceError::Encoding(e) => e.code(),
            ServiceError::ModelUnavailable => "STEM_MODEL_UNAVAILABLE",
            ServiceError::Inference(e) => e.code(),
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request: not even a JSON object
            ServiceError::Validation(e) if e.code() == ValidationErrorCode::MalformedRecord => 400,

            // 422 Unprocessable Entity
            ServiceError::Validation(_) => 422,

            // 503 Service Unavailable
            ServiceError::ModelUnavailable => 503,

            // 504 Gateway Timeout
            ServiceError::Inference(InferenceError::Timeout(_)) => 504,

            // 500 Internal Server Error
            ServiceError::Encoding(_) => 500,
            ServiceError::Inference(_) => 500,
        }
    }

    /// Log severity for this error
    pub fn severity(&self) -> Severity {
        match self {
            ServiceError::Validation(_) => Severity::Warn,
            _ => Severity::Error,
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }

    /// Message safe to show to callers. Internal failures are generic; the
    /// full cause is only logged.
    pub fn public_detail(&self) -> String {
        match self {
            ServiceError::Validation(e) => e.message(),
            ServiceError::Encoding(_) => "Internal error while preparing model input".to_string(),
            ServiceError::ModelUnavailable => {
                "Model is not loaded; the service cannot make predictions".to_string()
            }
            ServiceError::Inference(InferenceError::Timeout(_)) => {
                "Prediction timed out".to_string()
            }
            ServiceError::Inference(_) => "Prediction failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::from(ValidationError::missing_field("Age")).status_code(),
            422
        );
        assert_eq!(
            ServiceError::from(ValidationError::malformed("array")).status_code(),
            400
        );
        assert_eq!(ServiceError::ModelUnavailable.status_code(), 503);
        assert_eq!(
            ServiceError::Inference(InferenceError::Failed("boom".into())).status_code(),
            500
        );
        assert_eq!(
            ServiceError::Inference(InferenceError::Timeout(10)).status_code(),
            504
        );
        assert_eq!(
            ServiceError::Encoding(EncodingError::MissingValue("Age".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_severities_differ_by_fault() {
        let client = ServiceError::from(ValidationError::missing_field("Age"));
        let internal = ServiceError::Encoding(EncodingError::MissingValue("Age".into()));

        assert_eq!(client.severity(), Severity::Warn);
        assert_eq!(internal.severity(), Severity::Error);
        assert!(client.is_client_error());
        assert!(!internal.is_client_error());
    }

    #[test]
    fn test_internal_detail_does_not_leak() {
        let err = ServiceError::Inference(InferenceError::Failed(
            "thread panicked at src/model.rs:42".into(),
        ));
        assert!(!err.public_detail().contains("src/model.rs"));
        assert!(err.to_string().contains("src/model.rs"));
    }

    #[test]
    fn test_gateway_error_conversion() {
        assert_eq!(
            ServiceError::from(GatewayError::ModelUnavailable),
            ServiceError::ModelUnavailable
        );
        let non_finite = GatewayError::Inference(InferenceError::NonFinite(f64::INFINITY));
        assert_eq!(ServiceError::from(non_finite).kind(), "inference_error");
    }
}
