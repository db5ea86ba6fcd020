//! HTTP error mapping
//!
//! Every failed request gets the same JSON shape:
//!
//! ```json
//! {"error": "validation_error", "detail": "...", "code": 422, "field": "Age"}
//! ```
//!
//! `field` and `allowed` are only present for validation errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::service::ServiceError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        let (field, allowed) = match err {
            ServiceError::Validation(e) => (
                Some(e.field().to_string()),
                e.details().allowed.clone(),
            ),
            _ => (None, None),
        };

        Self {
            error: err.kind().to_string(),
            detail: err.public_detail(),
            code: err.status_code(),
            field,
            allowed,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
