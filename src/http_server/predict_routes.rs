//! Prediction HTTP Routes

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde_json::{Map, Value};

use super::AppState;
use crate::service::ServiceError;

/// Create prediction routes
pub fn predict_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .with_state(state)
}

/// The body is taken as raw bytes so that malformed JSON is reported in the
/// same error shape as every other rejection.
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ServiceError> {
    let prediction = state.service.predict_json(&body).await?;

    let mut response = Map::new();
    response.insert(state.response_key.clone(), Value::from(prediction.value));
    Ok(Json(Value::Object(response)))
}
