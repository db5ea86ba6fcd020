//! Observability HTTP Routes
//!
//! Health, schema description and request counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use super::AppState;
use crate::schema::FieldDef;

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub fingerprint: String,
    pub input_width: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: Option<ModelInfo>,
    pub uptime_secs: i64,
}

/// Schema description response
#[derive(Debug, Serialize)]
pub struct SchemaResponse<'a> {
    pub fields: &'a [FieldDef],
    pub columns: &'a [String],
}

/// Create observability routes
pub fn observability_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/schema", get(schema_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// 200 when a model is loaded, 503 otherwise
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model = state.service.gateway().model().map(|m| ModelInfo {
        name: m.name().to_string(),
        fingerprint: m.fingerprint().to_string(),
        input_width: m.input_width(),
    });

    let (status, label) = if model.is_some() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable")
    };

    let response = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model,
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    };

    (status, Json(response))
}

async fn schema_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = SchemaResponse {
        fields: &state.service.schema().fields,
        columns: state.service.encoder().columns(),
    };

    Json(serde_json::to_value(&response).unwrap_or_default())
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.service.metrics().to_json()))
}
