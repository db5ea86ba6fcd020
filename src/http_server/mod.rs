//! # HTTP Server Module
//!
//! Axum front end for the prediction service.
//!
//! # Endpoints
//!
//! - `POST /predict` - Score one student record
//! - `GET /health` - Liveness and loaded model
//! - `GET /schema` - Accepted fields and encoder columns
//! - `GET /metrics` - Request outcome counters

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::service::PredictionService;

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod predict_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::ErrorResponse;
pub use server::HttpServer;

/// State shared across handlers
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub response_key: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<PredictionService>, response_key: impl Into<String>) -> Self {
        Self {
            service,
            response_key: response_key.into(),
            started_at: Utc::now(),
        }
    }
}
