//! Prediction service
//!
//! Request path: raw JSON → `SchemaValidator` → `FeatureEncoder` →
//! `InferenceGateway` → rounded prediction.
//!
//! Validation and encoding complete before the gateway is touched; a record
//! that fails either never reaches the model.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{ServiceError, ServiceResult};
use crate::config::ServiceConfig;
use crate::encoder::{FeatureEncoder, FeatureVector};
use crate::model::{InferenceError, InferenceGateway, LoadResult, LoadedModel};
use crate::observability::{log_event_at, log_event_with_fields, Event, MetricsRegistry, Severity};
use crate::schema::{FeatureSchema, SchemaValidator, ValidationError};

/// A single prediction, rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub value: f64,
}

impl Prediction {
    /// `raw` must be finite. Magnitudes whose scaled form overflows have no
    /// fractional part and are kept as is.
    fn rounded(raw: f64) -> Self {
        let scaled = raw * 100.0;
        let value = if scaled.is_finite() {
            scaled.round() / 100.0
        } else {
            raw
        };
        Self { value }
    }
}

/// One encoded column, for explain output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedColumn {
    pub column: String,
    pub value: f64,
}

/// Stateless request pipeline over an immutable model handle
#[derive(Debug)]
pub struct PredictionService {
    schema: Arc<FeatureSchema>,
    encoder: FeatureEncoder,
    gateway: InferenceGateway,
    metrics: MetricsRegistry,
}

impl PredictionService {
    /// Assembles the pipeline. When the gateway holds a model, its feature
    /// names must equal the encoder column layout.
    pub fn new(schema: Arc<FeatureSchema>, gateway: InferenceGateway) -> LoadResult<Self> {
        let encoder = FeatureEncoder::new(schema.clone());

        if let Some(model) = gateway.model() {
            model.check_columns(encoder.columns())?;
        }

        Ok(Self {
            schema,
            encoder,
            gateway,
            metrics: MetricsRegistry::new(),
        })
    }

    /// Loads the configured artifact and builds the service.
    ///
    /// Any failure here must abort startup.
    pub fn bootstrap(config: &ServiceConfig) -> LoadResult<Self> {
        let model = LoadedModel::load(&config.model_path)?;
        let width = model.input_width().to_string();
        log_event_with_fields(
            Event::ModelLoaded,
            &[
                ("name", model.name()),
                ("path", &config.model_path.display().to_string()),
                ("fingerprint", model.fingerprint()),
                ("input_width", &width),
            ],
        );

        let gateway = InferenceGateway::new(Arc::new(model), config.inference_timeout());
        Self::new(Arc::new(config.schema.clone()), gateway)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn gateway(&self) -> &InferenceGateway {
        &self.gateway
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Validates and encodes a raw record
    pub fn encode(&self, raw: &Value) -> ServiceResult<FeatureVector> {
        let record = SchemaValidator::new(&self.schema).validate(raw)?;
        Ok(self.encoder.encode(&record)?)
    }

    /// Column/value pairs of the encoded record. Never calls the model.
    pub fn explain(&self, raw: &Value) -> ServiceResult<Vec<EncodedColumn>> {
        let vector = self.encode(raw)?;
        Ok(self
            .encoder
            .columns()
            .iter()
            .zip(vector.as_slice())
            .map(|(column, value)| EncodedColumn {
                column: column.clone(),
                value: *value,
            })
            .collect())
    }

    /// Parses a raw request body, then runs `predict`. Unparseable bodies
    /// are validation errors on `$root`.
    pub async fn predict_json(&self, body: &[u8]) -> ServiceResult<Prediction> {
        match serde_json::from_slice::<Value>(body) {
            Ok(raw) => self.predict(&raw).await,
            Err(e) => {
                let err =
                    ServiceError::from(ValidationError::malformed(format!("invalid JSON ({})", e)));
                self.record_failure(&err, &Uuid::new_v4().to_string(), "0");
                Err(err)
            }
        }
    }

    /// Runs the full pipeline for one record.
    pub async fn predict(&self, raw: &Value) -> ServiceResult<Prediction> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let result = match self.encode(raw) {
            Ok(vector) => self
                .gateway
                .predict(vector)
                .await
                .map(Prediction::rounded)
                .map_err(ServiceError::from),
            Err(e) => Err(e),
        };

        let elapsed_us = started.elapsed().as_micros().to_string();
        match &result {
            Ok(prediction) => {
                self.metrics.increment_predictions_served();
                log_event_with_fields(
                    Event::PredictionServed,
                    &[
                        ("request_id", &request_id),
                        ("prediction", &prediction.value.to_string()),
                        ("elapsed_us", &elapsed_us),
                    ],
                );
            }
            Err(err) => self.record_failure(err, &request_id, &elapsed_us),
        }

        result
    }

    fn record_failure(&self, err: &ServiceError, request_id: &str, elapsed_us: &str) {
        let event = match err {
            ServiceError::Validation(_) => {
                self.metrics.increment_validation_rejections();
                Event::PredictionRejected
            }
            ServiceError::Encoding(_) => {
                self.metrics.increment_encoding_failures();
                Event::EncodingFailed
            }
            ServiceError::ModelUnavailable => {
                self.metrics.increment_model_unavailable();
                Event::ModelUnavailable
            }
            ServiceError::Inference(InferenceError::Timeout(_)) => {
                self.metrics.increment_inference_timeouts();
                Event::InferenceFailed
            }
            ServiceError::Inference(_) => {
                self.metrics.increment_inference_failures();
                Event::InferenceFailed
            }
        };

        let severity: Severity = err.severity();
        let detail = err.to_string();
        log_event_at(
            severity,
            event,
            &[
                ("request_id", request_id),
                ("code", err.code()),
                ("detail", &detail),
                ("elapsed_us", elapsed_us),
            ],
        );
    }
}
