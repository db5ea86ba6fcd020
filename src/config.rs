//! Service configuration
//!
//! A single JSON file. Only `model_path` is required:
//!
//! ```json
//! {
//!   "model_path": "models/best_model.json",
//!   "server": {"host": "0.0.0.0", "port": 8000, "cors_origins": ["*"]},
//!   "inference_timeout_ms": 5000,
//!   "response_key": "predicted_STEM_potential",
//!   "schema": {"fields": [...]}
//! }
//! ```
//!
//! A relative `model_path` is resolved against the directory holding the
//! config file. When `schema` is omitted the default student layout is used.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::schema::FeatureSchema;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Full service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path to the model artifact (required)
    pub model_path: PathBuf,

    #[serde(default)]
    pub server: HttpServerConfig,

    /// Bound on a single model call (default 5000)
    #[serde(default = "default_inference_timeout_ms")]
    pub inference_timeout_ms: u64,

    /// JSON key holding the prediction in success responses
    #[serde(default = "default_response_key")]
    pub response_key: String,

    /// Numeric bounds and categorical vocabularies
    #[serde(default)]
    pub schema: FeatureSchema,
}

fn default_inference_timeout_ms() -> u64 {
    5_000
}

fn default_response_key() -> String {
    "predicted_STEM_potential".to_string()
}

impl ServiceConfig {
    /// Config with defaults for everything but the artifact path
    pub fn with_model_path(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            server: HttpServerConfig::default(),
            inference_timeout_ms: default_inference_timeout_ms(),
            response_key: default_response_key(),
            schema: FeatureSchema::student_default(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: ServiceConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if config.model_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.model_path = dir.join(&config.model_path);
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("model_path must not be empty".into()));
        }

        if self.inference_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "inference_timeout_ms must be > 0".into(),
            ));
        }

        if self.response_key.is_empty() {
            return Err(ConfigError::Invalid("response_key must not be empty".into()));
        }

        self.server
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("server: {}", e)))?;

        self.schema
            .validate_structure()
            .map_err(|e| ConfigError::Invalid(format!("schema: {}", e)))?;

        Ok(())
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_millis(self.inference_timeout_ms)
    }
}
