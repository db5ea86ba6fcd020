//! Model artifact loading
//!
//! Artifact format (JSON):
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "stem-potential-v3",
//!   "feature_names": ["Age", "Gender", ...],
//!   "model": {"type": "linear", "coefficients": [...], "intercept": 0.0}
//! }
//! ```
//!
//! `model.type` is `linear` or `tree_ensemble`. A tree ensemble declares
//! its input width, which must equal the number of `feature_names`:
//!
//! ```json
//! "model": {
//!   "type": "tree_ensemble",
//!   "n_features": 13,
//!   "base_score": 0.0,
//!   "aggregation": "mean",
//!   "trees": [{"nodes": [
//!     {"feature": 12, "threshold": 2.5, "left": 1, "right": 2},
//!     {"leaf": 0.2},
//!     {"leaf": 0.8}
//!   ]}]
//! }
//! ```
//!
//! Splits go `left` when `x[feature] <= threshold`. `base_score` defaults to
//! 0 and `aggregation` to `mean`. The artifact is read once at startup; any
//! failure aborts startup.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::errors::{InferenceResult, LoadResult, ModelLoadError};
use super::predictor::{LinearModel, Predictor, TreeEnsemble};

/// The only artifact format version understood
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Model family and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

/// On-disk artifact document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    /// Training-time column order
    pub feature_names: Vec<String>,
    pub model: ModelSpec,
}

impl ModelArtifact {
    /// Checks version, parameter sanity and width agreement
    pub fn validate(&self) -> Result<(), String> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            ));
        }
        if self.feature_names.is_empty() {
            return Err("feature_names is empty".into());
        }

        let width = match &self.model {
            ModelSpec::Linear(m) => {
                m.validate()?;
                m.input_width()
            }
            ModelSpec::TreeEnsemble(m) => {
                m.validate()?;
                m.input_width()
            }
        };
        if width != self.feature_names.len() {
            return Err(format!(
                "model input width {} does not match {} feature_names",
                width,
                self.feature_names.len()
            ));
        }
        Ok(())
    }
}

/// An immutable, loaded model. Shared read-only behind an `Arc`.
#[derive(Debug)]
pub struct LoadedModel {
    name: String,
    feature_names: Vec<String>,
    fingerprint: String,
    predictor: Box<dyn Predictor>,
}

impl LoadedModel {
    /// Reads, parses and validates an artifact file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelLoadError::Missing(path.to_path_buf()),
            _ => ModelLoadError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let fingerprint = fingerprint(&bytes);

        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|e| ModelLoadError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut model = Self::from_artifact(artifact)?;
        model.fingerprint = fingerprint;
        Ok(model)
    }

    /// Builds a model from an in-memory artifact. The fingerprint is that
    /// of the artifact's canonical JSON form.
    pub fn from_artifact(artifact: ModelArtifact) -> LoadResult<Self> {
        artifact.validate().map_err(ModelLoadError::Invalid)?;

        let canonical = serde_json::to_vec(&artifact)
            .map_err(|e| ModelLoadError::Invalid(e.to_string()))?;

        let predictor: Box<dyn Predictor> = match artifact.model {
            ModelSpec::Linear(m) => Box::new(m),
            ModelSpec::TreeEnsemble(m) => Box::new(m),
        };

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| "unnamed".to_string()),
            feature_names: artifact.feature_names,
            fingerprint: fingerprint(&canonical),
            predictor,
        })
    }

    /// Wraps an arbitrary predictor
    pub fn from_predictor(
        name: impl Into<String>,
        feature_names: Vec<String>,
        predictor: Box<dyn Predictor>,
    ) -> LoadResult<Self> {
        if predictor.input_width() != feature_names.len() {
            return Err(ModelLoadError::Invalid(format!(
                "predictor width {} does not match {} feature_names",
                predictor.input_width(),
                feature_names.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            feature_names,
            fingerprint: String::new(),
            predictor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// SHA-256 hex digest of the artifact bytes
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn input_width(&self) -> usize {
        self.predictor.input_width()
    }

    /// Verifies the encoder layout is exactly the training-time layout.
    pub fn check_columns(&self, columns: &[String]) -> LoadResult<()> {
        if columns != self.feature_names.as_slice() {
            return Err(ModelLoadError::FeatureMismatch {
                encoder: columns.to_vec(),
                model: self.feature_names.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn predict(&self, features: &[f64]) -> InferenceResult<f64> {
        self.predictor.predict(features)
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::predictor::Link;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn linear_artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: 1,
            name: Some("linear-test".into()),
            feature_names: vec!["Age".into(), "Absences".into()],
            model: ModelSpec::Linear(LinearModel {
                coefficients: vec![0.1, -0.05],
                intercept: 1.0,
                link: Link::Identity,
            }),
        }
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_linear_artifact() {
        let json = serde_json::to_string(&linear_artifact()).unwrap();
        let file = write_temp(&json);

        let model = LoadedModel::load(file.path()).unwrap();
        assert_eq!(model.name(), "linear-test");
        assert_eq!(model.input_width(), 2);
        assert_eq!(model.fingerprint().len(), 64);
        assert_eq!(model.fingerprint(), fingerprint(json.as_bytes()));
    }

    #[test]
    fn test_load_tree_ensemble_artifact() {
        let file = write_temp(
            r#"{
                "format_version": 1,
                "name": "stump",
                "feature_names": ["Age", "Absences"],
                "model": {
                    "type": "tree_ensemble",
                    "n_features": 2,
                    "trees": [{"nodes": [
                        {"feature": 1, "threshold": 10.0, "left": 1, "right": 2},
                        {"leaf": 0.9},
                        {"leaf": 0.1}
                    ]}]
                }
            }"#,
        );

        let model = LoadedModel::load(file.path()).unwrap();
        assert_eq!(model.input_width(), 2);
        assert_eq!(model.predict(&[15.0, 3.0]).unwrap(), 0.9);
        assert_eq!(model.predict(&[15.0, 30.0]).unwrap(), 0.1);
    }

    #[test]
    fn test_tree_ensemble_without_width_is_malformed() {
        let file = write_temp(
            r#"{
                "format_version": 1,
                "feature_names": ["Age"],
                "model": {"type": "tree_ensemble", "trees": [{"nodes": [{"leaf": 1.0}]}]}
            }"#,
        );

        let err = LoadedModel::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Malformed { .. }));
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoadedModel::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::Missing(_)));
    }

    #[test]
    fn test_malformed_artifact() {
        let file = write_temp("not json at all");
        let err = LoadedModel::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Malformed { .. }));
    }

    #[test]
    fn test_width_mismatch_is_invalid() {
        let mut artifact = linear_artifact();
        artifact.feature_names.push("Extra".into());
        let err = LoadedModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid(_)));
    }

    #[test]
    fn test_unknown_format_version_is_invalid() {
        let mut artifact = linear_artifact();
        artifact.format_version = 2;
        let err = LoadedModel::from_artifact(artifact).unwrap_err();
        assert!(err.to_string().contains("format_version"));
    }

    #[test]
    fn test_tree_ensemble_json() {
        let file = write_temp(
            r#"{
                "format_version": 1,
                "feature_names": ["Age"],
                "model": {
                    "type": "tree_ensemble",
                    "n_features": 1,
                    "aggregation": "sum",
                    "base_score": 0.5,
                    "trees": [{"nodes": [
                        {"feature": 0, "threshold": 15, "left": 1, "right": 2},
                        {"leaf": 1.0},
                        {"leaf": 2.0}
                    ]}]
                }
            }"#,
        );
        let model = LoadedModel::load(file.path()).unwrap();
        assert_eq!(model.name(), "unnamed");
        assert_eq!(model.predict(&[14.0]).unwrap(), 1.5);
        assert_eq!(model.predict(&[16.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_check_columns() {
        let model = LoadedModel::from_artifact(linear_artifact()).unwrap();
        assert!(model
            .check_columns(&["Age".to_string(), "Absences".to_string()])
            .is_ok());

        let err = model
            .check_columns(&["Absences".to_string(), "Age".to_string()])
            .unwrap_err();
        assert!(matches!(err, ModelLoadError::FeatureMismatch { .. }));
    }
}
