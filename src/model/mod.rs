//! Model subsystem
//!
//! Loads the model artifact exactly once at startup and exposes it to
//! request handlers only through `InferenceGateway`. The loaded model is
//! never written to after construction.

mod artifact;
mod errors;
mod gateway;
mod predictor;

pub use artifact::{LoadedModel, ModelArtifact, ModelSpec, ARTIFACT_FORMAT_VERSION};
pub use errors::{GatewayError, InferenceError, InferenceResult, LoadResult, ModelLoadError};
pub use gateway::{InferenceGateway, ModelHandle, DEFAULT_INFERENCE_TIMEOUT};
pub use predictor::{Aggregation, LinearModel, Link, Predictor, Tree, TreeEnsemble, TreeNode};
