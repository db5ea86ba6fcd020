//! Prediction Service
//!
//! Composes validation, encoding and inference for one request, and owns
//! the request outcome counters.

mod errors;
mod prediction;

pub use errors::{ServiceError, ServiceResult};
pub use prediction::{EncodedColumn, Prediction, PredictionService};
