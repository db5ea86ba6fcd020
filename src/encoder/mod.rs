//! Feature Encoder subsystem
//!
//! Maps a validated `StudentRecord` to the exact numeric column layout the
//! deployed model was trained on, using the vocabulary tables of the same
//! `FeatureSchema` the validator enforces.

mod encoder;
mod errors;
mod vector;

pub use encoder::FeatureEncoder;
pub use errors::{EncodeResult, EncodingError};
pub use vector::FeatureVector;
