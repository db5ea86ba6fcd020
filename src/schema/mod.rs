//! Schema Validator subsystem
//!
//! The feature schema is the one declaration of legal student records:
//! numeric bounds and categorical vocabularies are defined here and reused
//! unchanged by the feature encoder, so the two never disagree on what
//! values are legal.
//!
//! # Design Principles
//!
//! - Validation happens before any encoding or inference
//! - No nulls, defaults, or coercion
//! - Unknown categories are rejected, never substituted
//! - Deterministic validation

mod errors;
mod record;
mod types;
mod validator;

pub use errors::{ValidationDetails, ValidationError, ValidationErrorCode, ValidationResult};
pub use record::{FieldValue, StudentRecord};
pub use types::{Category, CategoryEncoding, FeatureSchema, FieldDef, FieldType};
pub use validator::SchemaValidator;
