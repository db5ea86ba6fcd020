//! # Encoding Errors
//!
//! An encoding error means the encoder tables and the validated record
//! disagree. That is an operator defect, never a client one.

use thiserror::Error;

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodingError>;

/// Internal mapping/table defects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// Validated record lacks a field the layout expects
    #[error("Record has no value for field '{0}'")]
    MissingValue(String),

    /// Value kind does not match the field definition
    #[error("Field '{field}' holds a {actual} value, layout expects {expected}")]
    KindMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Categorical value has no entry in the encoding table
    #[error("Field '{field}' has no mapping for category {value:?}")]
    UnmappedCategory { field: String, value: String },

    /// Produced vector does not match the declared layout width
    #[error("Encoded {actual} columns, layout declares {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}

impl EncodingError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            EncodingError::MissingValue(_) => "STEM_ENCODING_MISSING_VALUE",
            EncodingError::KindMismatch { .. } => "STEM_ENCODING_KIND_MISMATCH",
            EncodingError::UnmappedCategory { .. } => "STEM_ENCODING_UNMAPPED_CATEGORY",
            EncodingError::WidthMismatch { .. } => "STEM_ENCODING_WIDTH_MISMATCH",
        }
    }
}
