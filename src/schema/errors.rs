//! Validation error types
//!
//! Error codes:
//! - STEM_MALFORMED_RECORD (REJECT)
//! - STEM_MISSING_FIELD (REJECT)
//! - STEM_UNDECLARED_FIELD (REJECT)
//! - STEM_WRONG_TYPE (REJECT)
//! - STEM_OUT_OF_RANGE (REJECT)
//! - STEM_UNKNOWN_CATEGORY (REJECT)
//!
//! Every validation error is the caller's fault and is recoverable by
//! resubmitting corrected input.

use std::fmt;

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Body is not a JSON object
    MalformedRecord,
    /// Required field absent
    MissingField,
    /// Field not declared in the schema
    UndeclaredField,
    /// Value has the wrong JSON type (including null)
    WrongType,
    /// Numeric value outside its configured bounds
    OutOfRange,
    /// Categorical value outside its vocabulary
    UnknownCategory,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::MalformedRecord => "STEM_MALFORMED_RECORD",
            ValidationErrorCode::MissingField => "STEM_MISSING_FIELD",
            ValidationErrorCode::UndeclaredField => "STEM_UNDECLARED_FIELD",
            ValidationErrorCode::WrongType => "STEM_WRONG_TYPE",
            ValidationErrorCode::OutOfRange => "STEM_OUT_OF_RANGE",
            ValidationErrorCode::UnknownCategory => "STEM_UNKNOWN_CATEGORY",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDetails {
    /// Offending field name, or `$root` for the record itself
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
    /// Legal values, for categorical fields
    pub allowed: Option<Vec<String>>,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
            allowed: None,
        }
    }

    pub fn with_allowed(mut self, allowed: Vec<String>) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// A rejected student record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    details: ValidationDetails,
}

impl ValidationError {
    /// Body is not a JSON object, or not JSON at all
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::MalformedRecord,
            details: ValidationDetails::new("$root", "a JSON object", reason),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::MissingField,
            details: ValidationDetails::new(field, "field to be present", "missing"),
        }
    }

    pub fn undeclared_field(field: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::UndeclaredField,
            details: ValidationDetails::new(field, "no undeclared fields", "extra field present"),
        }
    }

    pub fn wrong_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            code: ValidationErrorCode::WrongType,
            details: ValidationDetails::new(field, expected, actual),
        }
    }

    pub fn out_of_range(
        field: impl Into<String>,
        bounds: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self {
            code: ValidationErrorCode::OutOfRange,
            details: ValidationDetails::new(
                field,
                format!("a value in {}", bounds),
                actual.to_string(),
            ),
        }
    }

    pub fn unknown_category(field: impl Into<String>, actual: &str, allowed: Vec<String>) -> Self {
        Self {
            code: ValidationErrorCode::UnknownCategory,
            details: ValidationDetails::new(
                field,
                format!("one of {:?}", allowed),
                format!("{:?}", actual),
            )
            .with_allowed(allowed),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the offending field
    pub fn field(&self) -> &str {
        &self.details.field
    }

    /// Returns the full details
    pub fn details(&self) -> &ValidationDetails {
        &self.details
    }

    /// Returns a human-readable message
    pub fn message(&self) -> String {
        self.details.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code.code(), self.details)
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ValidationErrorCode::MissingField.code(), "STEM_MISSING_FIELD");
        assert_eq!(ValidationErrorCode::OutOfRange.code(), "STEM_OUT_OF_RANGE");
        assert_eq!(ValidationErrorCode::UnknownCategory.code(), "STEM_UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_display_names_field() {
        let err = ValidationError::out_of_range("Age", "[10, 25]", 9);
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("Age"));
        assert!(display.contains("[10, 25]"));
        assert!(display.contains('9'));
    }

    #[test]
    fn test_unknown_category_carries_allowed_values() {
        let err = ValidationError::unknown_category(
            "Gender",
            "Other",
            vec!["Male".into(), "Female".into()],
        );
        assert_eq!(err.field(), "Gender");
        assert_eq!(
            err.details().allowed.as_deref(),
            Some(&["Male".to_string(), "Female".to_string()][..])
        );
    }
}
