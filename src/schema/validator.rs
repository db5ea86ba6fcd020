//! Record validator
//!
//! Validation semantics:
//! - The record is a JSON object
//! - No undeclared fields exist
//! - All declared fields are present and non-null
//! - Field types exactly match schema types (floats accept integers)
//! - Numeric values lie within their inclusive bounds
//! - Categorical values belong to their vocabulary (exact, case-sensitive)
//!
//! There is no default substitution: an unknown category is always a
//! rejection.

use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult};
use super::record::{FieldValue, StudentRecord};
use super::types::{FeatureSchema, FieldDef, FieldType};

/// Validator that turns an untyped JSON value into a `StudentRecord`.
///
/// Validation is total and deterministic. The validator does not mutate
/// its input.
pub struct SchemaValidator<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator backed by the given schema.
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    /// Validates a raw record.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found. Undeclared fields are
    /// reported before declared fields, which are checked in schema order.
    pub fn validate(&self, raw: &Value) -> ValidationResult<StudentRecord> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ValidationError::malformed(json_type_name(raw)))?;

        self.reject_undeclared(obj)?;

        let mut values = Vec::with_capacity(self.schema.fields.len());
        for field in &self.schema.fields {
            let value = obj
                .get(&field.name)
                .ok_or_else(|| ValidationError::missing_field(&field.name))?;
            values.push((field.name.clone(), validate_value(field, value)?));
        }

        Ok(StudentRecord::from_values(values))
    }

    fn reject_undeclared(&self, obj: &Map<String, Value>) -> ValidationResult<()> {
        for key in obj.keys() {
            if self.schema.field(key).is_none() {
                return Err(ValidationError::undeclared_field(key));
            }
        }
        Ok(())
    }
}

/// Validates a single value against its field definition.
fn validate_value(field: &FieldDef, value: &Value) -> ValidationResult<FieldValue> {
    let name = field.name.as_str();

    match &field.field_type {
        FieldType::Int { min, max } => {
            if !value.is_i64() && !value.is_u64() {
                return Err(type_error(name, "int", value));
            }
            // u64 beyond i64::MAX is certainly above any configured max
            let v = value
                .as_i64()
                .ok_or_else(|| ValidationError::out_of_range(name, bounds(min, max), value))?;
            if v < *min || v > *max {
                return Err(ValidationError::out_of_range(name, bounds(min, max), v));
            }
            Ok(FieldValue::Int(v))
        }
        FieldType::Float { min, max } => {
            let v = value
                .as_f64()
                .ok_or_else(|| type_error(name, "float", value))?;
            if v < *min || v > *max {
                return Err(ValidationError::out_of_range(name, bounds(min, max), v));
            }
            Ok(FieldValue::Float(v))
        }
        FieldType::Category { .. } => {
            let v = value
                .as_str()
                .ok_or_else(|| type_error(name, "string", value))?;
            if field.field_type.code_of(v).is_none() {
                return Err(ValidationError::unknown_category(
                    name,
                    v,
                    field.field_type.allowed_values(),
                ));
            }
            Ok(FieldValue::Category(v.to_string()))
        }
    }
}

fn bounds<T: std::fmt::Display>(min: &T, max: &T) -> String {
    format!("[{}, {}]", min, max)
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: &str, expected: &str, actual: &Value) -> ValidationError {
    ValidationError::wrong_type(field, expected, json_type_name(actual))
}
