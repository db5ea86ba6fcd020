//! Validated student record
//!
//! A `StudentRecord` can only be produced by `SchemaValidator`, so holding
//! one means every value has already passed its type, range and vocabulary
//! checks.

use std::fmt;

/// A single typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    /// Raw categorical spelling, guaranteed to be in the field's vocabulary
    Category(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Category(v) => write!(f, "{:?}", v),
        }
    }
}

/// Immutable, validated student record. Values are held in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    values: Vec<(String, FieldValue)>,
}

impl StudentRecord {
    pub(crate) fn from_values(values: Vec<(String, FieldValue)>) -> Self {
        Self { values }
    }

    /// Returns the value of a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterates fields in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
