//! Feature encoder
//!
//! Encoding rules:
//! - int/float fields pass through unchanged (ints widen to f64)
//! - ordinal categories emit the code from the vocabulary table
//! - one-hot categories emit one indicator per vocabulary entry, named
//!   `<Field>_<Value>`, in vocabulary order
//!
//! Column order is schema field order. The layout is computed once when
//! the encoder is built.

use std::sync::Arc;

use super::errors::{EncodeResult, EncodingError};
use super::vector::FeatureVector;
use crate::schema::{CategoryEncoding, FeatureSchema, FieldType, FieldValue, StudentRecord};

/// Deterministic record → vector mapping bound to one schema.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: Arc<FeatureSchema>,
    columns: Vec<String>,
}

impl FeatureEncoder {
    /// Builds the encoder and its column layout.
    pub fn new(schema: Arc<FeatureSchema>) -> Self {
        let columns = layout(&schema);
        Self { schema, columns }
    }

    /// Ordered column names of the produced vector
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns of the produced vector
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The schema this encoder was built from
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Encodes a validated record.
    ///
    /// # Errors
    ///
    /// `EncodingError` only when the record and the encoder tables
    /// disagree, which a record produced by the validator for the same
    /// schema never does.
    pub fn encode(&self, record: &StudentRecord) -> EncodeResult<FeatureVector> {
        let mut values = Vec::with_capacity(self.columns.len());

        for field in &self.schema.fields {
            let value = record
                .get(&field.name)
                .ok_or_else(|| EncodingError::MissingValue(field.name.clone()))?;

            match (&field.field_type, value) {
                (FieldType::Int { .. }, FieldValue::Int(v)) => values.push(*v as f64),
                (FieldType::Float { .. }, FieldValue::Float(v)) => values.push(*v),
                (
                    FieldType::Category {
                        encoding,
                        vocabulary,
                    },
                    FieldValue::Category(raw),
                ) => {
                    let position = vocabulary
                        .iter()
                        .position(|c| &c.value == raw)
                        .ok_or_else(|| EncodingError::UnmappedCategory {
                            field: field.name.clone(),
                            value: raw.clone(),
                        })?;

                    match encoding {
                        CategoryEncoding::Ordinal => {
                            values.push(vocabulary[position].code as f64)
                        }
                        CategoryEncoding::OneHot => values.extend(
                            (0..vocabulary.len()).map(|i| if i == position { 1.0 } else { 0.0 }),
                        ),
                    }
                }
                (field_type, value) => {
                    return Err(EncodingError::KindMismatch {
                        field: field.name.clone(),
                        expected: field_type.type_name(),
                        actual: value_kind(value),
                    })
                }
            }
        }

        if values.len() != self.columns.len() {
            return Err(EncodingError::WidthMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        Ok(FeatureVector::new(values))
    }
}

/// Computes the ordered column names for a schema.
fn layout(schema: &FeatureSchema) -> Vec<String> {
    let mut columns = Vec::new();
    for field in &schema.fields {
        match &field.field_type {
            FieldType::Category {
                encoding: CategoryEncoding::OneHot,
                vocabulary,
            } => {
                columns.extend(
                    vocabulary
                        .iter()
                        .map(|c| format!("{}_{}", field.name, c.value)),
                );
            }
            _ => columns.push(field.name.clone()),
        }
    }
    columns
}

fn value_kind(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Int(_) => "int",
        FieldValue::Float(_) => "float",
        FieldValue::Category(_) => "string",
    }
}
