//! Feature schema type definitions
//!
//! A `FeatureSchema` is the single declaration of every field a student
//! record may carry: its wire name, its numeric bounds or its categorical
//! vocabulary, and (for categories) how the encoder expands it.
//!
//! Supported field types:
//! - int: 64-bit signed integer within an inclusive range
//! - float: 64-bit floating point within an inclusive range
//! - category: string drawn from a fixed vocabulary

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One legal value of a categorical field and the code it encodes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Exact wire spelling (case-sensitive)
    pub value: String,
    /// Ordinal code emitted by the encoder
    pub code: i64,
}

impl Category {
    pub fn new(value: impl Into<String>, code: i64) -> Self {
        Self {
            value: value.into(),
            code,
        }
    }
}

/// How a categorical field is laid out in the feature vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryEncoding {
    /// One column holding the category's code
    #[default]
    Ordinal,
    /// One indicator column per vocabulary entry, in vocabulary order
    OneHot,
}

/// Field types with their constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// Integer, inclusive bounds
    Int { min: i64, max: i64 },
    /// Float, inclusive bounds. Integers are accepted.
    Float { min: f64, max: f64 },
    /// Enumerated string
    Category {
        #[serde(default)]
        encoding: CategoryEncoding,
        vocabulary: Vec<Category>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int { .. } => "int",
            FieldType::Float { .. } => "float",
            FieldType::Category { .. } => "string",
        }
    }

    /// Looks up the code of a categorical value. `None` for numeric fields
    /// and for values outside the vocabulary.
    pub fn code_of(&self, value: &str) -> Option<i64> {
        match self {
            FieldType::Category { vocabulary, .. } => vocabulary
                .iter()
                .find(|c| c.value == value)
                .map(|c| c.code),
            _ => None,
        }
    }

    /// Legal values of a categorical field, in declaration order
    pub fn allowed_values(&self) -> Vec<String> {
        match self {
            FieldType::Category { vocabulary, .. } => {
                vocabulary.iter().map(|c| c.value.clone()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// A named field of the student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Exact JSON key
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
}

impl FieldDef {
    /// Create an integer field
    pub fn int(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Int { min, max },
        }
    }

    /// Create a float field
    pub fn float(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Float { min, max },
        }
    }

    /// Create an ordinally encoded categorical field
    pub fn ordinal(name: impl Into<String>, vocabulary: Vec<Category>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Category {
                encoding: CategoryEncoding::Ordinal,
                vocabulary,
            },
        }
    }

    /// Create a one-hot encoded categorical field. Codes follow declaration order.
    pub fn one_hot(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Category {
                encoding: CategoryEncoding::OneHot,
                vocabulary: values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| Category::new(*v, i as i64))
                    .collect(),
            },
        }
    }

    /// Create a binary categorical field: `negative` → 0, `positive` → 1
    pub fn binary(name: impl Into<String>, negative: &str, positive: &str) -> Self {
        Self::ordinal(
            name,
            vec![Category::new(negative, 0), Category::new(positive, 1)],
        )
    }

    /// Create a "No"/"Yes" field
    pub fn yes_no(name: impl Into<String>) -> Self {
        Self::binary(name, "No", "Yes")
    }
}

/// The complete, ordered field set of a deployment.
///
/// Field order is the column order of the encoded feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub fields: Vec<FieldDef>,
}

impl FeatureSchema {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// The student record layout the reference model was trained on.
    pub fn student_default() -> Self {
        Self::new(vec![
            FieldDef::int("Age", 10, 25),
            FieldDef::binary("Gender", "Male", "Female"),
            FieldDef::binary("SchoolLocation", "Rural", "Urban"),
            FieldDef::ordinal(
                "ParentalEducation",
                vec![
                    Category::new("High School", 0),
                    Category::new("Bachelor", 1),
                    Category::new("Master", 2),
                    Category::new("PhD", 3),
                ],
            ),
            FieldDef::float("StudyTimeWeekly", 0.0, 60.0),
            FieldDef::int("Absences", 0, 100),
            FieldDef::yes_no("Tutoring"),
            FieldDef::yes_no("ParentalSupport"),
            FieldDef::yes_no("Extracurricular"),
            FieldDef::yes_no("Sports"),
            FieldDef::yes_no("Music"),
            FieldDef::yes_no("Volunteering"),
            FieldDef::ordinal(
                "GradeClass",
                vec![
                    Category::new("F", 0),
                    Category::new("D", 1),
                    Category::new("C", 2),
                    Category::new("B", 3),
                    Category::new("A", 4),
                ],
            ),
        ])
    }

    /// Returns the definition of a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a record)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("Schema must declare at least one field".into());
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("Field names must be non-empty".into());
            }
            if !names.insert(field.name.as_str()) {
                return Err(format!("Duplicate field '{}'", field.name));
            }

            match &field.field_type {
                FieldType::Int { min, max } => {
                    if min > max {
                        return Err(format!(
                            "Field '{}': min {} exceeds max {}",
                            field.name, min, max
                        ));
                    }
                }
                FieldType::Float { min, max } => {
                    if !min.is_finite() || !max.is_finite() || min > max {
                        return Err(format!(
                            "Field '{}': invalid bounds [{}, {}]",
                            field.name, min, max
                        ));
                    }
                }
                FieldType::Category { vocabulary, .. } => {
                    if vocabulary.is_empty() {
                        return Err(format!("Field '{}': empty vocabulary", field.name));
                    }
                    let mut values = HashSet::new();
                    let mut codes = HashSet::new();
                    for entry in vocabulary {
                        if !values.insert(entry.value.as_str()) {
                            return Err(format!(
                                "Field '{}': duplicate value '{}'",
                                field.name, entry.value
                            ));
                        }
                        if !codes.insert(entry.code) {
                            return Err(format!(
                                "Field '{}': duplicate code {}",
                                field.name, entry.code
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::student_default()
    }
}
