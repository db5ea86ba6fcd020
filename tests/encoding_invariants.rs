//! Encoding Invariant Tests
//!
//! - Encoding is deterministic and bit-identical across calls
//! - Every accepted vocabulary value has an encoder mapping
//! - Column layout is fixed by schema order
//! - Out-of-vocabulary and out-of-range values never reach the encoder

use std::sync::Arc;

use serde_json::{json, Value};
use stempredict::encoder::FeatureEncoder;
use stempredict::schema::{
    FeatureSchema, FieldDef, FieldType, SchemaValidator, ValidationErrorCode,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn scenario() -> Value {
    json!({
        "Age": 17,
        "Gender": "Female",
        "SchoolLocation": "Urban",
        "ParentalEducation": "Bachelor",
        "StudyTimeWeekly": 12.5,
        "Absences": 3,
        "Tutoring": "Yes",
        "ParentalSupport": "No",
        "Extracurricular": "Yes",
        "Sports": "No",
        "Music": "No",
        "Volunteering": "Yes",
        "GradeClass": "B"
    })
}

fn encode(schema: &FeatureSchema, raw: &Value) -> Vec<f64> {
    let record = SchemaValidator::new(schema).validate(raw).unwrap();
    let encoder = FeatureEncoder::new(Arc::new(schema.clone()));
    encoder.encode(&record).unwrap().as_slice().to_vec()
}

// =============================================================================
// Canonical Layout Tests
// =============================================================================

/// The reference record encodes to the documented vector.
#[test]
fn test_scenario_vector() {
    let schema = FeatureSchema::student_default();
    assert_eq!(
        encode(&schema, &scenario()),
        vec![17.0, 1.0, 1.0, 1.0, 12.5, 3.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 3.0]
    );
}

/// Key order in the request does not affect column order.
#[test]
fn test_request_key_order_irrelevant() {
    let schema = FeatureSchema::student_default();
    let reversed: serde_json::Map<String, Value> = scenario()
        .as_object()
        .unwrap()
        .iter()
        .rev()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    assert_eq!(
        encode(&schema, &Value::Object(reversed)),
        encode(&schema, &scenario())
    );
}

/// Encoder columns follow schema order, one per ordinal field.
#[test]
fn test_columns_follow_schema() {
    let schema = FeatureSchema::student_default();
    let encoder = FeatureEncoder::new(Arc::new(schema.clone()));
    let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(encoder.columns(), names.as_slice());
    assert_eq!(encoder.width(), 13);
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Repeated encoding yields bit-identical vectors.
#[test]
fn test_encoding_is_bit_identical() {
    let schema = FeatureSchema::student_default();
    let record = SchemaValidator::new(&schema).validate(&scenario()).unwrap();
    let encoder = FeatureEncoder::new(Arc::new(schema.clone()));

    let first = encoder.encode(&record).unwrap().to_bits();
    for _ in 0..100 {
        assert_eq!(encoder.encode(&record).unwrap().to_bits(), first);
    }
}

// =============================================================================
// Vocabulary Coverage Tests
// =============================================================================

/// Every value of every vocabulary validates and encodes to its code.
#[test]
fn test_every_vocabulary_value_encodes() {
    let schema = FeatureSchema::student_default();

    for (index, field) in schema.fields.iter().enumerate() {
        let FieldType::Category { vocabulary, .. } = &field.field_type else {
            continue;
        };

        for category in vocabulary {
            let mut raw = scenario();
            raw[field.name.as_str()] = json!(category.value);

            let vector = encode(&schema, &raw);
            assert_eq!(
                vector[index], category.code as f64,
                "{} = {}",
                field.name, category.value
            );
        }
    }
}

/// Values outside the vocabulary are rejected, never defaulted.
#[test]
fn test_unknown_categories_rejected() {
    let schema = FeatureSchema::student_default();
    let validator = SchemaValidator::new(&schema);

    for (field, value) in [
        ("Gender", "Other"),
        ("Gender", "female"),
        ("ParentalEducation", "Doctorate"),
        ("GradeClass", "E"),
        ("Tutoring", "yes"),
    ] {
        let mut raw = scenario();
        raw[field] = json!(value);

        let err = validator.validate(&raw).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::UnknownCategory);
        assert_eq!(err.field(), field);
        assert!(err.details().allowed.is_some());
    }
}

/// Numeric bounds are inclusive.
#[test]
fn test_numeric_bounds() {
    let schema = FeatureSchema::student_default();
    let validator = SchemaValidator::new(&schema);

    for (field, value, ok) in [
        ("Age", json!(10), true),
        ("Age", json!(25), true),
        ("Age", json!(9), false),
        ("Age", json!(26), false),
        ("StudyTimeWeekly", json!(0), true),
        ("StudyTimeWeekly", json!(60.0), true),
        ("StudyTimeWeekly", json!(60.01), false),
        ("Absences", json!(-1), false),
        ("Absences", json!(100), true),
    ] {
        let mut raw = scenario();
        raw[field] = value.clone();
        assert_eq!(
            validator.validate(&raw).is_ok(),
            ok,
            "{} = {}",
            field,
            value
        );
    }
}

// =============================================================================
// One-Hot Layout Tests
// =============================================================================

/// A one-hot field expands into one indicator column per value.
#[test]
fn test_one_hot_layout() {
    let schema = FeatureSchema::new(vec![
        FieldDef::int("Age", 10, 25),
        FieldDef::one_hot("Ethnicity", &["Caucasian", "African American", "Asian", "Other"]),
    ]);
    let encoder = FeatureEncoder::new(Arc::new(schema.clone()));

    assert_eq!(
        encoder.columns(),
        [
            "Age",
            "Ethnicity_Caucasian",
            "Ethnicity_African American",
            "Ethnicity_Asian",
            "Ethnicity_Other"
        ]
    );

    let vector = encode(&schema, &json!({"Age": 15, "Ethnicity": "Asian"}));
    assert_eq!(vector, vec![15.0, 0.0, 0.0, 1.0, 0.0]);
}
