//! Input Validation - Raw form values → ordered FeatureVector
//!
//! Checks run per field in schema order; the first offending field wins.
//! Within one field the precedence is:
//!
//! 1. `MissingField`  - key absent, `null`, or blank text
//! 2. `TypeMismatch`  - not a number / not integral for an integer field
//! 3. `InvalidEnum`   - ordinal or tag outside the label set
//! 4. `NegativeValue` - value < 0, Diabetes and Thyroid only
//! 5. `OutOfRange`    - outside the inclusive `[min, max]` bounds
//!
//! Validation is all-or-nothing: no partial vectors.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout::fields_for;
use super::spec::{Bounds, FeatureKind, FeatureSpec};
use super::vector::FeatureVector;
use crate::logic::disease::Disease;

// ============================================================================
// RAW INPUT
// ============================================================================

/// One raw form value as supplied by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Field name → raw value
pub type RawInput = HashMap<String, RawValue>;

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Int(i) => write!(f, "{}", i),
            RawValue::Float(x) => write!(f, "{}", x),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(v as i64)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a submission was rejected; always names the offending field
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing value for '{0}'")]
    MissingField(String),

    #[error("'{0}' must be a number of the declared type")]
    TypeMismatch(String),

    #[error("'{field}' = {value} is outside {bounds}")]
    OutOfRange {
        field: String,
        value: f64,
        bounds: Bounds,
    },

    #[error("'{field}' = {value} is not one of {allowed:?}")]
    InvalidEnum {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("'{field}' = {value} is negative; all values must be non-negative")]
    NegativeValue { field: String, value: f64 },
}

impl ValidationError {
    /// Name of the field that failed
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField(field) | ValidationError::TypeMismatch(field) => field,
            ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidEnum { field, .. }
            | ValidationError::NegativeValue { field, .. } => field,
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate `raw` against the schema of `disease`.
///
/// Keys not in the schema are ignored. On success the vector has exactly
/// `vector_length(disease)` values in schema order.
pub fn validate(disease: Disease, raw: &RawInput) -> Result<FeatureVector, ValidationError> {
    let fields = fields_for(disease);
    let mut values = Vec::with_capacity(fields.len());

    for spec in fields {
        let value = coerce_field(spec, raw.get(spec.name))?;

        if disease.requires_non_negative() && value < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: spec.name.to_string(),
                value,
            });
        }

        let bounds = spec.bounds();
        if !bounds.contains(value) {
            return Err(ValidationError::OutOfRange {
                field: spec.name.to_string(),
                value,
                bounds,
            });
        }

        values.push(value);
    }

    if log::log_enabled!(log::Level::Debug) {
        let unknown: Vec<&String> = raw
            .keys()
            .filter(|k| !fields.iter().any(|f| f.name == k.as_str()))
            .collect();
        if !unknown.is_empty() {
            log::debug!("Ignoring unknown fields for {}: {:?}", disease, unknown);
        }
    }

    Ok(FeatureVector::from_validated(disease, values))
}

/// Coerce one raw value to its numeric representation (type + enum checks only)
fn coerce_field(spec: &FeatureSpec, raw: Option<&RawValue>) -> Result<f64, ValidationError> {
    let missing = || ValidationError::MissingField(spec.name.to_string());
    let mismatch = || ValidationError::TypeMismatch(spec.name.to_string());

    let raw = match raw {
        None | Some(RawValue::Null) => return Err(missing()),
        Some(RawValue::Text(s)) if s.trim().is_empty() => return Err(missing()),
        Some(raw) => raw,
    };

    match spec.kind {
        FeatureKind::Float { .. } => parse_number(raw).ok_or_else(mismatch),

        FeatureKind::Integer { .. } => {
            let value = parse_number(raw).ok_or_else(mismatch)?;
            if value.fract() != 0.0 {
                return Err(mismatch());
            }
            Ok(value)
        }

        FeatureKind::Binary { .. } | FeatureKind::Enum { .. } => {
            let labels = spec.kind.labels();
            let invalid = || ValidationError::InvalidEnum {
                field: spec.name.to_string(),
                value: raw.to_string(),
                allowed: labels.iter().map(|l| l.to_string()).collect(),
            };

            let ordinal = match raw {
                RawValue::Bool(b) if labels.len() == 2 => f64::from(u8::from(*b)),
                RawValue::Bool(_) => return Err(mismatch()),
                RawValue::Text(s) => match labels.iter().position(|l| l.eq_ignore_ascii_case(s.trim())) {
                    Some(index) => index as f64,
                    None => parse_number(raw).ok_or_else(invalid)?,
                },
                _ => parse_number(raw).ok_or_else(mismatch)?,
            };

            if ordinal.fract() != 0.0 || ordinal < 0.0 || ordinal >= labels.len() as f64 {
                return Err(invalid());
            }
            Ok(ordinal)
        }
    }
}

/// Finite number from an int, float or numeric text; bools are not numbers here
fn parse_number(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Int(i) => *i as f64,
        RawValue::Float(x) => *x,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Null | RawValue::Bool(_) => return None,
    };
    value.is_finite().then_some(value)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, RawValue)]) -> RawInput {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn diabetes_input() -> RawInput {
        input(&[
            ("pregnancies", 2.into()),
            ("glucose", 130.into()),
            ("blood_pressure", 70.into()),
            ("skin_thickness", 20.into()),
            ("insulin", 80.into()),
            ("bmi", 28.5.into()),
            ("diabetes_pedigree_function", 0.5.into()),
            ("age", 35.into()),
        ])
    }

    #[test]
    fn test_diabetes_scenario() {
        let vector = validate(Disease::Diabetes, &diabetes_input()).unwrap();
        assert_eq!(
            vector.as_slice(),
            &[2.0, 130.0, 70.0, 20.0, 80.0, 28.5, 0.5, 35.0]
        );
        assert_eq!(vector.disease(), Disease::Diabetes);
    }

    #[test]
    fn test_missing_field() {
        let mut raw = diabetes_input();
        raw.remove("insulin");
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::MissingField("insulin".into()))
        );

        let mut raw = diabetes_input();
        raw.insert("bmi".into(), RawValue::Null);
        assert_eq!(
            validate(Disease::Diabetes, &raw).unwrap_err().field(),
            "bmi"
        );

        let mut raw = diabetes_input();
        raw.insert("glucose".into(), "   ".into());
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::MissingField("glucose".into()))
        );
    }

    #[test]
    fn test_type_mismatch() {
        let mut raw = diabetes_input();
        raw.insert("glucose".into(), "high".into());
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::TypeMismatch("glucose".into()))
        );
    }

    #[test]
    fn test_integer_field_rejects_fraction() {
        let mut raw = diabetes_input();
        raw.insert("pregnancies".into(), 2.5.into());
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::TypeMismatch("pregnancies".into()))
        );
    }

    #[test]
    fn test_integer_field_accepts_integral_float_and_text() {
        let mut raw = diabetes_input();
        raw.insert("pregnancies".into(), 3.0.into());
        raw.insert("age".into(), " 41 ".into());
        let vector = validate(Disease::Diabetes, &raw).unwrap();
        assert_eq!(vector.get_by_name("pregnancies"), Some(3.0));
        assert_eq!(vector.get_by_name("age"), Some(41.0));
    }

    #[test]
    fn test_float_field_accepts_integer() {
        let mut raw = diabetes_input();
        raw.insert("bmi".into(), 30.into());
        assert_eq!(
            validate(Disease::Diabetes, &raw).unwrap().get_by_name("bmi"),
            Some(30.0)
        );
    }

    #[test]
    fn test_non_finite_is_type_mismatch() {
        let mut raw = diabetes_input();
        raw.insert("bmi".into(), f64::NAN.into());
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::TypeMismatch("bmi".into()))
        );
    }

    #[test]
    fn test_out_of_range() {
        let mut raw = diabetes_input();
        raw.insert("glucose".into(), 301.into());
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::OutOfRange {
                field: "glucose".into(),
                value: 301.0,
                bounds: Bounds::new(0.0, 300.0),
            })
        );
    }

    #[test]
    fn test_negative_age_diabetes_is_negative_value() {
        let mut raw = diabetes_input();
        raw.insert("age".into(), (-5).into());
        assert_eq!(
            validate(Disease::Diabetes, &raw),
            Err(ValidationError::NegativeValue {
                field: "age".into(),
                value: -5.0,
            })
        );
    }

    #[test]
    fn test_first_offending_field_wins() {
        let mut raw = diabetes_input();
        raw.insert("glucose".into(), 999.into());
        raw.remove("age");
        assert_eq!(validate(Disease::Diabetes, &raw).unwrap_err().field(), "glucose");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut raw = diabetes_input();
        raw.insert("favourite_colour".into(), "blue".into());
        assert!(validate(Disease::Diabetes, &raw).is_ok());
    }

    #[test]
    fn test_enum_accepts_ordinal_tag_and_bool() {
        let spec = FeatureSpec::choice("slope", &["upsloping", "flat", "downsloping"]);
        assert_eq!(coerce_field(&spec, Some(&2.into())), Ok(2.0));
        assert_eq!(coerce_field(&spec, Some(&"Flat".into())), Ok(1.0));
        assert_eq!(coerce_field(&spec, Some(&"0".into())), Ok(0.0));

        let sex = FeatureSpec::sex("sex");
        assert_eq!(coerce_field(&sex, Some(&true.into())), Ok(1.0));
        assert_eq!(coerce_field(&sex, Some(&"female".into())), Ok(0.0));
    }

    #[test]
    fn test_enum_rejects_unknown_values() {
        let spec = FeatureSpec::choice("thal", &["normal", "fixed_defect", "reversible_defect"]);
        let err = coerce_field(&spec, Some(&3.into())).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidEnum {
                field: "thal".into(),
                value: "3".into(),
                allowed: vec![
                    "normal".into(),
                    "fixed_defect".into(),
                    "reversible_defect".into()
                ],
            }
        );
        assert!(matches!(
            coerce_field(&spec, Some(&"severe".into())),
            Err(ValidationError::InvalidEnum { .. })
        ));
        assert!(matches!(
            coerce_field(&spec, Some(&1.5.into())),
            Err(ValidationError::InvalidEnum { .. })
        ));
        assert_eq!(
            coerce_field(&spec, Some(&true.into())),
            Err(ValidationError::TypeMismatch("thal".into()))
        );
    }

    #[test]
    fn test_bool_not_accepted_for_numeric() {
        let spec = FeatureSpec::int("age", 0.0, 120.0);
        assert_eq!(
            coerce_field(&spec, Some(&false.into())),
            Err(ValidationError::TypeMismatch("age".into()))
        );
    }

    #[test]
    fn test_raw_input_from_json() {
        let raw: RawInput = serde_json::from_str(
            r#"{"age": 60, "sex": "male", "on_thyroxine": 0, "tsh": 2.1,
                "t3_measured": true, "t3": "1.8", "tt4": 9.5, "note": null}"#,
        )
        .unwrap();
        let vector = validate(Disease::Thyroid, &raw).unwrap();
        assert_eq!(vector.as_slice(), &[60.0, 1.0, 0.0, 2.1, 1.0, 1.8, 9.5]);
    }
}
