//! Feature Layout - Centralized Per-Disease Schema
//!
//! **CRITICAL: This file controls the model input contract**
//!
//! ## Rules (NEVER break these):
//! 1. Field order must match the order the trained model expects
//! 2. Add / remove / reorder a field → increment SCHEMA_VERSION
//! 3. Every disease must have an entry (enforced by exhaustive match)

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::spec::FeatureSpec;
use crate::logic::disease::Disease;

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Current schema version
/// MUST be incremented when any layout changes
pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// SCHEMAS (Authoritative source)
// ============================================================================

const DIABETES: &[FeatureSpec] = &[
    FeatureSpec::int("pregnancies", 0.0, 20.0),
    FeatureSpec::int("glucose", 0.0, 300.0),
    FeatureSpec::int("blood_pressure", 0.0, 200.0),
    FeatureSpec::int("skin_thickness", 0.0, 100.0),
    FeatureSpec::int("insulin", 0.0, 1000.0),
    FeatureSpec::float("bmi", 0.0, 70.0),
    FeatureSpec::float("diabetes_pedigree_function", 0.0, 5.0),
    FeatureSpec::int("age", 0.0, 120.0),
];

const HEART_DISEASE: &[FeatureSpec] = &[
    FeatureSpec::int("age", 0.0, 120.0),
    FeatureSpec::sex("sex"),
    FeatureSpec::choice(
        "cp",
        &["typical_angina", "atypical_angina", "non_anginal_pain", "asymptomatic"],
    ),
    FeatureSpec::int("trestbps", 0.0, 250.0),
    FeatureSpec::int("chol", 0.0, 600.0),
    FeatureSpec::yes_no("fbs"),
    FeatureSpec::choice(
        "restecg",
        &["normal", "st_t_wave_abnormality", "left_ventricular_hypertrophy"],
    ),
    FeatureSpec::int("thalach", 0.0, 250.0),
    FeatureSpec::yes_no("exang"),
    FeatureSpec::float("oldpeak", 0.0, 10.0),
    FeatureSpec::choice("slope", &["upsloping", "flat", "downsloping"]),
    FeatureSpec::int("ca", 0.0, 3.0),
    FeatureSpec::choice("thal", &["normal", "fixed_defect", "reversible_defect"]),
];

const PARKINSONS: &[FeatureSpec] = &[
    // === Fundamental frequency (0-2) ===
    FeatureSpec::float("mdvp_fo_hz", 0.0, 300.0),
    FeatureSpec::float("mdvp_fhi_hz", 0.0, 600.0),
    FeatureSpec::float("mdvp_flo_hz", 0.0, 300.0),
    // === Jitter (3-7) ===
    FeatureSpec::float("mdvp_jitter_percent", 0.0, 10.0),
    FeatureSpec::float("mdvp_jitter_abs", 0.0, 1.0),
    FeatureSpec::float("mdvp_rap", 0.0, 1.0),
    FeatureSpec::float("mdvp_ppq", 0.0, 1.0),
    FeatureSpec::float("jitter_ddp", 0.0, 1.0),
    // === Shimmer (8-13) ===
    FeatureSpec::float("mdvp_shimmer", 0.0, 1.0),
    FeatureSpec::float("mdvp_shimmer_db", 0.0, 10.0),
    FeatureSpec::float("shimmer_apq3", 0.0, 1.0),
    FeatureSpec::float("shimmer_apq5", 0.0, 1.0),
    FeatureSpec::float("mdvp_apq", 0.0, 1.0),
    FeatureSpec::float("shimmer_dda", 0.0, 1.0),
    // === Harmonic (14-15) ===
    FeatureSpec::float("nhr", 0.0, 1.0),
    FeatureSpec::float("hnr", 0.0, 50.0),
    // === Nonlinear complexity (16-21) ===
    FeatureSpec::float("rpde", 0.0, 1.0),
    FeatureSpec::float("dfa", 0.0, 1.0),
    FeatureSpec::float("spread1", -10.0, 0.0),
    FeatureSpec::float("spread2", 0.0, 1.0),
    FeatureSpec::float("d2", 0.0, 10.0),
    FeatureSpec::float("ppe", 0.0, 1.0),
];

const LUNG_CANCER: &[FeatureSpec] = &[
    FeatureSpec::sex("gender"),
    FeatureSpec::int("age", 0.0, 120.0),
    FeatureSpec::yes_no("smoking"),
    FeatureSpec::yes_no("yellow_fingers"),
    FeatureSpec::yes_no("anxiety"),
    FeatureSpec::yes_no("peer_pressure"),
    FeatureSpec::yes_no("chronic_disease"),
    FeatureSpec::yes_no("fatigue"),
    FeatureSpec::yes_no("allergy"),
    FeatureSpec::yes_no("wheezing"),
    FeatureSpec::yes_no("alcohol_consuming"),
    FeatureSpec::yes_no("coughing"),
    FeatureSpec::yes_no("shortness_of_breath"),
    FeatureSpec::yes_no("swallowing_difficulty"),
    FeatureSpec::yes_no("chest_pain"),
];

const THYROID: &[FeatureSpec] = &[
    FeatureSpec::int("age", 0.0, 120.0),
    FeatureSpec::sex("sex"),
    FeatureSpec::yes_no("on_thyroxine"),
    FeatureSpec::float("tsh", 0.0, 100.0),
    FeatureSpec::yes_no("t3_measured"),
    FeatureSpec::float("t3", 0.0, 10.0),
    FeatureSpec::float("tt4", 0.0, 30.0),
];

/// Ordered feature specs the model for `disease` expects
pub fn fields_for(disease: Disease) -> &'static [FeatureSpec] {
    match disease {
        Disease::Diabetes => DIABETES,
        Disease::HeartDisease => HEART_DISEASE,
        Disease::Parkinsons => PARKINSONS,
        Disease::LungCancer => LUNG_CANCER,
        Disease::Thyroid => THYROID,
    }
}

/// Input vector length for `disease`
pub fn vector_length(disease: Disease) -> usize {
    fields_for(disease).len()
}

/// Field names in vector order
pub fn feature_names(disease: Disease) -> Vec<&'static str> {
    fields_for(disease).iter().map(|f| f.name).collect()
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

static LAYOUT_HASHES: Lazy<[u32; Disease::COUNT]> =
    Lazy::new(|| Disease::ALL.map(compute_layout_hash));

/// Compute CRC32 hash of one disease layout
/// Used to detect layout mismatches between records and the running engine
pub fn compute_layout_hash(disease: Disease) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[SCHEMA_VERSION]);
    hasher.update(disease.key().as_bytes());
    hasher.update(&[0]);

    for spec in fields_for(disease) {
        hasher.update(spec.name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash (cached)
pub fn layout_hash(disease: Disease) -> u32 {
    LAYOUT_HASHES[disease.index()]
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub disease: Disease,
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current(disease: Disease) -> Self {
        Self {
            disease,
            version: SCHEMA_VERSION,
            hash: layout_hash(disease),
            feature_count: vector_length(disease),
            feature_names: feature_names(disease).into_iter().map(String::from).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a vector's layout doesn't match the running schema
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "{disease} layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub disease: Disease,
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(
    disease: Disease,
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash(disease);

    if incoming_version != SCHEMA_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            disease,
            expected_version: SCHEMA_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but schemas are small)
pub fn feature_index(disease: Disease, name: &str) -> Option<usize> {
    fields_for(disease).iter().position(|f| f.name == name)
}

/// Get feature name by index
pub fn feature_name(disease: Disease, index: usize) -> Option<&'static str> {
    fields_for(disease).get(index).map(|f| f.name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_counts() {
        assert_eq!(vector_length(Disease::Diabetes), 8);
        assert_eq!(vector_length(Disease::HeartDisease), 13);
        assert_eq!(vector_length(Disease::Parkinsons), 22);
        assert_eq!(vector_length(Disease::LungCancer), 15);
        assert_eq!(vector_length(Disease::Thyroid), 7);
    }

    #[test]
    fn test_vector_length_matches_fields() {
        for disease in Disease::ALL {
            assert_eq!(vector_length(disease), fields_for(disease).len());
        }
    }

    #[test]
    fn test_field_names_unique_per_schema() {
        for disease in Disease::ALL {
            let mut names = feature_names(disease);
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), vector_length(disease), "{disease} has duplicate names");
        }
    }

    #[test]
    fn test_diabetes_order() {
        assert_eq!(
            feature_names(Disease::Diabetes),
            vec![
                "pregnancies",
                "glucose",
                "blood_pressure",
                "skin_thickness",
                "insulin",
                "bmi",
                "diabetes_pedigree_function",
                "age",
            ]
        );
    }

    #[test]
    fn test_thyroid_order() {
        assert_eq!(
            feature_names(Disease::Thyroid),
            vec!["age", "sex", "on_thyroxine", "tsh", "t3_measured", "t3", "tt4"]
        );
    }

    #[test]
    fn test_layout_hash_distinct_per_disease() {
        let mut hashes: Vec<u32> = Disease::ALL.iter().map(|d| layout_hash(*d)).collect();
        hashes.sort_unstable();
        hashes.dedup();
        assert_eq!(hashes.len(), Disease::COUNT);
    }

    #[test]
    fn test_layout_hash_cached_matches_computed() {
        for disease in Disease::ALL {
            assert_eq!(layout_hash(disease), compute_layout_hash(disease));
        }
    }

    #[test]
    fn test_validate_layout() {
        let hash = layout_hash(Disease::Parkinsons);
        assert!(validate_layout(Disease::Parkinsons, SCHEMA_VERSION, hash).is_ok());
        assert!(validate_layout(Disease::Parkinsons, SCHEMA_VERSION + 1, hash).is_err());
        assert!(validate_layout(Disease::Diabetes, SCHEMA_VERSION, hash).is_err());
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index(Disease::Parkinsons, "mdvp_fo_hz"), Some(0));
        assert_eq!(feature_index(Disease::Parkinsons, "spread1"), Some(18));
        assert_eq!(feature_index(Disease::Parkinsons, "ppe"), Some(21));
        assert_eq!(feature_index(Disease::Diabetes, "ppe"), None);
        assert_eq!(feature_name(Disease::LungCancer, 0), Some("gender"));
        assert_eq!(feature_name(Disease::LungCancer, 15), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current(Disease::HeartDisease);
        assert_eq!(info.version, SCHEMA_VERSION);
        assert_eq!(info.feature_count, 13);
        assert_eq!(info.feature_names[2], "cp");
    }
}
