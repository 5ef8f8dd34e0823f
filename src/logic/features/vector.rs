//! Feature Vector - Validated model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Only `validate()` builds these from user input, so a `FeatureVector`
//! always has the exact length and order of its disease schema.

use serde::Serialize;

use super::layout::{
    feature_index, feature_names, layout_hash, validate_layout, vector_length,
    LayoutMismatchError, SCHEMA_VERSION,
};
use crate::logic::disease::Disease;

/// Ordered numeric input for one disease model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    disease: Disease,
    /// Schema version the values were validated against
    version: u8,
    /// CRC32 hash of the disease layout (for mismatch detection)
    layout_hash: u32,
    /// Values in schema order
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap already-ordered values; `None` unless the length matches the schema
    #[cfg(test)]
    pub(crate) fn from_values(disease: Disease, values: Vec<f64>) -> Option<Self> {
        if values.len() != vector_length(disease) {
            return None;
        }

        Some(Self {
            disease,
            version: SCHEMA_VERSION,
            layout_hash: layout_hash(disease),
            values,
        })
    }

    /// Built by `validate()`, which pushes exactly one value per schema field
    pub(super) fn from_validated(disease: Disease, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), vector_length(disease));
        Self {
            disease,
            version: SCHEMA_VERSION,
            layout_hash: layout_hash(disease),
            values,
        }
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(self.disease, name).and_then(|i| self.get(i))
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.disease, self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "disease": self.disease.key(),
            "schema_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": feature_names(self.disease)
                .into_iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
