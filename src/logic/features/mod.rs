//! Features Module - Per-Disease Input Contract
//!
//! Tách schema (layout) khỏi validation.
//! Model input order is defined in ONE place: `layout.rs`.

pub mod layout;
pub mod spec;
pub mod validate;
pub mod vector;


// Re-export common types
pub use layout::{
    feature_index, feature_name, feature_names, fields_for, layout_hash, vector_length,
    LayoutInfo, LayoutMismatchError, SCHEMA_VERSION,
};
pub use spec::{Bounds, FeatureKind, FeatureSpec};
pub use validate::{validate, RawInput, RawValue, ValidationError};
pub use vector::FeatureVector;
