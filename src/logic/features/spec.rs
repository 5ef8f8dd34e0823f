//! Feature Spec - Per-field type and range
//!
//! KHÔNG chứa logic validation - chỉ data structures.

use std::fmt;

use serde::Serialize;

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Semantic type of one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureKind {
    /// Whole number within bounds
    Integer { min: f64, max: f64 },
    /// Real number within bounds
    Float { min: f64, max: f64 },
    /// Two-state flag, ordinal 0 or 1
    Binary { labels: [&'static str; 2] },
    /// Fixed label set, ordinal 0..labels.len()
    Enum { labels: &'static [&'static str] },
}

impl FeatureKind {
    /// Machine labels for enum kinds, empty for numeric kinds
    pub fn labels(&self) -> &[&'static str] {
        match self {
            FeatureKind::Binary { labels } => &labels[..],
            FeatureKind::Enum { labels } => *labels,
            FeatureKind::Integer { .. } | FeatureKind::Float { .. } => &[],
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, FeatureKind::Binary { .. } | FeatureKind::Enum { .. })
    }
}

/// One entry of a disease's feature schema
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FeatureKind,
}

pub const NO_YES: [&str; 2] = ["no", "yes"];
pub const FEMALE_MALE: [&str; 2] = ["female", "male"];

impl FeatureSpec {
    pub const fn int(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, kind: FeatureKind::Integer { min, max } }
    }

    pub const fn float(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, kind: FeatureKind::Float { min, max } }
    }

    pub const fn yes_no(name: &'static str) -> Self {
        Self { name, kind: FeatureKind::Binary { labels: NO_YES } }
    }

    pub const fn sex(name: &'static str) -> Self {
        Self { name, kind: FeatureKind::Binary { labels: FEMALE_MALE } }
    }

    pub const fn choice(name: &'static str, labels: &'static [&'static str]) -> Self {
        Self { name, kind: FeatureKind::Enum { labels } }
    }

    /// Valid numeric range; enum kinds map to their ordinal range
    pub fn bounds(&self) -> Bounds {
        match self.kind {
            FeatureKind::Integer { min, max } | FeatureKind::Float { min, max } => {
                Bounds::new(min, max)
            }
            FeatureKind::Binary { .. } => Bounds::new(0.0, 1.0),
            FeatureKind::Enum { labels } => {
                Bounds::new(0.0, labels.len().saturating_sub(1) as f64)
            }
        }
    }
}
