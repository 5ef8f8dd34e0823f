//! Disease Types
//!
//! Closed set of prediction targets. Every per-disease table (schema, model
//! slot, validation policy) matches on this enum exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prediction target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    Thyroid,
}

impl Disease {
    /// All diseases in selection order
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Parkinsons,
        Disease::LungCancer,
        Disease::Thyroid,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable key used in config files and serialized records
    pub fn key(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart_disease",
            Disease::Parkinsons => "parkinsons",
            Disease::LungCancer => "lung_cancer",
            Disease::Thyroid => "thyroid",
        }
    }

    /// Name recorded in prediction history
    pub fn name(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes",
            Disease::HeartDisease => "Heart Disease",
            Disease::Parkinsons => "Parkinsons",
            Disease::LungCancer => "Lung Cancer",
            Disease::Thyroid => "Hypo-Thyroid",
        }
    }

    /// Position in `ALL`, used to index per-disease slots
    pub fn index(&self) -> usize {
        match self {
            Disease::Diabetes => 0,
            Disease::HeartDisease => 1,
            Disease::Parkinsons => 2,
            Disease::LungCancer => 3,
            Disease::Thyroid => 4,
        }
    }

    /// Diseases whose whole input is rejected when any value is negative.
    ///
    /// Only Diabetes and Thyroid carry this guard. The other three rely on
    /// their per-field ranges alone.
    pub fn requires_non_negative(&self) -> bool {
        match self {
            Disease::Diabetes | Disease::Thyroid => true,
            Disease::HeartDisease | Disease::Parkinsons | Disease::LungCancer => false,
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unrecognized disease identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disease: {0}")]
pub struct UnknownDisease(pub String);

impl FromStr for Disease {
    type Err = UnknownDisease;

    /// Accepts the key, the history name, or the "<name> Prediction" selection label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let base = trimmed
            .strip_suffix(" Prediction")
            .or_else(|| trimmed.strip_suffix(" prediction"))
            .unwrap_or(trimmed);

        Disease::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(base) || d.name().eq_ignore_ascii_case(base))
            .ok_or_else(|| UnknownDisease(s.to_string()))
    }
}
