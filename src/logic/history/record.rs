use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::logic::disease::Disease;
use crate::logic::features::FeatureVector;

/// Binary model outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLabel {
    /// 0 - lower likelihood
    Negative,
    /// 1 - higher likelihood
    Positive,
}

impl RiskLabel {
    /// Interpret a raw model output; only exact 0 and 1 are valid
    pub fn from_raw(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(RiskLabel::Negative)
        } else if value == 1.0 {
            Some(RiskLabel::Positive)
        } else {
            None
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            RiskLabel::Negative => 0,
            RiskLabel::Positive => 1,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, RiskLabel::Positive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Negative => "negative",
            RiskLabel::Positive => "positive",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Recorded as the raw 0/1 label
impl Serialize for RiskLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// One successful prediction. Built only by the dispatcher; read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    id: Uuid,
    disease: Disease,

    // ✅ Feature contract
    schema_version: u8,
    layout_hash: u32,
    features: Vec<f64>,

    // ✅ Model output
    label: RiskLabel,

    timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    pub(crate) fn new(vector: &FeatureVector, label: RiskLabel, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            disease: vector.disease(),
            schema_version: vector.version(),
            layout_hash: vector.layout_hash(),
            features: vector.as_slice().to_vec(),
            label,
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn schema_version(&self) -> u8 {
        self.schema_version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Input vector in schema order
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> RiskLabel {
        self.label
    }

    pub fn is_positive(&self) -> bool {
        self.label.is_positive()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_only_zero_and_one() {
        assert_eq!(RiskLabel::from_raw(0.0), Some(RiskLabel::Negative));
        assert_eq!(RiskLabel::from_raw(1.0), Some(RiskLabel::Positive));
        assert_eq!(RiskLabel::from_raw(2.0), None);
        assert_eq!(RiskLabel::from_raw(0.5), None);
        assert_eq!(RiskLabel::from_raw(-1.0), None);
        assert_eq!(RiskLabel::from_raw(f64::NAN), None);
    }

    #[test]
    fn test_record_serializes_raw_label() {
        let vector = FeatureVector::from_values(Disease::Thyroid, vec![0.0; 7]).unwrap();
        let record = PredictionRecord::new(&vector, RiskLabel::Positive, Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["label"], 1);
        assert_eq!(json["disease"], "thyroid");
        assert_eq!(json["features"].as_array().unwrap().len(), 7);
    }
}
