//! Prediction Dispatcher - Route a validated vector to its disease model
//!
//! Không cache kết quả: same model + same vector → same label, every call.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use super::inference::InferenceError;
use super::loader::LoadFailure;
use super::registry::ModelRegistry;
use crate::logic::disease::Disease;
use crate::logic::features::FeatureVector;
use crate::logic::history::{PredictionRecord, RiskLabel};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("{disease} model is unavailable: {reason}")]
    ModelUnavailable {
        disease: Disease,
        reason: LoadFailure,
    },

    #[error("feature vector does not fit the {disease} model: {detail}")]
    VectorMismatch { disease: Disease, detail: String },

    #[error("{disease} inference failed: {reason}")]
    Inference {
        disease: Disease,
        reason: InferenceError,
    },

    #[error("{disease} model returned {output:?}, expected a single 0 or 1")]
    MalformedModelOutput { disease: Disease, output: Vec<f64> },
}

impl PredictionError {
    pub fn disease(&self) -> Disease {
        match self {
            PredictionError::ModelUnavailable { disease, .. }
            | PredictionError::VectorMismatch { disease, .. }
            | PredictionError::Inference { disease, .. }
            | PredictionError::MalformedModelOutput { disease, .. } => *disease,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionDispatcher {
    registry: Arc<ModelRegistry>,
}

impl PredictionDispatcher {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Run the disease model on `vector` and interpret its label
    pub fn predict(
        &self,
        disease: Disease,
        vector: &FeatureVector,
    ) -> Result<PredictionRecord, PredictionError> {
        let model = self.registry.get(disease).map_err(|reason| {
            log::warn!("Prediction refused, {} model unavailable: {}", disease, reason);
            PredictionError::ModelUnavailable { disease, reason }
        })?;

        if vector.disease() != disease {
            return Err(PredictionError::VectorMismatch {
                disease,
                detail: format!("vector was built for {}", vector.disease()),
            });
        }
        vector
            .validate()
            .map_err(|e| PredictionError::VectorMismatch {
                disease,
                detail: e.to_string(),
            })?;

        let start = Instant::now();
        let output = model.predict(vector.as_slice()).map_err(|reason| {
            log::error!("{} inference failed: {}", disease, reason);
            PredictionError::Inference { disease, reason }
        })?;

        let label = match output.as_slice() {
            [raw] => RiskLabel::from_raw(*raw),
            _ => None,
        };
        let Some(label) = label else {
            log::error!(
                "Malformed output from {} model ({}): {:?}",
                disease,
                model.backend(),
                output
            );
            return Err(PredictionError::MalformedModelOutput { disease, output });
        };

        let record = PredictionRecord::new(vector, label, Utc::now());
        log::info!(
            "{} prediction {} → {} ({:.2}ms)",
            disease,
            record.id(),
            label,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(record)
    }
}
