//! Prediction Session - validate → predict → record
//!
//! Owns the dispatcher and the history for one user session. A submission
//! only reaches the history when every step succeeded.

use std::sync::Arc;

use super::disease::Disease;
use super::features::{self, FeatureSpec, RawInput, ValidationError};
use super::history::{HistoryStore, PredictionRecord};
use super::model::{ModelRegistry, PredictionDispatcher, PredictionError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    /// The blocking task running an async submission did not complete
    #[error("prediction task interrupted: {0}")]
    Interrupted(String),
}

#[derive(Debug, Clone)]
pub struct PredictionSession {
    dispatcher: PredictionDispatcher,
    history: Arc<HistoryStore>,
}

impl PredictionSession {
    /// New session with an empty history
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self::with_history(registry, Arc::new(HistoryStore::new()))
    }

    pub fn with_history(registry: Arc<ModelRegistry>, history: Arc<HistoryStore>) -> Self {
        Self {
            dispatcher: PredictionDispatcher::new(registry),
            history,
        }
    }

    /// Validate `raw`, run the disease model and append the result to history
    pub fn submit(&self, disease: Disease, raw: &RawInput) -> Result<PredictionRecord, SubmitError> {
        Self::run(&self.dispatcher, &self.history, disease, raw)
    }

    /// Same as `submit`, with validation and inference on a blocking thread
    pub async fn submit_async(
        &self,
        disease: Disease,
        raw: RawInput,
    ) -> Result<PredictionRecord, SubmitError> {
        let dispatcher = self.dispatcher.clone();
        let history = Arc::clone(&self.history);

        tokio::task::spawn_blocking(move || Self::run(&dispatcher, &history, disease, &raw))
            .await
            .map_err(|e| SubmitError::Interrupted(e.to_string()))?
    }

    fn run(
        dispatcher: &PredictionDispatcher,
        history: &HistoryStore,
        disease: Disease,
        raw: &RawInput,
    ) -> Result<PredictionRecord, SubmitError> {
        let vector = features::validate(disease, raw).map_err(|e| {
            log::warn!("{} input rejected: {}", disease, e);
            e
        })?;

        let record = dispatcher.predict(disease, &vector)?;
        history.append(record.clone());

        Ok(record)
    }

    /// Form fields for `disease`, in model input order
    pub fn fields_for(&self, disease: Disease) -> &'static [FeatureSpec] {
        features::fields_for(disease)
    }

    pub fn is_available(&self, disease: Disease) -> bool {
        self.dispatcher.registry().is_available(disease)
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        self.dispatcher.registry()
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }
}
