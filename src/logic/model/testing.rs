//! Test doubles for the model layer

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::inference::{InferenceError, Predictor};
use super::loader::{LoadFailure, ModelLoader};
use crate::logic::config::ModelSource;
use crate::logic::disease::Disease;

/// Returns the same raw output for every input
pub struct FixedPredictor {
    pub output: Result<Vec<f64>, InferenceError>,
}

impl FixedPredictor {
    pub const BACKEND: &'static str = "fixed";
}

impl Predictor for FixedPredictor {
    fn predict(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        self.output.clone()
    }

    fn backend(&self) -> &str {
        Self::BACKEND
    }
}

/// Loader that hands out `FixedPredictor`s and counts calls
pub struct StubLoader {
    output: Result<Vec<f64>, InferenceError>,
    failing: HashSet<Disease>,
    delay: Option<Duration>,
    pub loads: AtomicUsize,
}

impl StubLoader {
    pub fn returning(label: f64) -> Self {
        Self::with_output(Ok(vec![label]))
    }

    pub fn with_output(output: Result<Vec<f64>, InferenceError>) -> Self {
        Self {
            output,
            failing: HashSet::new(),
            delay: None,
            loads: AtomicUsize::new(0),
        }
    }

    /// Make `disease` fail to load with `NotFound`
    pub fn failing(mut self, disease: Disease) -> Self {
        self.failing.insert(disease);
        self
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }
}

impl ModelLoader for StubLoader {
    fn load(&self, disease: Disease, source: &ModelSource) -> Result<Arc<dyn Predictor>, LoadFailure> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if self.failing.contains(&disease) {
            return Err(LoadFailure::NotFound(source.path.clone()));
        }

        Ok(Arc::new(FixedPredictor {
            output: self.output.clone(),
        }))
    }
}
