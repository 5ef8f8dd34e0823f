//! Model Registry - One cached model slot per disease
//!
//! Each slot is loaded at most once per process. A failed load is cached as
//! permanent unavailability for that disease only; the other slots are
//! unaffected. There is no reload API.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::inference::Predictor;
use super::loader::{LoadFailure, ModelLoader, OnnxLoader};
use crate::logic::config::{EngineConfig, ModelSource};
use crate::logic::disease::Disease;

type Slot = Result<Arc<dyn Predictor>, LoadFailure>;

// ============================================================================
// STATE
// ============================================================================

/// Process-wide registry built from the environment (see `shared()`)
static SHARED: OnceCell<Arc<ModelRegistry>> = OnceCell::new();

// ============================================================================
// REGISTRY
// ============================================================================

pub struct ModelRegistry {
    config: EngineConfig,
    loader: Arc<dyn ModelLoader>,
    slots: [OnceCell<Slot>; Disease::COUNT],
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded: Vec<_> = Disease::ALL
            .into_iter()
            .filter(|d| matches!(self.slots[d.index()].get(), Some(Ok(_))))
            .collect();

        f.debug_struct("ModelRegistry")
            .field("config", &self.config)
            .field("loaded", &loaded)
            .finish()
    }
}

impl ModelRegistry {
    /// Load every configured model now. Failures are logged once and recorded.
    pub fn load(config: EngineConfig, loader: Arc<dyn ModelLoader>) -> Self {
        let registry = Self::lazy(config, loader);
        for disease in Disease::ALL {
            registry.slot(disease);
        }

        let available = registry.available_diseases().len();
        log::info!(
            "Model registry ready: {}/{} models available",
            available,
            Disease::COUNT
        );

        registry
    }

    /// Defer each load until the disease is first used
    pub fn lazy(config: EngineConfig, loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            config,
            loader,
            slots: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    /// Eager registry with the ONNX loader
    pub fn load_onnx(config: EngineConfig) -> Self {
        Self::load(config, Arc::new(OnnxLoader))
    }

    /// Resolve (and memoize) one slot. Concurrent callers block on the same
    /// initialization and all observe its single result.
    fn slot(&self, disease: Disease) -> &Slot {
        self.slots[disease.index()].get_or_init(|| {
            let result = match self.config.source(disease) {
                Some(source) => self.loader.load(disease, source),
                None => Err(LoadFailure::NotConfigured(disease)),
            };

            if let Err(e) = &result {
                log::error!("{} model unavailable: {}", disease, e);
            }

            result
        })
    }

    pub fn is_available(&self, disease: Disease) -> bool {
        self.slot(disease).is_ok()
    }

    /// Loaded model for `disease`, or the reason it is unavailable
    pub fn get(&self, disease: Disease) -> Result<Arc<dyn Predictor>, LoadFailure> {
        self.slot(disease).clone()
    }

    pub fn load_failure(&self, disease: Disease) -> Option<LoadFailure> {
        self.slot(disease).as_ref().err().cloned()
    }

    /// Availability flag for every disease, in selection order
    pub fn availability(&self) -> BTreeMap<Disease, bool> {
        Disease::ALL
            .into_iter()
            .map(|d| (d, self.is_available(d)))
            .collect()
    }

    pub fn available_diseases(&self) -> Vec<Disease> {
        Disease::ALL
            .into_iter()
            .filter(|d| self.is_available(*d))
            .collect()
    }

    pub fn source(&self, disease: Disease) -> Option<&ModelSource> {
        self.config.source(disease)
    }
}

// ============================================================================
// SHARED INSTANCE
// ============================================================================

/// Process-wide registry with ONNX models, built once from `EngineConfig::from_env()`.
///
/// A broken config file falls back to the default layout so that every
/// disease is still attempted.
pub fn shared() -> Arc<ModelRegistry> {
    SHARED
        .get_or_init(|| {
            let config = EngineConfig::from_env().unwrap_or_else(|e| {
                log::error!("{} - falling back to default model paths", e);
                EngineConfig::default()
            });
            Arc::new(ModelRegistry::load_onnx(config))
        })
        .clone()
}

// ============================================================================
// TESTS
// ============================================================================
