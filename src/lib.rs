//! Health Predict Core - Disease Risk Prediction Engine
//!
//! Loads five pre-trained binary classifiers, validates form input against a
//! fixed per-disease feature layout, dispatches to the matching model and
//! keeps a per-session prediction history.
//!
//! ## Flow
//! 1. `logic::features` - schema lookup + input validation
//! 2. `logic::model` - registry, loader, dispatcher
//! 3. `logic::history` - in-session log + aggregates
//! 4. `logic::session` - validate → predict → append in one call

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::disease::Disease;
pub use logic::features::{
    fields_for, validate, vector_length, FeatureKind, FeatureSpec, FeatureVector, RawInput,
    RawValue, ValidationError,
};
pub use logic::history::{HistoryStore, HistorySummary, PredictionRecord, RiskLabel};
pub use logic::model::{
    LoadFailure, ModelLoader, ModelRegistry, OnnxLoader, PredictionDispatcher, PredictionError,
    Predictor,
};
pub use logic::config::{EngineConfig, ModelSource};
pub use logic::session::{PredictionSession, SubmitError};

/// Install the `env_logger` backend (default filter `info`, `RUST_LOG` overrides).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);
}
