//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override the defaults, see the getters below.

use crate::logic::disease::Disease;

/// Default directory holding the model artifacts
pub const DEFAULT_MODELS_DIR: &str = "Models";

/// Env var overriding the models directory
pub const MODELS_DIR_ENV: &str = "MODELS_DIR";

/// Prefix of the per-disease artifact override, e.g. `MODEL_PATH_DIABETES`
pub const MODEL_PATH_ENV_PREFIX: &str = "MODEL_PATH_";

/// Env var pointing at a JSON engine config file
pub const CONFIG_PATH_ENV: &str = "PREDICT_CONFIG";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Health-Predict";

/// Default artifact file name for each disease
pub fn default_artifact_name(disease: Disease) -> &'static str {
    match disease {
        Disease::Diabetes => "diabetes_model.onnx",
        Disease::HeartDisease => "heart_disease_model.onnx",
        Disease::Parkinsons => "parkinsons_model.onnx",
        Disease::LungCancer => "lungs_disease_model.onnx",
        Disease::Thyroid => "Thyroid_model.onnx",
    }
}

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get models directory from environment or use default
pub fn get_models_dir() -> String {
    std::env::var(MODELS_DIR_ENV).unwrap_or_else(|_| DEFAULT_MODELS_DIR.to_string())
}

/// Get the per-disease artifact override, if set
pub fn get_model_path_override(disease: Disease) -> Option<String> {
    let var = format!("{}{}", MODEL_PATH_ENV_PREFIX, disease.key().to_uppercase());
    std::env::var(var).ok().filter(|s| !s.trim().is_empty())
}

/// Get config file path from environment, if set
pub fn get_config_path() -> Option<String> {
    std::env::var(CONFIG_PATH_ENV).ok().filter(|s| !s.trim().is_empty())
}

/// Serializes tests that set the env vars above
#[cfg(test)]
pub(crate) static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
