//! Engine Configuration
//!
//! Where each disease model lives. Can be loaded from a JSON file, from the
//! environment, or built in code.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::disease::Disease;

// ============================================================================
// MODEL SOURCE
// ============================================================================

/// Location of one model artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSource {
    pub path: PathBuf,
    /// Expected SHA-256 (hex); verified before loading when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl ModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sha256: None,
        }
    }

    pub fn with_sha256(mut self, digest: impl Into<String>) -> Self {
        self.sha256 = Some(digest.into());
        self
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Disease → artifact mapping (can be loaded from config file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Diseases missing here are reported as not configured
    pub models: BTreeMap<Disease, ModelSource>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::in_dir(constants::DEFAULT_MODELS_DIR)
    }
}

impl EngineConfig {
    /// Default artifact names under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let models = Disease::ALL
            .into_iter()
            .map(|d| (d, ModelSource::new(dir.join(constants::default_artifact_name(d)))))
            .collect();

        Self { models }
    }

    /// Load from `PREDICT_CONFIG` if set, otherwise `MODELS_DIR` plus
    /// per-disease `MODEL_PATH_<KEY>` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(path) = constants::get_config_path() {
            return Self::from_file(path);
        }

        let mut config = Self::in_dir(constants::get_models_dir());
        for disease in Disease::ALL {
            if let Some(path) = constants::get_model_path_override(disease) {
                config.models.insert(disease, ModelSource::new(path));
            }
        }

        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "Engine config loaded from {} ({} models)",
            path.display(),
            config.models.len()
        );

        Ok(config)
    }

    pub fn source(&self, disease: Disease) -> Option<&ModelSource> {
        self.models.get(&disease)
    }

    /// Replace the artifact for one disease
    pub fn with_model(mut self, disease: Disease, source: ModelSource) -> Self {
        self.models.insert(disease, source);
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
