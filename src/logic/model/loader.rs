//! Model Loader - Artifact → Predictor
//!
//! Verifies the artifact exists (and its SHA-256 digest when configured)
//! before handing it to the inference backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::inference::{OnnxPredictor, Predictor};
use crate::logic::config::ModelSource;
use crate::logic::disease::Disease;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Why a model could not be loaded. Non-fatal: only its disease is degraded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadFailure {
    #[error("no model configured for {0}")]
    NotConfigured(Disease),

    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("corrupt or incompatible model {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to read {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },
}

// ============================================================================
// LOADER TRAIT
// ============================================================================

/// Turns a configured artifact location into a ready predictor
pub trait ModelLoader: Send + Sync {
    fn load(&self, disease: Disease, source: &ModelSource) -> Result<Arc<dyn Predictor>, LoadFailure>;
}

/// Production loader: ONNX artifacts via ONNX Runtime
#[derive(Debug, Default, Clone, Copy)]
pub struct OnnxLoader;

impl ModelLoader for OnnxLoader {
    fn load(&self, disease: Disease, source: &ModelSource) -> Result<Arc<dyn Predictor>, LoadFailure> {
        log::info!("Loading {} model from: {}", disease, source.path.display());

        let bytes = read_verified(source)?;

        let predictor = OnnxPredictor::from_bytes(&bytes).map_err(|e| LoadFailure::Corrupt {
            path: source.path.clone(),
            reason: e.0,
        })?;

        log::info!("{} model loaded ({} bytes)", disease, bytes.len());
        Ok(Arc::new(predictor))
    }
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// SHA-256 of `bytes`, lowercase hex
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Read the artifact and check its digest against `source.sha256`, if set
pub fn read_verified(source: &ModelSource) -> Result<Vec<u8>, LoadFailure> {
    let bytes = read_artifact(&source.path)?;

    if let Some(expected) = source.sha256.as_deref() {
        let actual = sha256_hex(&bytes);
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            return Err(LoadFailure::ChecksumMismatch {
                path: source.path.clone(),
                expected: expected.to_string(),
                actual,
            });
        }
    }

    Ok(bytes)
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, LoadFailure> {
    if !path.exists() {
        return Err(LoadFailure::NotFound(path.to_path_buf()));
    }

    fs::read(path).map_err(|e| LoadFailure::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
