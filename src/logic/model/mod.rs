//! Model Module - Per-Disease Model Artifacts
//!
//! Tách loading (registry) khỏi inference (dispatch).
//! Every disease has its own model slot; one failure never affects another.

pub mod dispatch;
pub mod inference;
pub mod loader;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

// Re-export common types
pub use dispatch::{PredictionDispatcher, PredictionError};
pub use inference::{InferenceError, OnnxPredictor, Predictor};
pub use loader::{sha256_hex, LoadFailure, ModelLoader, OnnxLoader};
pub use registry::{shared, ModelRegistry};
