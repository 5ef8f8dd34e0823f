//! Inference Engine - ONNX Runtime Integration
//!
//! Chạy model ONNX đã train offline.
//! Tách riêng khỏi registry để dễ swap backend.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Runtime failure inside a predictor backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

// ============================================================================
// PREDICTOR TRAIT
// ============================================================================

/// A loaded binary classifier.
///
/// Takes one ordered feature vector and returns the raw output values. The
/// dispatcher checks the output is a single label in {0, 1}.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;

    /// Backend identifier for status/logging
    fn backend(&self) -> &str;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// Preferred output name of sklearn classifiers converted to ONNX
const LABEL_OUTPUT: &str = "label";

/// Classifier backed by an ONNX Runtime session
pub struct OnnxPredictor {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxPredictor {
    /// Build a session from artifact bytes already in memory
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, InferenceError> {
        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError(format!("Load from memory error: {}", e)))?;

        Self::from_session(session)
    }

    fn from_session(session: Session) -> Result<Self, InferenceError> {
        let output_name = session
            .outputs()
            .iter()
            .find(|o| o.name() == LABEL_OUTPUT)
            .or_else(|| session.outputs().first())
            .map(|o| o.name().to_string())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        let start_time = std::time::Instant::now();

        let input: Vec<f32> = features.iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), input)
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        // sklearn label outputs are int64; regressors/wrapped models emit f32
        let values: Vec<f64> = match output.try_extract_tensor::<i64>() {
            Ok((_, data)) => data.iter().map(|v| *v as f64).collect(),
            Err(_) => output
                .try_extract_tensor::<f32>()
                .map_err(|e| InferenceError(format!("Extract error: {}", e)))?
                .1
                .iter()
                .map(|v| *v as f64)
                .collect(),
        };

        log::debug!(
            "ONNX inference took {}us",
            start_time.elapsed().as_micros()
        );

        Ok(values)
    }

    fn backend(&self) -> &str {
        "onnx"
    }
}
