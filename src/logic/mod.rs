//! Logic Module - Prediction Engines
//!
//! ## Architecture
//! - `features/` - Per-disease feature layout + input validation
//! - `model/` - Model registry, ONNX loader, prediction dispatch
//! - `history/` - Per-session prediction log
//! - `session` - Orchestration of a single submission

pub mod config;
pub mod disease;
pub mod session;

pub mod features;
pub mod history;
pub mod model;
