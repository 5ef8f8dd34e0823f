//! API Module
//!
//! Read-only snapshots for a presentation layer. No transport here; callers
//! serialize these however they expose them.

pub mod engine_status;

pub use engine_status::{get_engine_status, EngineStatus, ModelStatus};
