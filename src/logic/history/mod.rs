//! History Module - Session Prediction Log
//!
//! In-memory only. Lives as long as the owning session.

pub mod export;
pub mod record;
pub mod store;


// Re-export common types
pub use export::{default_export_dir, to_jsonl};
pub use record::{PredictionRecord, RiskLabel};
pub use store::{HistoryStore, HistorySummary};
