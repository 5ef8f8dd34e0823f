//! History Store - Per-session prediction log
//!
//! Append-only between clears. Writers take the write lock, readers copy a
//! snapshot under the read lock, so a reader never sees half an append.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::Serialize;

use super::record::{PredictionRecord, RiskLabel};
use crate::logic::disease::Disease;

/// Aggregate counts taken from one snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    records: RwLock<Vec<PredictionRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end (chronological order)
    pub fn append(&self, record: PredictionRecord) {
        self.records.write().push(record);
    }

    /// Snapshot of every record, oldest first
    pub fn all(&self) -> Vec<PredictionRecord> {
        self.records.read().clone()
    }

    pub fn count_total(&self) -> usize {
        self.records.read().len()
    }

    pub fn count_by_label(&self, label: RiskLabel) -> usize {
        self.records
            .read()
            .iter()
            .filter(|r| r.label() == label)
            .count()
    }

    pub fn summary(&self) -> HistorySummary {
        let records = self.records.read();
        let positive = records.iter().filter(|r| r.is_positive()).count();

        HistorySummary {
            total: records.len(),
            positive,
            negative: records.len() - positive,
        }
    }

    /// Predictions per disease; diseases never predicted are omitted
    pub fn count_by_disease(&self) -> BTreeMap<Disease, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records.read().iter() {
            *counts.entry(record.disease()).or_insert(0) += 1;
        }
        counts
    }

    pub fn latest(&self) -> Option<PredictionRecord> {
        self.records.read().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Discard every record
    pub fn clear(&self) {
        let removed = {
            let mut records = self.records.write();
            let n = records.len();
            records.clear();
            n
        };
        log::info!("Cleared prediction history ({} records)", removed);
    }
}
