use std::path::PathBuf;

use serde::Serialize;

use crate::logic::disease::Disease;
use crate::logic::features::{layout_hash, vector_length, SCHEMA_VERSION};
use crate::logic::history::HistorySummary;
use crate::logic::session::PredictionSession;

#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub schema_version: u8,
    pub models: Vec<ModelStatus>,
    pub history: HistorySummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub disease: Disease,
    pub name: String,
    pub available: bool,
    pub path: Option<PathBuf>,
    pub failure: Option<String>, // load failure message when unavailable
    pub feature_count: usize,
    pub layout_hash: u32,
}

impl EngineStatus {
    pub fn available_count(&self) -> usize {
        self.models.iter().filter(|m| m.available).count()
    }
}

/// Snapshot of every model slot plus the session history aggregates
pub fn get_engine_status(session: &PredictionSession) -> EngineStatus {
    let registry = session.registry();

    let models = Disease::ALL
        .into_iter()
        .map(|disease| {
            let failure = registry.load_failure(disease);
            ModelStatus {
                disease,
                name: disease.name().to_string(),
                available: failure.is_none(),
                path: registry.source(disease).map(|s| s.path.clone()),
                failure: failure.map(|e| e.to_string()),
                feature_count: vector_length(disease),
                layout_hash: layout_hash(disease),
            }
        })
        .collect();

    EngineStatus {
        schema_version: SCHEMA_VERSION,
        models,
        history: session.history().summary(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::logic::config::EngineConfig;
    use crate::logic::model::testing::StubLoader;
    use crate::logic::model::ModelRegistry;

    #[test]
    fn test_status_reports_each_disease() {
        let mut config = EngineConfig::in_dir("/models");
        config.models.remove(&Disease::LungCancer);
        let loader = StubLoader::returning(1.0).failing(Disease::Parkinsons);
        let registry = ModelRegistry::load(config, Arc::new(loader));
        let session = PredictionSession::new(Arc::new(registry));

        let status = get_engine_status(&session);
        assert_eq!(status.models.len(), Disease::COUNT);
        assert_eq!(status.available_count(), 3);
        assert_eq!(status.history, HistorySummary::default());

        let parkinsons = &status.models[Disease::Parkinsons.index()];
        assert!(!parkinsons.available);
        assert!(parkinsons.failure.is_some());
        assert_eq!(parkinsons.feature_count, 22);

        let lung = &status.models[Disease::LungCancer.index()];
        assert!(lung.path.is_none());
        assert!(!lung.available);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["models"][0]["disease"], "diabetes");
        assert_eq!(json["models"][0]["available"], true);
    }
}
