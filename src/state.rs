use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{AppConfig, AppPaths};
use crate::llm::OpenRouterProvider;
use crate::pipeline::RagPipeline;
use crate::rag::{HfEmbedder, PineconeIndex};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub paths: Arc<AppPaths>,
    pub pipeline: Arc<RagPipeline>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn initialize() -> anyhow::Result<Arc<Self>> {
        let config = AppConfig::from_env()?;
        Ok(Self::with_config(config, AppPaths::new()))
    }

    /// Builds the state from an explicit configuration. Tests use this to
    /// point the provider clients at local endpoints.
    pub fn with_config(config: AppConfig, paths: AppPaths) -> Arc<Self> {
        let config = Arc::new(config);
        let embedder = Arc::new(HfEmbedder::new(config.embedding.clone()));
        let index = Arc::new(PineconeIndex::new(config.index.clone()));
        let completions = Arc::new(OpenRouterProvider::new(config.completion.clone()));
        let pipeline = Arc::new(RagPipeline::new(
            embedder,
            index,
            completions,
            config.index.top_k,
        ));

        Arc::new(AppState {
            config,
            paths: Arc::new(paths),
            pipeline,
            started_at: Utc::now(),
        })
    }
}
