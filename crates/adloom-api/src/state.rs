//! Application state.

use std::sync::Arc;

use adloom_client::{GeminiClient, GraphonClient, TransferClient};
use adloom_engine::{BrandingPipeline, JobRegistry, PollConfig, VideoWorkflow};
use adloom_storage::CacheStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub graphon: GraphonClient,
    pub gemini: GeminiClient,
    pub cache: CacheStore,
    pub registry: JobRegistry,
    pub workflow: Arc<VideoWorkflow>,
    pub pipeline: Arc<BrandingPipeline>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let graphon = GraphonClient::new(config.graphon_api_url.clone())?;
        let gemini = GeminiClient::new(config.gemini_api_url.clone())?;
        let transfer = TransferClient::new()?;

        let cache = CacheStore::new(config.cache_file.clone());
        let registry = JobRegistry::new();

        let workflow = VideoWorkflow::new(
            graphon.clone(),
            transfer,
            cache.clone(),
            registry.clone(),
            config.videos_dir.clone(),
            PollConfig::new(
                "File processing",
                config.file_poll_attempts,
                config.file_poll_interval,
            ),
            PollConfig::new(
                "Graph build",
                config.group_poll_attempts,
                config.group_poll_interval,
            ),
        );

        let pipeline = BrandingPipeline::new(
            gemini.clone(),
            registry.clone(),
            PollConfig::new(
                "Video generation",
                config.operation_poll_attempts,
                config.operation_poll_interval,
            ),
            config.cuts_model.clone(),
            config.branding_model.clone(),
            config.veo_model.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            graphon,
            gemini,
            cache,
            registry,
            workflow: Arc::new(workflow),
            pipeline: Arc::new(pipeline),
        })
    }
}
