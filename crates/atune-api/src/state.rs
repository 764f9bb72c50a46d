//! Application state.

use std::sync::Arc;

use atune_vision::{ArrowTuningPipeline, PipelineConfig, VisionResult};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline_config: PipelineConfig,
    /// Pipeline for trajectories submitted directly (no detector needed)
    pub pipeline: Arc<ArrowTuningPipeline>,
}

impl AppState {
    /// Create new application state; fails on invalid pipeline configuration.
    pub fn new(config: ApiConfig, pipeline_config: PipelineConfig) -> VisionResult<Self> {
        let pipeline = ArrowTuningPipeline::with_defaults(pipeline_config.clone())?;
        Ok(Self {
            config,
            pipeline_config,
            pipeline: Arc::new(pipeline),
        })
    }
}
