//! Shot analysis handlers.

use atune_models::{
    AnalyzeTrajectoryRequest, AnalyzeVideoRequest, DetectorKind, Trajectory, TuningResult,
};
use atune_vision::{ArrowTuningPipeline, DetectorBuilder, FrameRange, RuleBasedClassifier};
use axum::extract::State;
use axum::Json;
use tracing::info;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::media::resolve_media_path;
use crate::state::AppState;

/// Analyze observations detected elsewhere.
pub async fn analyze_trajectory(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTrajectoryRequest>,
) -> ApiResult<Json<TuningResult>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let trajectory = Trajectory::new(request.observations)?;
    info!(points = trajectory.len(), "Analyzing submitted trajectory");

    Ok(Json(state.pipeline.analyze_trajectory(trajectory, 0)))
}

/// Run the full pipeline on a video under the media root.
pub async fn analyze_video(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeVideoRequest>,
) -> ApiResult<Json<TuningResult>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    request.check_range().map_err(ApiError::bad_request)?;

    let media_root = &state.config.media_root;
    let video_path = resolve_media_path(media_root, &request.video_path, "Video")?;

    let detector = match &request.detections_path {
        Some(path) => {
            let path = resolve_media_path(media_root, path, "Detections file")?;
            DetectorBuilder::for_kind(DetectorKind::Replay)
                .detections(path)
                .build()
                .await?
        }
        None => DetectorBuilder::for_kind(DetectorKind::None).build().await?,
    };

    let config = state.pipeline_config.clone();
    let classifier = RuleBasedClassifier::new(config.lateral_threshold_px);
    let pipeline = ArrowTuningPipeline::new(config, detector, Box::new(classifier))?;

    info!(
        video = %video_path.display(),
        start_frame = request.start_frame,
        end_frame = ?request.end_frame,
        "Analyzing video"
    );

    let range = FrameRange::new(request.start_frame, request.end_frame);
    let result = pipeline.process_video(&video_path, range).await?;

    Ok(Json(result))
}
