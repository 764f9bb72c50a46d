//! API error types.

use atune_models::TrajectoryError;
use atune_vision::VisionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::config::is_production_environment;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid trajectory: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("Analysis error: {0}")]
    Vision(#[from] VisionError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) | ApiError::Validation(_) | ApiError::Trajectory(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Vision(e) => vision_status(e),
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message sent to the client; internal details are hidden in production.
    fn detail(&self, production: bool) -> String {
        if production && self.is_internal() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        }
    }
}

fn vision_status(error: &VisionError) -> StatusCode {
    match error {
        VisionError::VideoUnavailable(_) | VisionError::DetectionsNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        VisionError::InvalidVideo(_)
        | VisionError::InvalidDetections(_)
        | VisionError::InvalidConfig(_)
        | VisionError::OutOfOrderFrame { .. }
        | VisionError::FrameIndexMismatch { .. }
        | VisionError::JsonParse(_) => StatusCode::BAD_REQUEST,
        VisionError::FfmpegNotFound | VisionError::FfprobeNotFound => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        VisionError::FfmpegFailed { .. }
        | VisionError::FfprobeFailed { .. }
        | VisionError::DetectionFailed(_)
        | VisionError::Io(_)
        | VisionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let production = std::env::var("ENVIRONMENT")
            .map(|e| is_production_environment(&e))
            .unwrap_or(false);
        let detail = self.detail(production);

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
