//! Error types for shot analysis.
//!
//! Only resource and configuration problems surface as errors. Degenerate
//! data (empty trajectory, zero elapsed time, a single observation) always
//! resolves to a documented fallback value instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while analyzing a shot.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("Cannot open video: {0}")]
    VideoUnavailable(PathBuf),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("Frame {received} received after frame {previous}")]
    OutOfOrderFrame { previous: u64, received: u64 },

    #[error("Observation for frame {observed} supplied as frame {frame_index}")]
    FrameIndexMismatch { frame_index: u64, observed: u64 },

    #[error("Arrow detection failed: {0}")]
    DetectionFailed(String),

    #[error("Detections file not found: {0}")]
    DetectionsNotFound(PathBuf),

    #[error("Invalid detections: {0}")]
    InvalidDetections(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VisionError {
    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True when the video itself could not be read.
    pub fn is_video_unavailable(&self) -> bool {
        matches!(
            self,
            VisionError::VideoUnavailable(_) | VisionError::InvalidVideo(_)
        )
    }
}
