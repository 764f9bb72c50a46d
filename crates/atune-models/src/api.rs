//! Request and response bodies for the HTTP API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::observation::ArrowObservation;

/// Analyze observations produced elsewhere (no video decoding).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct AnalyzeTrajectoryRequest {
    /// Observations in ascending frame order
    #[validate(nested)]
    pub observations: Vec<ArrowObservation>,
}

/// Analyze a video file available to the server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct AnalyzeVideoRequest {
    /// Path of the video on the server
    #[validate(length(min = 1, max = 4096))]
    pub video_path: String,

    /// First frame to analyze
    #[serde(default)]
    pub start_frame: u64,

    /// Last frame to analyze (inclusive); `None` reads to the end
    #[serde(default)]
    pub end_frame: Option<u64>,

    /// Recorded detections to replay against the video
    #[serde(default)]
    pub detections_path: Option<String>,
}

impl AnalyzeVideoRequest {
    /// Check cross-field constraints the derive cannot express.
    pub fn check_range(&self) -> Result<(), String> {
        match self.end_frame {
            Some(end) if end < self.start_frame => Err(format!(
                "end_frame ({}) is before start_frame ({})",
                end, self.start_frame
            )),
            _ => Ok(()),
        }
    }
}
