//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{VisionError, VisionResult};

/// Configuration fixed at pipeline construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Frame rate assumed when the video does not report one (default: 240.0)
    pub fps: f64,

    /// Minimum detector confidence; weaker detections count as misses (default: 0.7)
    pub confidence_threshold: f64,

    /// Sideways deviation from the flight line, in pixels, beyond which a
    /// centered shot is classified as a left/right tear. `None` keeps
    /// classification angle-only (default: None)
    pub lateral_threshold_px: Option<f64>,

    /// Angular standard deviation in degrees above which a spine warning is
    /// added to the recommendations (default: 10.0)
    pub oscillation_warning_deg: f64,

    /// Frames detected in parallel per batch; 1 detects sequentially (default: 1)
    pub detection_batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fps: 240.0,
            confidence_threshold: 0.7,
            lateral_threshold_px: None,
            oscillation_warning_deg: 10.0,
            detection_batch_size: 1,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fps: std::env::var("ATUNE_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.fps),
            confidence_threshold: std::env::var("ATUNE_CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.confidence_threshold),
            lateral_threshold_px: match std::env::var("ATUNE_LATERAL_THRESHOLD_PX") {
                Ok(s) if matches!(s.to_lowercase().as_str(), "off" | "none" | "") => None,
                Ok(s) => s.parse().ok().or(defaults.lateral_threshold_px),
                Err(_) => defaults.lateral_threshold_px,
            },
            oscillation_warning_deg: std::env::var("ATUNE_OSCILLATION_WARNING_DEG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.oscillation_warning_deg),
            detection_batch_size: std::env::var("ATUNE_DETECTION_BATCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.detection_batch_size),
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> VisionResult<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(VisionError::invalid_config(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(VisionError::invalid_config(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if let Some(threshold) = self.lateral_threshold_px {
            if !(threshold.is_finite() && threshold >= 0.0) {
                return Err(VisionError::invalid_config(format!(
                    "lateral_threshold_px must be non-negative, got {}",
                    threshold
                )));
            }
        }
        if !(self.oscillation_warning_deg.is_finite() && self.oscillation_warning_deg >= 0.0) {
            return Err(VisionError::invalid_config(format!(
                "oscillation_warning_deg must be non-negative, got {}",
                self.oscillation_warning_deg
            )));
        }
        if self.detection_batch_size == 0 {
            return Err(VisionError::invalid_config(
                "detection_batch_size must be at least 1",
            ));
        }
        Ok(())
    }
}
