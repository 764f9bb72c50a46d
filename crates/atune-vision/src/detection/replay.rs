//! Replay of recorded detections.
//!
//! Lets detections produced by an external model (exported as a JSON array
//! of observations) drive the pipeline against the original video.

use std::collections::HashMap;
use std::path::Path;

use atune_models::ArrowObservation;
use tracing::info;
use validator::Validate;

use super::detector::ArrowDetector;
use crate::error::{VisionError, VisionResult};
use crate::frame_source::Frame;

/// Detector that serves pre-recorded observations by frame index.
#[derive(Debug, Clone, Default)]
pub struct ReplayDetector {
    observations: HashMap<u64, ArrowObservation>,
}

impl ReplayDetector {
    /// Build from observations in any order.
    ///
    /// Fails if two observations share a frame index or one is invalid.
    pub fn from_observations(observations: Vec<ArrowObservation>) -> VisionResult<Self> {
        let mut by_frame = HashMap::with_capacity(observations.len());
        for obs in observations {
            obs.validate().map_err(|e| {
                VisionError::InvalidDetections(format!("frame {}: {}", obs.frame_index, e))
            })?;
            if !obs.is_finite() {
                return Err(VisionError::InvalidDetections(format!(
                    "frame {}: non-finite value",
                    obs.frame_index
                )));
            }
            if by_frame.insert(obs.frame_index, obs).is_some() {
                return Err(VisionError::InvalidDetections(format!(
                    "duplicate detection for frame {}",
                    obs.frame_index
                )));
            }
        }
        Ok(Self {
            observations: by_frame,
        })
    }

    /// Load a JSON array of observations.
    pub async fn load(path: impl AsRef<Path>) -> VisionResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VisionError::DetectionsNotFound(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path).await?;
        let observations: Vec<ArrowObservation> = serde_json::from_slice(&bytes)?;
        let detector = Self::from_observations(observations)?;

        info!(
            path = %path.display(),
            detections = detector.len(),
            "Loaded recorded detections"
        );
        Ok(detector)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl ArrowDetector for ReplayDetector {
    fn detect(&self, frame: &Frame, _fps: f64) -> VisionResult<Option<ArrowObservation>> {
        Ok(self.observations.get(&frame.index).copied())
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
