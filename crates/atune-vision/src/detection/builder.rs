//! Detector construction by kind.

use std::path::PathBuf;

use atune_models::DetectorKind;
use tracing::info;

use super::detector::{ArrowDetector, NullDetector};
use super::replay::ReplayDetector;
use crate::error::{VisionError, VisionResult};

/// Builder for arrow detectors.
///
/// # Example
///
/// ```ignore
/// let detector = DetectorBuilder::for_kind(DetectorKind::Replay)
///     .detections("shot001.detections.json")
///     .build()
///     .await?;
/// ```
pub struct DetectorBuilder {
    kind: DetectorKind,
    detections_path: Option<PathBuf>,
}

impl DetectorBuilder {
    /// Create a builder for the specified kind.
    pub fn for_kind(kind: DetectorKind) -> Self {
        Self {
            kind,
            detections_path: None,
        }
    }

    /// Recorded detections file (required for `Replay`).
    pub fn detections(mut self, path: impl Into<PathBuf>) -> Self {
        self.detections_path = Some(path.into());
        self
    }

    /// Build the detector.
    pub async fn build(self) -> VisionResult<Box<dyn ArrowDetector>> {
        match self.kind {
            DetectorKind::None => {
                info!("Building placeholder detector (no detections)");
                Ok(Box::new(NullDetector))
            }
            DetectorKind::Replay => {
                let path = self.detections_path.ok_or_else(|| {
                    VisionError::invalid_config("replay detector requires a detections file")
                })?;
                info!(path = %path.display(), "Building replay detector");
                Ok(Box::new(ReplayDetector::load(path).await?))
            }
        }
    }
}
