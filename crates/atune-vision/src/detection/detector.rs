//! Arrow detector capability.
//!
//! A detector locates the arrow in a single decoded frame. Implementations
//! are swappable so the analysis stages can run on synthetic observations
//! without a real model.

use atune_models::ArrowObservation;

use crate::error::VisionResult;
use crate::frame_source::Frame;

/// Locates an arrow in one frame.
#[cfg_attr(test, mockall::automock)]
pub trait ArrowDetector: Send + Sync {
    /// Detect the arrow in `frame`.
    ///
    /// A frame without an arrow returns `Ok(None)`. Errors are reserved for
    /// backend failures (model crash, corrupt frame buffer).
    ///
    /// # Arguments
    /// * `frame` - Decoded frame, carrying its index and timestamp
    /// * `fps` - Frame rate of the video
    fn detect(&self, frame: &Frame, fps: f64) -> VisionResult<Option<ArrowObservation>>;

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

/// Placeholder detector that never reports an arrow.
///
/// Runs against this backend always produce an empty trajectory and an
/// `unknown` classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDetector;

impl ArrowDetector for NullDetector {
    fn detect(&self, _frame: &Frame, _fps: f64) -> VisionResult<Option<ArrowObservation>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
