//! Per-frame arrow detection result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::geometry::{BoundingBox, Point};

/// One frame's arrow detection.
///
/// Produced by a detector for a single frame and never mutated afterwards.
/// The center point is carried separately from the bounding box because
/// detectors may refine it (e.g. shaft midpoint rather than box center).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ArrowObservation {
    /// Index of the source frame within the video
    pub frame_index: u64,

    /// Seconds since the start of the video
    #[validate(range(min = 0.0))]
    pub timestamp: f64,

    /// Arrow bounding box in pixels
    #[validate(nested)]
    pub bbox: BoundingBox,

    /// Detection confidence in [0, 1]
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: f64,

    /// Shaft orientation in degrees relative to the horizontal axis
    pub angle: f64,

    /// Arrow center in pixels
    pub center: Point,
}

impl ArrowObservation {
    /// Create an observation whose center is the bounding box center.
    pub fn new(
        frame_index: u64,
        timestamp: f64,
        bbox: BoundingBox,
        confidence: f64,
        angle: f64,
    ) -> Self {
        Self {
            frame_index,
            timestamp,
            bbox,
            confidence,
            angle,
            center: bbox.center(),
        }
    }

    /// Override the center point.
    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    /// Check that every numeric field is finite.
    ///
    /// Range validation alone lets NaN through, so trajectories call this too.
    pub fn is_finite(&self) -> bool {
        [
            self.timestamp,
            self.confidence,
            self.angle,
            self.center.x,
            self.center.y,
            self.bbox.x,
            self.bbox.y,
            self.bbox.width,
            self.bbox.height,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
