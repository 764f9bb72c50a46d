//! Frozen, ordered sequence of arrow observations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::observation::ArrowObservation;

/// Errors raised when an observation sequence breaks trajectory invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("Frame index {current} does not follow {previous}")]
    NonIncreasingFrame { previous: u64, current: u64 },

    #[error("Timestamp {current} at frame {frame_index} precedes {previous}")]
    DecreasingTimestamp {
        frame_index: u64,
        previous: f64,
        current: f64,
    },

    #[error("Invalid observation at frame {frame_index}: {message}")]
    InvalidObservation { frame_index: u64, message: String },
}

/// Ordered arrow observations for one shot.
///
/// Frame indices strictly increase and timestamps never decrease. The
/// sequence may be empty when nothing was detected in the clip. Once built,
/// a trajectory is read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Trajectory {
    observations: Vec<ArrowObservation>,
}

impl Trajectory {
    /// Build a trajectory, checking ordering and per-observation validity.
    pub fn new(observations: Vec<ArrowObservation>) -> Result<Self, TrajectoryError> {
        for obs in &observations {
            if let Err(e) = obs.validate() {
                return Err(TrajectoryError::InvalidObservation {
                    frame_index: obs.frame_index,
                    message: e.to_string(),
                });
            }
            if !obs.is_finite() {
                return Err(TrajectoryError::InvalidObservation {
                    frame_index: obs.frame_index,
                    message: "non-finite value".to_string(),
                });
            }
        }

        for pair in observations.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if curr.frame_index <= prev.frame_index {
                return Err(TrajectoryError::NonIncreasingFrame {
                    previous: prev.frame_index,
                    current: curr.frame_index,
                });
            }
            if curr.timestamp < prev.timestamp {
                return Err(TrajectoryError::DecreasingTimestamp {
                    frame_index: curr.frame_index,
                    previous: prev.timestamp,
                    current: curr.timestamp,
                });
            }
        }

        Ok(Self { observations })
    }

    /// Empty trajectory (no detections).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap observations the caller has already ordered.
    ///
    /// Used by the accumulator, which enforces ordering as it goes.
    #[doc(hidden)]
    pub fn from_ordered(observations: Vec<ArrowObservation>) -> Self {
        debug_assert!(observations
            .windows(2)
            .all(|w| w[1].frame_index > w[0].frame_index));
        Self { observations }
    }

    pub fn observations(&self) -> &[ArrowObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&ArrowObservation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&ArrowObservation> {
        self.observations.last()
    }

    /// Shaft angles in frame order.
    pub fn angles(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.angle).collect()
    }

    /// Sideways deviation of the flight path, in pixels.
    ///
    /// Measured perpendicular to the line joining the first and last centers,
    /// so travel along the flight direction never counts. Returns the signed
    /// offset of the center farthest from that line: positive lies to the
    /// right of the direction of travel in image coordinates (y down),
    /// negative to the left. Zero with fewer than three observations or when
    /// the first and last centers coincide.
    pub fn lateral_deviation(&self) -> f64 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0.0;
        };
        if self.len() < 3 {
            return 0.0;
        }

        let dx = last.center.x - first.center.x;
        let dy = last.center.y - first.center.y;
        let length = dx.hypot(dy);
        if length == 0.0 {
            return 0.0;
        }

        self.observations[1..self.len() - 1]
            .iter()
            .map(|o| {
                let (px, py) = (o.center.x - first.center.x, o.center.y - first.center.y);
                (dx * py - dy * px) / length
            })
            .fold(0.0, |widest: f64, offset| {
                if offset.abs() > widest.abs() {
                    offset
                } else {
                    widest
                }
            })
    }
}

impl<'de> Deserialize<'de> for Trajectory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let observations = Vec::<ArrowObservation>::deserialize(deserializer)?;
        Trajectory::new(observations).map_err(serde::de::Error::custom)
    }
}
