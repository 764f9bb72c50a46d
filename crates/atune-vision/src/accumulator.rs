//! Incremental trajectory building.

use atune_models::{ArrowObservation, Trajectory};

use crate::error::{VisionError, VisionResult};

/// Collects per-frame detections into a [`Trajectory`].
///
/// Frames must arrive in strictly increasing index order. Frames without a
/// detection are recorded as seen but add nothing; sparse detection is
/// normal. `finalize` consumes the accumulator, so nothing can be added to a
/// frozen trajectory.
#[derive(Debug, Default)]
pub struct TrajectoryAccumulator {
    observations: Vec<ArrowObservation>,
    last_frame: Option<u64>,
    frames_seen: u64,
}

impl TrajectoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed frame.
    pub fn observe(
        &mut self,
        frame_index: u64,
        detection: Option<ArrowObservation>,
    ) -> VisionResult<()> {
        if let Some(previous) = self.last_frame {
            if frame_index <= previous {
                return Err(VisionError::OutOfOrderFrame {
                    previous,
                    received: frame_index,
                });
            }
        }

        if let Some(obs) = detection {
            if obs.frame_index != frame_index {
                return Err(VisionError::FrameIndexMismatch {
                    frame_index,
                    observed: obs.frame_index,
                });
            }
            if let Some(last) = self.observations.last() {
                if obs.timestamp < last.timestamp {
                    return Err(VisionError::InvalidDetections(format!(
                        "timestamp {} at frame {} precedes {}",
                        obs.timestamp, frame_index, last.timestamp
                    )));
                }
            }
            self.observations.push(obs);
        }

        self.last_frame = Some(frame_index);
        self.frames_seen += 1;
        Ok(())
    }

    /// Frames recorded so far, with or without a detection.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Detections recorded so far.
    pub fn detections(&self) -> usize {
        self.observations.len()
    }

    /// Freeze the collected observations.
    pub fn finalize(self) -> Trajectory {
        Trajectory::from_ordered(self.observations)
    }
}
