//! Final output of a tuning analysis.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::measurement::MeasurementSet;
use crate::tear::{TearClassification, TearType};
use crate::trajectory::Trajectory;

/// Tuning analysis for one shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TuningResult {
    /// Classified tear pattern
    pub tear_type: TearType,

    /// Classifier confidence in [0, 1]
    pub confidence: f64,

    /// Adjustments to make, most important first
    pub recommendations: Vec<String>,

    /// Flight measurements
    pub measurements: MeasurementSet,

    /// Observations the analysis was based on
    pub trajectory: Trajectory,

    /// Number of frames read from the source (0 when analyzing a trajectory directly)
    #[serde(default)]
    pub frames_scanned: u64,

    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
}

impl TuningResult {
    pub fn new(
        classification: TearClassification,
        recommendations: Vec<String>,
        measurements: MeasurementSet,
        trajectory: Trajectory,
        frames_scanned: u64,
    ) -> Self {
        Self {
            tear_type: classification.tear_type,
            confidence: classification.confidence,
            recommendations,
            measurements,
            trajectory,
            frames_scanned,
            analyzed_at: Utc::now(),
        }
    }

    /// The classification part of the result.
    pub fn classification(&self) -> TearClassification {
        TearClassification {
            tear_type: self.tear_type,
            confidence: self.confidence,
        }
    }

    /// Number of frames with a detected arrow.
    pub fn trajectory_points(&self) -> usize {
        self.trajectory.len()
    }
}
