//! Flight measurements derived from a trajectory.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named metric in a [`MeasurementSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Center-point speed in pixels per second.
    Velocity,
    /// Population standard deviation of shaft angle, degrees.
    OscillationAmplitude,
    /// Dominant angular oscillation frequency, Hz.
    OscillationFrequency,
    /// Shaft angle at the last observed frame, degrees.
    EntryAngle,
}

impl Metric {
    pub const ALL: &'static [Metric] = &[
        Metric::Velocity,
        Metric::OscillationAmplitude,
        Metric::OscillationFrequency,
        Metric::EntryAngle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Velocity => "velocity",
            Metric::OscillationAmplitude => "oscillation_amplitude",
            Metric::OscillationFrequency => "oscillation_frequency",
            Metric::EntryAngle => "entry_angle",
        }
    }

    /// Display unit for reports.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Velocity => "px/s",
            Metric::OscillationAmplitude | Metric::EntryAngle => "°",
            Metric::OscillationFrequency => "Hz",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flight measurements for one shot.
///
/// Every metric defaults to 0.0 (the empty-trajectory result). A fresh set is
/// computed for each analysis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MeasurementSet {
    pub velocity: f64,
    pub oscillation_amplitude: f64,
    pub oscillation_frequency: f64,
    pub entry_angle: f64,
    /// False when too few samples (or no angular motion) were available for
    /// spectral analysis, in which case `oscillation_frequency` is 0.0 by
    /// default rather than measured.
    #[serde(default)]
    pub oscillation_frequency_computed: bool,
}

impl MeasurementSet {
    /// Look up a metric by name.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Velocity => self.velocity,
            Metric::OscillationAmplitude => self.oscillation_amplitude,
            Metric::OscillationFrequency => self.oscillation_frequency,
            Metric::EntryAngle => self.entry_angle,
        }
    }
}
