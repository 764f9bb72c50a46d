//! Tuning recommendations for a classified tear.

use atune_models::{MeasurementSet, TearType};

/// Angular standard deviation (degrees) above which the spine warning is added.
pub const HIGH_OSCILLATION_THRESHOLD_DEG: f64 = 10.0;

/// Appended after the base recommendations when the shaft oscillates heavily.
pub const HIGH_OSCILLATION_WARNING: &str = "high oscillation detected, check arrow spine";

/// Fixed recommendations for each tear type, most important first.
pub fn base_recommendations(tear_type: TearType) -> &'static [&'static str] {
    match tear_type {
        TearType::Perfect => &["tuned correctly", "continue current setup"],
        TearType::High => &[
            "lower nocking point 1/16\"",
            "check top cam timing",
            "verify d-loop length",
        ],
        TearType::Low => &[
            "raise nocking point 1/16\"",
            "check bottom cam timing",
            "consider stiffer spine",
        ],
        TearType::Left => &[
            "move rest right",
            "consider stiffer spine",
            "check centershot alignment",
        ],
        TearType::Right => &[
            "move rest left",
            "consider weaker spine",
            "verify cam synchronization",
        ],
        TearType::Unknown => &["unable to classify", "retake video with better lighting"],
    }
}

/// Recommendations using the default oscillation threshold.
pub fn recommend(tear_type: TearType, measurements: &MeasurementSet) -> Vec<String> {
    RecommendationEngine::default().recommend(tear_type, measurements)
}

/// Maps a tear type and measurements to ordered recommendations.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    oscillation_warning_deg: f64,
}

impl RecommendationEngine {
    pub fn new(oscillation_warning_deg: f64) -> Self {
        Self {
            oscillation_warning_deg,
        }
    }

    /// Base recommendations for the tear, then the oscillation warning if
    /// the amplitude is strictly above the threshold.
    pub fn recommend(&self, tear_type: TearType, measurements: &MeasurementSet) -> Vec<String> {
        let mut recommendations: Vec<String> = base_recommendations(tear_type)
            .iter()
            .map(|s| s.to_string())
            .collect();

        if measurements.oscillation_amplitude > self.oscillation_warning_deg {
            recommendations.push(HIGH_OSCILLATION_WARNING.to_string());
        }

        recommendations
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(HIGH_OSCILLATION_THRESHOLD_DEG)
    }
}
