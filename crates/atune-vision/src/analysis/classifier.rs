//! Tear pattern classification.
//!
//! `RuleBasedClassifier` reads the shaft angle at the last observed frame:
//!
//! | Entry angle | Tear | Confidence |
//! |-------------|------|------------|
//! | within ±5° | `perfect` | 0.95 |
//! | above +5° | `high` | 0.85 |
//! | below −5° | `low` | 0.85 |
//!
//! The three bands cover every finite angle. A non-finite angle has no band
//! and yields `unknown`.
//!
//! Left/right tears come from a second, opt-in signal: how far the center
//! point bows sideways off the straight line between the first and last
//! observation. Travel along the flight line never counts. It only applies
//! inside the perfect band (vertical tears take precedence) and only when a
//! lateral threshold is configured.

use atune_models::{TearClassification, TearType, Trajectory};

/// Half-width of the perfect entry-angle band, degrees (inclusive).
pub const PERFECT_BAND_DEG: f64 = 5.0;

pub const PERFECT_CONFIDENCE: f64 = 0.95;
pub const VERTICAL_CONFIDENCE: f64 = 0.85;
pub const LATERAL_CONFIDENCE: f64 = 0.75;

/// Classifies the tear pattern a trajectory would leave in paper.
///
/// Implementations must be pure: the same trajectory always produces the
/// same classification.
pub trait TearClassifier: Send + Sync {
    fn classify(&self, trajectory: &Trajectory) -> TearClassification;

    /// Classifier name for logging.
    fn name(&self) -> &'static str;
}

/// Entry-angle bands plus optional lateral drift.
#[derive(Debug, Clone, Copy)]
pub struct RuleBasedClassifier {
    lateral_threshold_px: Option<f64>,
}

impl RuleBasedClassifier {
    /// Angle bands only; never produces `left` or `right`.
    pub fn angle_only() -> Self {
        Self {
            lateral_threshold_px: None,
        }
    }

    /// Angle bands plus left/right from sideways deviation beyond `threshold_px`.
    pub fn with_lateral_threshold(threshold_px: f64) -> Self {
        Self {
            lateral_threshold_px: Some(threshold_px),
        }
    }

    pub fn new(lateral_threshold_px: Option<f64>) -> Self {
        Self {
            lateral_threshold_px,
        }
    }

    fn lateral_tear(&self, trajectory: &Trajectory) -> Option<TearType> {
        let threshold = self.lateral_threshold_px?;
        let drift = trajectory.lateral_deviation();
        if drift < -threshold {
            Some(TearType::Left)
        } else if drift > threshold {
            Some(TearType::Right)
        } else {
            None
        }
    }
}

impl Default for RuleBasedClassifier {
    fn default() -> Self {
        Self::angle_only()
    }
}

impl TearClassifier for RuleBasedClassifier {
    fn classify(&self, trajectory: &Trajectory) -> TearClassification {
        let Some(last) = trajectory.last() else {
            return TearClassification::unknown();
        };

        let entry_angle = last.angle;
        if !entry_angle.is_finite() {
            return TearClassification::unknown();
        }

        if entry_angle > PERFECT_BAND_DEG {
            TearClassification::new(TearType::High, VERTICAL_CONFIDENCE)
        } else if entry_angle < -PERFECT_BAND_DEG {
            TearClassification::new(TearType::Low, VERTICAL_CONFIDENCE)
        } else if let Some(tear) = self.lateral_tear(trajectory) {
            TearClassification::new(tear, LATERAL_CONFIDENCE)
        } else {
            TearClassification::new(TearType::Perfect, PERFECT_CONFIDENCE)
        }
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}
