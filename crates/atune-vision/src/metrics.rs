//! Processing metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host process installs a recorder.

use atune_models::TearType;
use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_SCANNED_TOTAL: &str = "atune_frames_scanned_total";
    pub const DETECTIONS_TOTAL: &str = "atune_detections_total";
    pub const DETECTIONS_REJECTED_TOTAL: &str = "atune_detections_rejected_total";
    pub const ANALYSES_TOTAL: &str = "atune_analyses_total";
    pub const ANALYSIS_DURATION_SECONDS: &str = "atune_analysis_duration_seconds";
}

/// Record frames read from a source.
pub fn record_frames_scanned(source: &str, frames: u64) {
    let labels = [("source", source.to_string())];
    counter!(names::FRAMES_SCANNED_TOTAL, &labels).increment(frames);
}

/// Record accepted detections.
pub fn record_detections(detector: &str, count: u64) {
    let labels = [("detector", detector.to_string())];
    counter!(names::DETECTIONS_TOTAL, &labels).increment(count);
}

/// Record detections dropped below the confidence threshold.
pub fn record_detections_rejected(detector: &str, count: u64) {
    let labels = [("detector", detector.to_string())];
    counter!(names::DETECTIONS_REJECTED_TOTAL, &labels).increment(count);
}

/// Record a finished analysis.
pub fn record_analysis(tear_type: TearType, duration_secs: f64) {
    let labels = [("tear_type", tear_type.as_str().to_string())];
    counter!(names::ANALYSES_TOTAL, &labels).increment(1);
    histogram!(names::ANALYSIS_DURATION_SECONDS, &labels).record(duration_secs);
}
