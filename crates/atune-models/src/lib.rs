//! Shared data models for the Arrow Tuning System.
//!
//! This crate provides Serde-serializable types for:
//! - Per-frame arrow observations and trajectories
//! - Flight measurements and tear pattern classifications
//! - Tuning results and API request bodies
//! - Detector backend selection

pub mod api;
pub mod detector_kind;
pub mod geometry;
pub mod measurement;
pub mod observation;
pub mod result;
pub mod tear;
pub mod trajectory;

// Re-export common types
pub use api::{AnalyzeTrajectoryRequest, AnalyzeVideoRequest};
pub use detector_kind::DetectorKind;
pub use geometry::{BoundingBox, Point};
pub use measurement::{MeasurementSet, Metric};
pub use observation::ArrowObservation;
pub use result::TuningResult;
pub use tear::{TearClassification, TearType};
pub use trajectory::{Trajectory, TrajectoryError};
