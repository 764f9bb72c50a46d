//! Trajectory analysis stages.
//!
//! Run in order on a frozen trajectory:
//! 1. `TrajectoryAnalyzer` - velocity, oscillation amplitude/frequency, entry angle
//! 2. `TearClassifier` - tear type and confidence
//! 3. `RecommendationEngine` - ordered tuning advice
//!
//! Every stage is a pure function of its inputs.

pub mod analyzer;
pub mod classifier;
pub mod recommend;
pub mod spectrum;

pub use analyzer::TrajectoryAnalyzer;
pub use classifier::{RuleBasedClassifier, TearClassifier};
pub use recommend::{base_recommendations, recommend, RecommendationEngine};
