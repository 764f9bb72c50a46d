#![deny(unreachable_patterns)]
//! Arrow flight analysis from paper-tuning video.
//!
//! This crate provides:
//! - Frame sources (FFmpeg pipe decoding, in-memory frames)
//! - A pluggable arrow detector capability with placeholder and replay backends
//! - Trajectory accumulation with strict frame ordering
//! - Flight measurements, tear classification and tuning recommendations
//! - The `analyze-shot` command-line tool

pub mod accumulator;
pub mod analysis;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame_source;
pub mod metrics;
pub mod pipeline;
pub mod probe;

pub use accumulator::TrajectoryAccumulator;
pub use analysis::{
    base_recommendations, recommend, RecommendationEngine, RuleBasedClassifier, TearClassifier,
    TrajectoryAnalyzer,
};
pub use config::PipelineConfig;
pub use detection::{ArrowDetector, DetectorBuilder, NullDetector, ReplayDetector};
pub use error::{VisionError, VisionResult};
pub use frame_source::{FfmpegFrameSource, Frame, FrameSource, MemoryFrameSource};
pub use pipeline::{analyze_shot, ArrowTuningPipeline, FrameRange};
pub use probe::{probe_video, VideoInfo};
