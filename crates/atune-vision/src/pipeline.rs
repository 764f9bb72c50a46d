//! Shot analysis orchestration.
//!
//! Frames flow through a single pass:
//!
//! ```text
//! FrameSource -> ArrowDetector -> TrajectoryAccumulator
//!     -> TrajectoryAnalyzer -> TearClassifier -> RecommendationEngine
//! ```
//!
//! Detection runs on the blocking thread pool, optionally in parallel
//! batches, but the accumulator always receives frames in ascending index
//! order.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use atune_models::{ArrowObservation, Trajectory, TuningResult};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::accumulator::TrajectoryAccumulator;
use crate::analysis::{RecommendationEngine, RuleBasedClassifier, TearClassifier, TrajectoryAnalyzer};
use crate::config::PipelineConfig;
use crate::detection::{ArrowDetector, NullDetector};
use crate::error::{VisionError, VisionResult};
use crate::frame_source::{FfmpegFrameSource, Frame, FrameSource};
use crate::metrics;

/// Inclusive range of frame indices to analyze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRange {
    pub start_frame: u64,
    /// Last frame to analyze; `None` reads to the end of the stream
    pub end_frame: Option<u64>,
}

impl FrameRange {
    pub fn new(start_frame: u64, end_frame: Option<u64>) -> Self {
        Self {
            start_frame,
            end_frame,
        }
    }

    /// Every frame in the source.
    pub fn all() -> Self {
        Self::default()
    }

    /// True once `index` is beyond the end of the range.
    pub fn is_past(&self, index: u64) -> bool {
        self.end_frame.is_some_and(|end| index > end)
    }

    pub fn contains(&self, index: u64) -> bool {
        index >= self.start_frame && !self.is_past(index)
    }
}

#[derive(Debug, Default)]
struct ScanStats {
    accepted: u64,
    rejected: u64,
}

/// End-to-end shot analysis.
///
/// Configuration, detector and classifier are fixed at construction. Each
/// call owns its own accumulator and trajectory, so one pipeline can serve
/// concurrent requests.
pub struct ArrowTuningPipeline {
    config: PipelineConfig,
    detector: Arc<dyn ArrowDetector>,
    classifier: Box<dyn TearClassifier>,
    recommender: RecommendationEngine,
}

impl ArrowTuningPipeline {
    /// Create a pipeline; fails if `config` is invalid.
    pub fn new(
        config: PipelineConfig,
        detector: Box<dyn ArrowDetector>,
        classifier: Box<dyn TearClassifier>,
    ) -> VisionResult<Self> {
        config.validate()?;

        info!(
            detector = detector.name(),
            classifier = classifier.name(),
            fps = config.fps,
            confidence_threshold = config.confidence_threshold,
            batch = config.detection_batch_size,
            "Created tuning pipeline"
        );

        let recommender = RecommendationEngine::new(config.oscillation_warning_deg);
        Ok(Self {
            config,
            detector: Arc::from(detector),
            classifier,
            recommender,
        })
    }

    /// Placeholder detector and the rule-based classifier.
    pub fn with_defaults(config: PipelineConfig) -> VisionResult<Self> {
        let classifier = RuleBasedClassifier::new(config.lateral_threshold_px);
        Self::new(config, Box::new(NullDetector), Box::new(classifier))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Scan `source` over `range` and analyze the resulting trajectory.
    pub async fn process(
        &self,
        source: &mut dyn FrameSource,
        range: FrameRange,
    ) -> VisionResult<TuningResult> {
        let started = Instant::now();
        let fps = self.effective_fps(source.fps());
        let batch_size = self.config.detection_batch_size;

        info!(
            source = source.name(),
            detector = self.detector.name(),
            fps,
            start_frame = range.start_frame,
            end_frame = ?range.end_frame,
            "Starting shot analysis"
        );

        let mut accumulator = TrajectoryAccumulator::new();
        let mut stats = ScanStats::default();
        let mut batch: Vec<Frame> = Vec::with_capacity(batch_size);

        while let Some(frame) = source.next_frame().await? {
            if range.is_past(frame.index) {
                break;
            }
            if frame.index < range.start_frame {
                continue;
            }

            batch.push(frame);
            if batch.len() >= batch_size {
                self.detect_batch(&mut batch, fps, &mut accumulator, &mut stats)
                    .await?;
            }
        }
        self.detect_batch(&mut batch, fps, &mut accumulator, &mut stats)
            .await?;

        let frames_scanned = accumulator.frames_seen();
        metrics::record_frames_scanned(source.name(), frames_scanned);
        metrics::record_detections(self.detector.name(), stats.accepted);
        if stats.rejected > 0 {
            metrics::record_detections_rejected(self.detector.name(), stats.rejected);
        }

        let trajectory = accumulator.finalize();
        let result = self.analyze(trajectory, frames_scanned, fps);

        let elapsed = started.elapsed().as_secs_f64();
        metrics::record_analysis(result.tear_type, elapsed);
        info!(
            tear_type = %result.tear_type,
            confidence = result.confidence,
            frames = frames_scanned,
            detections = stats.accepted,
            rejected = stats.rejected,
            elapsed_secs = elapsed,
            "Shot analysis complete"
        );

        Ok(result)
    }

    /// Open a video file and process it.
    pub async fn process_video(
        &self,
        path: impl AsRef<Path>,
        range: FrameRange,
    ) -> VisionResult<TuningResult> {
        let mut source = FfmpegFrameSource::open(path, self.config.fps).await?;
        self.process(&mut source, range).await
    }

    /// Analyze an already-built trajectory at the configured frame rate.
    pub fn analyze_trajectory(&self, trajectory: Trajectory, frames_scanned: u64) -> TuningResult {
        let started = Instant::now();
        let result = self.analyze(trajectory, frames_scanned, self.config.fps);
        metrics::record_analysis(result.tear_type, started.elapsed().as_secs_f64());
        result
    }

    fn analyze(&self, trajectory: Trajectory, frames_scanned: u64, fps: f64) -> TuningResult {
        let measurements = TrajectoryAnalyzer::new(fps).analyze(&trajectory);
        let classification = self.classifier.classify(&trajectory);
        let recommendations = self
            .recommender
            .recommend(classification.tear_type, &measurements);

        debug!(
            tear_type = %classification.tear_type,
            confidence = classification.confidence,
            points = trajectory.len(),
            "Trajectory classified"
        );

        TuningResult::new(
            classification,
            recommendations,
            measurements,
            trajectory,
            frames_scanned,
        )
    }

    fn effective_fps(&self, source_fps: f64) -> f64 {
        if source_fps.is_finite() && source_fps > 0.0 {
            source_fps
        } else {
            self.config.fps
        }
    }

    /// Detect on every buffered frame and feed results in frame order.
    ///
    /// Detectors are synchronous and may be CPU heavy, so the batch runs on
    /// the blocking pool rather than the async worker.
    async fn detect_batch(
        &self,
        batch: &mut Vec<Frame>,
        fps: f64,
        accumulator: &mut TrajectoryAccumulator,
        stats: &mut ScanStats,
    ) -> VisionResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let frames = std::mem::take(batch);
        let detector = Arc::clone(&self.detector);
        let (frames, detections) = tokio::task::spawn_blocking(move || {
            let detections: Vec<VisionResult<Option<ArrowObservation>>> = if frames.len() == 1 {
                frames.iter().map(|frame| detector.detect(frame, fps)).collect()
            } else {
                // Indexed parallel collect keeps frame order.
                frames
                    .par_iter()
                    .map(|frame| detector.detect(frame, fps))
                    .collect()
            };
            (frames, detections)
        })
        .await
        .map_err(|e| VisionError::internal(format!("Detection task failed: {}", e)))?;

        for (frame, detection) in frames.into_iter().zip(detections) {
            let detection = self.accept(detection?, stats);
            accumulator.observe(frame.index, detection)?;
        }
        Ok(())
    }

    fn accept(
        &self,
        detection: Option<ArrowObservation>,
        stats: &mut ScanStats,
    ) -> Option<ArrowObservation> {
        let obs = detection?;
        if !obs.is_finite() {
            warn!(frame = obs.frame_index, "Dropping non-finite detection");
            stats.rejected += 1;
            return None;
        }
        if obs.confidence < self.config.confidence_threshold {
            debug!(
                frame = obs.frame_index,
                confidence = obs.confidence,
                "Detection below confidence threshold"
            );
            stats.rejected += 1;
            return None;
        }
        stats.accepted += 1;
        Some(obs)
    }
}

/// Analyze a whole video with the default detector and classifier.
pub async fn analyze_shot(
    path: impl AsRef<Path>,
    config: PipelineConfig,
) -> VisionResult<TuningResult> {
    ArrowTuningPipeline::with_defaults(config)?
        .process_video(path, FrameRange::all())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{MockArrowDetector, ReplayDetector};
    use crate::frame_source::MemoryFrameSource;
    use atune_models::{BoundingBox, Point, TearType};

    fn obs(frame: u64, x: f64, angle: f64, confidence: f64) -> ArrowObservation {
        ArrowObservation::new(
            frame,
            frame as f64 / 100.0,
            BoundingBox::new(0.0, 0.0, 10.0, 2.0),
            confidence,
            angle,
        )
        .with_center(Point::new(x, 50.0))
    }

    fn pipeline_with(detector: impl ArrowDetector + 'static, config: PipelineConfig) -> ArrowTuningPipeline {
        let classifier = RuleBasedClassifier::new(config.lateral_threshold_px);
        ArrowTuningPipeline::new(config, Box::new(detector), Box::new(classifier)).unwrap()
    }

    #[test]
    fn test_frame_range() {
        let range = FrameRange::new(2, Some(4));
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(range.is_past(5));
        assert!(!FrameRange::all().is_past(u64::MAX));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PipelineConfig {
            confidence_threshold: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            ArrowTuningPipeline::with_defaults(config),
            Err(VisionError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_no_detections_is_unknown() {
        let pipeline = ArrowTuningPipeline::with_defaults(PipelineConfig::default()).unwrap();
        let mut source = MemoryFrameSource::blank(10, 100.0, 8, 8);

        let result = pipeline.process(&mut source, FrameRange::all()).await.unwrap();

        assert_eq!(result.tear_type, TearType::Unknown);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.frames_scanned, 10);
        assert_eq!(
            result.recommendations,
            vec!["unable to classify", "retake video with better lighting"]
        );
    }

    #[tokio::test]
    async fn test_detector_called_once_per_frame_in_range() {
        let mut detector = MockArrowDetector::new();
        detector
            .expect_detect()
            .withf(|frame, _| (3..=5).contains(&frame.index))
            .times(3)
            .returning(|frame, _| Ok(Some(obs(frame.index, 0.0, 1.0, 0.9))));
        detector.expect_name().return_const("mock");

        let pipeline = pipeline_with(detector, PipelineConfig::default());
        let mut source = MemoryFrameSource::blank(10, 100.0, 8, 8);

        let result = pipeline
            .process(&mut source, FrameRange::new(3, Some(5)))
            .await
            .unwrap();

        assert_eq!(result.frames_scanned, 3);
        let frames: Vec<u64> = result
            .trajectory
            .observations()
            .iter()
            .map(|o| o.frame_index)
            .collect();
        assert_eq!(frames, vec![3, 4, 5]);
        assert_eq!(result.tear_type, TearType::Perfect);
    }

    #[tokio::test]
    async fn test_low_confidence_detections_are_dropped() {
        let detector = ReplayDetector::from_observations(vec![
            obs(0, 0.0, 0.0, 0.9),
            obs(1, 5.0, 0.0, 0.9),
            obs(2, 10.0, 30.0, 0.2),
        ])
        .unwrap();
        let pipeline = pipeline_with(detector, PipelineConfig::default());
        let mut source = MemoryFrameSource::blank(3, 100.0, 8, 8);

        let result = pipeline.process(&mut source, FrameRange::all()).await.unwrap();

        assert_eq!(result.trajectory_points(), 2);
        assert_eq!(result.tear_type, TearType::Perfect);
    }

    #[tokio::test]
    async fn test_detector_error_propagates() {
        let mut detector = MockArrowDetector::new();
        detector
            .expect_detect()
            .returning(|_, _| Err(VisionError::detection_failed("model crashed")));
        detector.expect_name().return_const("mock");

        let pipeline = pipeline_with(detector, PipelineConfig::default());
        let mut source = MemoryFrameSource::blank(2, 100.0, 8, 8);

        let result = pipeline.process(&mut source, FrameRange::all()).await;
        assert!(matches!(result, Err(VisionError::DetectionFailed(_))));
    }

    struct PanickingDetector;

    impl ArrowDetector for PanickingDetector {
        fn detect(&self, frame: &Frame, _fps: f64) -> VisionResult<Option<ArrowObservation>> {
            panic!("detector blew up on frame {}", frame.index);
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    struct SlowDetector;

    impl ArrowDetector for SlowDetector {
        fn detect(&self, frame: &Frame, _fps: f64) -> VisionResult<Option<ArrowObservation>> {
            std::thread::sleep(std::time::Duration::from_millis(30));
            Ok(Some(obs(frame.index, 0.0, 0.0, 0.9)))
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_detector_panic_is_internal_error() {
        let pipeline = pipeline_with(PanickingDetector, PipelineConfig::default());
        let mut source = MemoryFrameSource::blank(3, 100.0, 8, 8);

        let result = pipeline.process(&mut source, FrameRange::all()).await;
        assert!(matches!(result, Err(VisionError::Internal(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_detection_does_not_block_runtime() {
        let pipeline = pipeline_with(SlowDetector, PipelineConfig::default());
        let ticker = tokio::spawn(async {
            for _ in 0..5 {
                tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            }
        });

        let mut source = MemoryFrameSource::blank(5, 100.0, 8, 8);
        let result = pipeline.process(&mut source, FrameRange::all()).await.unwrap();

        // The ticker ran to completion while detection slept off the worker.
        assert!(ticker.is_finished());
        assert_eq!(result.trajectory_points(), 5);
    }

    #[tokio::test]
    async fn test_parallel_batches_match_sequential() {
        let observations: Vec<_> = (0..40u64)
            .filter(|f| f % 3 != 0)
            .map(|f| obs(f, f as f64 * 4.0, (f as f64 * 0.7).sin() * 8.0, 0.95))
            .collect();

        let sequential = pipeline_with(
            ReplayDetector::from_observations(observations.clone()).unwrap(),
            PipelineConfig::default(),
        );
        let parallel = pipeline_with(
            ReplayDetector::from_observations(observations).unwrap(),
            PipelineConfig {
                detection_batch_size: 7,
                ..Default::default()
            },
        );

        let a = sequential
            .process(&mut MemoryFrameSource::blank(40, 100.0, 8, 8), FrameRange::all())
            .await
            .unwrap();
        let b = parallel
            .process(&mut MemoryFrameSource::blank(40, 100.0, 8, 8), FrameRange::all())
            .await
            .unwrap();

        assert_eq!(a.trajectory, b.trajectory);
        assert_eq!(a.measurements, b.measurements);
        assert_eq!(a.classification(), b.classification());
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn test_analyze_trajectory_high_tear() {
        let pipeline = ArrowTuningPipeline::with_defaults(PipelineConfig::default()).unwrap();
        let trajectory = Trajectory::new(vec![
            obs(0, 0.0, -12.0, 0.9),
            obs(1, 10.0, 14.0, 0.9),
            obs(2, 20.0, 9.0, 0.9),
        ])
        .unwrap();

        let result = pipeline.analyze_trajectory(trajectory, 0);

        assert_eq!(result.tear_type, TearType::High);
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.measurements.entry_angle, 9.0);
        assert_eq!(
            result.recommendations.last().map(String::as_str),
            Some("high oscillation detected, check arrow spine")
        );
    }
}
