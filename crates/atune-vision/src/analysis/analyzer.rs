//! Flight measurements from a trajectory.

use atune_models::{MeasurementSet, Trajectory};
use tracing::debug;

use super::spectrum::{dominant_frequency, resample_angles};

/// Derives a [`MeasurementSet`] from a trajectory.
///
/// Total over its input: degenerate trajectories (empty, single observation,
/// zero elapsed time) yield 0.0 for the affected metrics rather than errors.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryAnalyzer {
    fps: f64,
}

impl TrajectoryAnalyzer {
    /// Create an analyzer for video captured at `fps`.
    pub fn new(fps: f64) -> Self {
        Self { fps }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Compute all metrics.
    pub fn analyze(&self, trajectory: &Trajectory) -> MeasurementSet {
        if trajectory.is_empty() {
            return MeasurementSet::default();
        }

        let (oscillation_frequency, oscillation_frequency_computed) =
            match self.oscillation_frequency(trajectory) {
                Some(freq) => (freq, true),
                None => (0.0, false),
            };

        let measurements = MeasurementSet {
            velocity: velocity(trajectory),
            oscillation_amplitude: oscillation_amplitude(trajectory),
            oscillation_frequency,
            entry_angle: entry_angle(trajectory),
            oscillation_frequency_computed,
        };

        debug!(
            points = trajectory.len(),
            velocity = measurements.velocity,
            amplitude = measurements.oscillation_amplitude,
            frequency = measurements.oscillation_frequency,
            entry_angle = measurements.entry_angle,
            "Trajectory analyzed"
        );

        measurements
    }

    fn oscillation_frequency(&self, trajectory: &Trajectory) -> Option<f64> {
        let samples = resample_angles(trajectory.observations())?;
        dominant_frequency(&samples, self.fps)
    }
}

/// Straight-line speed from first to last center point, pixels per second.
pub fn velocity(trajectory: &Trajectory) -> f64 {
    match (trajectory.first(), trajectory.last()) {
        (Some(first), Some(last)) if trajectory.len() >= 2 => {
            let elapsed = last.timestamp - first.timestamp;
            if elapsed > 0.0 {
                first.center.distance(&last.center) / elapsed
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Population standard deviation of shaft angle, degrees.
pub fn oscillation_amplitude(trajectory: &Trajectory) -> f64 {
    let n = trajectory.len();
    if n < 2 {
        return 0.0;
    }

    let angles = trajectory.observations().iter().map(|o| o.angle);
    let mean = angles.clone().sum::<f64>() / n as f64;
    let variance = angles.map(|a| (a - mean).powi(2)).sum::<f64>() / n as f64;
    variance.sqrt()
}

/// Shaft angle at the last observed frame, degrees.
pub fn entry_angle(trajectory: &Trajectory) -> f64 {
    trajectory.last().map(|o| o.angle).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atune_models::{ArrowObservation, BoundingBox, Point};

    fn obs(frame: u64, t: f64, center: (f64, f64), angle: f64) -> ArrowObservation {
        ArrowObservation::new(frame, t, BoundingBox::new(0.0, 0.0, 10.0, 2.0), 0.9, angle)
            .with_center(Point::new(center.0, center.1))
    }

    fn traj(observations: Vec<ArrowObservation>) -> Trajectory {
        Trajectory::new(observations).unwrap()
    }

    #[test]
    fn test_empty_trajectory_is_all_zero() {
        let m = TrajectoryAnalyzer::new(240.0).analyze(&Trajectory::empty());
        assert_eq!(m, MeasurementSet::default());
    }

    #[test]
    fn test_velocity() {
        let t = traj(vec![obs(0, 0.0, (0.0, 0.0), 0.0), obs(1, 2.0, (100.0, 0.0), 0.0)]);
        assert_eq!(TrajectoryAnalyzer::new(240.0).analyze(&t).velocity, 50.0);
    }

    #[test]
    fn test_velocity_zero_elapsed_time() {
        let t = traj(vec![obs(0, 1.0, (0.0, 0.0), 0.0), obs(1, 1.0, (30.0, 40.0), 0.0)]);
        assert_eq!(velocity(&t), 0.0);
    }

    #[test]
    fn test_single_observation() {
        let t = traj(vec![obs(7, 0.5, (10.0, 10.0), 3.5)]);
        let m = TrajectoryAnalyzer::new(240.0).analyze(&t);
        assert_eq!(m.velocity, 0.0);
        assert_eq!(m.oscillation_amplitude, 0.0);
        assert_eq!(m.oscillation_frequency, 0.0);
        assert!(!m.oscillation_frequency_computed);
        assert_eq!(m.entry_angle, 3.5);
    }

    #[test]
    fn test_oscillation_amplitude() {
        let flat = traj(vec![obs(0, 0.0, (0.0, 0.0), 0.0), obs(1, 0.1, (0.0, 0.0), 0.0)]);
        assert_eq!(oscillation_amplitude(&flat), 0.0);

        let swing = traj(vec![obs(0, 0.0, (0.0, 0.0), -5.0), obs(1, 0.1, (0.0, 0.0), 5.0)]);
        assert_eq!(oscillation_amplitude(&swing), 5.0);
    }

    #[test]
    fn test_entry_angle_uses_last_observation() {
        let base = vec![
            obs(0, 0.0, (0.0, 0.0), 12.0),
            obs(1, 0.1, (0.0, 0.0), -3.0),
            obs(2, 0.2, (0.0, 0.0), 1.25),
        ];
        let analyzer = TrajectoryAnalyzer::new(240.0);
        let before = analyzer.analyze(&traj(base.clone())).entry_angle;

        let mut changed = base;
        changed[0].angle = 80.0;
        changed[1].angle = -40.0;
        let after = analyzer.analyze(&traj(changed)).entry_angle;

        assert_eq!(before, 1.25);
        assert_eq!(after, 1.25);
    }

    #[test]
    fn test_frequency_computed_for_oscillating_shaft() {
        let fps = 240.0;
        let observations: Vec<_> = (0..120u64)
            .map(|f| {
                let t = f as f64 / fps;
                obs(f, t, (t * 1000.0, 0.0), 6.0 * (2.0 * std::f64::consts::PI * 30.0 * t).sin())
            })
            .collect();
        let m = TrajectoryAnalyzer::new(fps).analyze(&traj(observations));
        assert!(m.oscillation_frequency_computed);
        assert!((m.oscillation_frequency - 30.0).abs() < 1e-9);
        assert!(m.oscillation_amplitude > 4.0);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let t = traj(vec![
            obs(0, 0.0, (0.0, 0.0), 2.0),
            obs(2, 0.01, (7.0, 1.0), -1.0),
            obs(3, 0.02, (9.0, 2.0), 4.0),
            obs(6, 0.03, (15.0, 2.0), -2.5),
        ]);
        let analyzer = TrajectoryAnalyzer::new(240.0);
        let a = analyzer.analyze(&t);
        let b = analyzer.analyze(&t);
        assert_eq!(a.velocity.to_bits(), b.velocity.to_bits());
        assert_eq!(a.oscillation_amplitude.to_bits(), b.oscillation_amplitude.to_bits());
        assert_eq!(a.oscillation_frequency.to_bits(), b.oscillation_frequency.to_bits());
        assert_eq!(a.entry_angle.to_bits(), b.entry_angle.to_bits());
    }
}
