//! Spectral analysis of shaft angle.
//!
//! Detections are sparse, so angles are first placed on the uniform frame
//! grid (missing frames linearly interpolated) before the FFT.

use atune_models::ArrowObservation;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Fewest grid samples worth transforming.
pub const MIN_SPECTRAL_SAMPLES: usize = 4;

/// Longest grid transformed; longer spans are not analyzed.
pub const MAX_SPECTRAL_SAMPLES: usize = 1 << 16;

/// Angular deviation (degrees) below which the signal counts as flat.
const FLAT_SIGNAL_EPSILON: f64 = 1e-9;

/// Shaft angle on every frame from the first to the last observation.
///
/// Returns `None` if the span exceeds [`MAX_SPECTRAL_SAMPLES`].
pub fn resample_angles(observations: &[ArrowObservation]) -> Option<Vec<f64>> {
    let (first, last) = match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Some(Vec::new()),
    };

    let span = usize::try_from(last.frame_index - first.frame_index).ok()?;
    if span >= MAX_SPECTRAL_SAMPLES {
        return None;
    }

    let mut samples = Vec::with_capacity(span + 1);
    samples.push(first.angle);
    for pair in observations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let gap = (b.frame_index - a.frame_index) as f64;
        for step in 1..=(b.frame_index - a.frame_index) {
            let t = step as f64 / gap;
            samples.push(a.angle + (b.angle - a.angle) * t);
        }
    }
    Some(samples)
}

/// Frequency (Hz) of the strongest non-DC component of `samples`.
///
/// Samples are taken `1 / fps` seconds apart. Returns `None` when there are
/// too few samples or the signal is flat.
pub fn dominant_frequency(samples: &[f64], fps: f64) -> Option<f64> {
    let n = samples.len();
    if n < MIN_SPECTRAL_SAMPLES || !(fps > 0.0) {
        return None;
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    if samples
        .iter()
        .all(|s| (s - mean).abs() < FLAT_SIGNAL_EPSILON)
    {
        return None;
    }

    // Hann window limits leakage from the finite clip.
    let denom = (n - 1) as f64;
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let w = 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / denom).cos();
            Complex::new((s - mean) * w, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let (peak_bin, peak_magnitude) = buffer[1..=n / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm()))
        .fold((0, 0.0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    if peak_bin == 0 || peak_magnitude < FLAT_SIGNAL_EPSILON {
        return None;
    }

    Some(peak_bin as f64 * fps / n as f64)
}
