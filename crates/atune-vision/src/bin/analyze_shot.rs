//! Analyze a single arrow shot video and print tuning recommendations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atune_models::{DetectorKind, Metric, TearType, TuningResult};
use atune_vision::{
    ArrowTuningPipeline, DetectorBuilder, FrameRange, PipelineConfig, RuleBasedClassifier,
};

const RULE: &str = "============================================================";

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze a high-speed video of an arrow shot", long_about = None)]
struct Cli {
    /// Video of the shot
    video: PathBuf,

    /// JSON array of recorded arrow detections to replay against the video
    #[arg(long)]
    detections: Option<PathBuf>,

    /// Frame rate to assume when the video does not report one
    #[arg(long)]
    fps: Option<f64>,

    /// Minimum detection confidence
    #[arg(long)]
    confidence_threshold: Option<f64>,

    /// First frame to analyze
    #[arg(long, default_value_t = 0)]
    start_frame: u64,

    /// Last frame to analyze (inclusive)
    #[arg(long)]
    end_frame: Option<u64>,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env();
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if let Some(threshold) = cli.confidence_threshold {
        config.confidence_threshold = threshold;
    }

    let kind = if cli.detections.is_some() {
        DetectorKind::Replay
    } else {
        DetectorKind::None
    };
    let mut builder = DetectorBuilder::for_kind(kind);
    if let Some(path) = &cli.detections {
        builder = builder.detections(path);
    }
    let detector = builder.build().await.context("Failed to build detector")?;
    let classifier = RuleBasedClassifier::new(config.lateral_threshold_px);

    let pipeline = ArrowTuningPipeline::new(config, detector, Box::new(classifier))
        .context("Invalid pipeline configuration")?;

    info!(video = %cli.video.display(), "Processing video");
    let result = pipeline
        .process_video(&cli.video, FrameRange::new(cli.start_frame, cli.end_frame))
        .await
        .with_context(|| format!("Failed to analyze {}", cli.video.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr so stdout stays clean for the report or JSON.
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(env_filter)
            .init();
    }
}

fn print_report(result: &TuningResult) {
    let m = &result.measurements;

    println!("{RULE}");
    println!("ANALYSIS RESULTS");
    println!("{RULE}");
    println!();
    println!(
        "Tear Type: {} ({})",
        result.tear_type.as_str().to_uppercase(),
        result.tear_type.description()
    );
    println!("Confidence: {:.1}%", result.confidence * 100.0);
    println!();
    println!("Measurements:");
    println!("  Arrow Velocity: {:.1} {}", m.velocity, Metric::Velocity.unit());
    println!("  Oscillation: {:.2}°", m.oscillation_amplitude);
    if m.oscillation_frequency_computed {
        println!("  Oscillation Frequency: {:.1} Hz", m.oscillation_frequency);
    } else {
        println!("  Oscillation Frequency: not computed");
    }
    println!("  Entry Angle: {:.1}°", m.entry_angle);
    println!();
    println!("Tuning Recommendations:");
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }
    println!();
    println!(
        "Trajectory Points: {} of {} frames",
        result.trajectory_points(),
        result.frames_scanned
    );
    println!();
    println!("{RULE}");
    println!();
    println!("What This Means:");
    println!();
    for line in interpretation(result.tear_type) {
        println!("{line}");
    }
    println!();
    println!("{RULE}");
    println!("Make ONE adjustment at a time and retest after each change.");
    println!("{RULE}");
}

fn interpretation(tear_type: TearType) -> &'static [&'static str] {
    match tear_type {
        TearType::Perfect => &[
            "✓ Your arrow is tuned correctly!",
            "  Continue with your current setup.",
        ],
        TearType::High => &[
            "↑ High Tear Detected",
            "  Your nocking point is too high.",
            "  Action: Lower nocking point by 1/16 inch and retest.",
        ],
        TearType::Low => &[
            "↓ Low Tear Detected",
            "  Your nocking point is too low.",
            "  Action: Raise nocking point by 1/16 inch and retest.",
        ],
        TearType::Left => &[
            "← Left Tear Detected",
            "  Arrow spine may be too weak, or rest needs adjustment.",
            "  Action: Move rest right slightly or try stiffer arrows.",
        ],
        TearType::Right => &[
            "→ Right Tear Detected",
            "  Arrow spine may be too stiff, or rest needs adjustment.",
            "  Action: Move rest left slightly or try weaker arrows.",
        ],
        TearType::Unknown => &[
            "? No arrow could be tracked in this clip.",
            "  Action: Retake the video with better lighting and a plain background.",
        ],
    }
}
