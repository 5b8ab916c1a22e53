use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use emostream_core::capture::domain::frame_source::FrameSource;
use emostream_core::capture::infrastructure::still_image_source::StillImageSource;
use emostream_core::capture::infrastructure::synthetic_source::SyntheticSource;
use emostream_core::classification::infrastructure::scripted_classifier::ScriptedClassifier;
use emostream_core::pipeline::stream_config::StreamConfig;
use emostream_core::pipeline::stream_controller::StreamController;
use emostream_core::pipeline::stream_logger::LogStreamLogger;
use emostream_core::shared::constants::EMOTION_CATEGORIES;

/// Real-time emotion stream demo.
///
/// Runs the capture/stabilization pipeline against a still image or a
/// synthetic frame source, with a scripted classifier standing in for
/// a real model, and prints the stable label per tick.
#[derive(Parser)]
#[command(name = "emostream")]
struct Cli {
    /// Still image to replay as the capture source (synthetic pattern
    /// if omitted).
    #[arg(long)]
    image: Option<PathBuf>,

    /// Target frame rate.
    #[arg(long, default_value = "10")]
    fps: u32,

    /// Run the classifier every Nth tick (1 = every tick).
    #[arg(long, default_value = "3")]
    detect_interval: usize,

    /// Stabilizer smoothing window size.
    #[arg(long, default_value = "5")]
    window: usize,

    /// Hysteresis margin in [0, 1].
    #[arg(long, default_value = "0.15")]
    hysteresis: f64,

    /// Minimum accepted face area in px^2.
    #[arg(long, default_value = "1600")]
    min_area: i64,

    /// Minimum accepted classification confidence.
    #[arg(long, default_value = "0.25")]
    min_confidence: f64,

    /// Number of updates to consume before stopping.
    #[arg(long, default_value = "50")]
    ticks: usize,

    /// Scripted classifier entries as emotion:score, cycled per detect
    /// tick.
    #[arg(long, value_delimiter = ',', default_value = "happy:0.9,sad:0.85")]
    script: Vec<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let script = parse_script(&cli.script)?;

    let source: Box<dyn FrameSource> = match &cli.image {
        Some(path) => Box::new(StillImageSource::new(path)),
        None => Box::new(SyntheticSource::default()),
    };
    let pairs: Vec<(&str, f64)> = script.iter().map(|(e, s)| (e.as_str(), *s)).collect();
    let classifier = Box::new(ScriptedClassifier::cycling(&pairs));

    let config = StreamConfig {
        target_fps: cli.fps,
        detect_interval: cli.detect_interval,
        smoothing_window: cli.window,
        hysteresis_margin: cli.hysteresis,
        min_face_area: cli.min_area,
        min_confidence: cli.min_confidence,
        stop_timeout: Duration::from_secs(1),
        ..Default::default()
    };

    let (controller, updates) = StreamController::new(source, classifier, config)?;
    let mut controller = controller.with_logger(Box::new(LogStreamLogger::default()));

    controller.start()?;
    for update in updates.iter().take(cli.ticks) {
        println!(
            "frame {:>4}  {:6}  {:<9} {:.2}  faces={}",
            update.frame.sequence(),
            update.kind.as_str(),
            update.emotion,
            update.score,
            update.regions.len(),
        );
    }
    controller.stop();
    log::info!("stream stopped after {} updates", cli.ticks);
    Ok(())
}

fn parse_script(entries: &[String]) -> Result<Vec<(String, f64)>, Box<dyn std::error::Error>> {
    let mut script = Vec::with_capacity(entries.len());
    for entry in entries {
        let (emotion, score) = entry
            .split_once(':')
            .ok_or_else(|| format!("malformed script entry '{entry}', expected emotion:score"))?;
        let score: f64 = score
            .parse()
            .map_err(|_| format!("malformed score in script entry '{entry}'"))?;
        if !(0.0..=1.0).contains(&score) {
            return Err(format!("score out of range in script entry '{entry}'").into());
        }
        if !EMOTION_CATEGORIES.contains(&emotion) {
            log::warn!("'{emotion}' is not a category the reference models score");
        }
        script.push((emotion.to_string(), score));
    }
    Ok(script)
}
