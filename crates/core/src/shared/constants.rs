/// Category emitted before any detection has been accepted, and the
/// fallback when a tick yields nothing usable.
pub const NEUTRAL_EMOTION: &str = "neutral";

/// Categories the reference emotion models score.
pub const EMOTION_CATEGORIES: &[&str] = &[
    "angry", "disgust", "fear", "happy", "sad", "surprise", "neutral",
];

/// Faces smaller than 40x40 px are treated as noise and dropped.
pub const MIN_FACE_AREA: i64 = 40 * 40;

/// Detections whose best category scores below this are dropped.
pub const MIN_CONFIDENCE: f64 = 0.25;

pub const DEFAULT_TARGET_FPS: u32 = 10;

/// Run the classifier on every Nth tick; cheaper ticks in between
/// redraw the cached result.
pub const DEFAULT_DETECT_INTERVAL: usize = 3;

pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Score advantage a challenger category needs over the incumbent
/// before the stabilizer lets it take over.
pub const DEFAULT_HYSTERESIS_MARGIN: f64 = 0.15;

/// Backoff after a transient frame-read failure before retrying.
pub const READ_RETRY_DELAY_MS: u64 = 100;

/// How long `stop()` waits for the worker to exit before releasing
/// the capture source anyway.
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 1_000;

/// Bounded update-channel capacity between worker and consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;
