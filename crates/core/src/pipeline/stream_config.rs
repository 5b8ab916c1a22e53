use std::time::Duration;

use crate::shared::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_DETECT_INTERVAL, DEFAULT_HYSTERESIS_MARGIN,
    DEFAULT_SMOOTHING_WINDOW, DEFAULT_STOP_TIMEOUT_MS, DEFAULT_TARGET_FPS, MIN_CONFIDENCE,
    MIN_FACE_AREA,
};

/// Configuration for one stream, immutable for its lifetime.
///
/// Changing parameters means constructing a new controller; the
/// running loop only ever reads this.
#[derive(Clone, Debug)]
pub struct StreamConfig {
    pub target_fps: u32,
    /// Invoke the classifier every Kth tick (1 = every tick).
    pub detect_interval: usize,
    /// Stabilizer history capacity.
    pub smoothing_window: usize,
    /// Score advantage a challenger category needs over the incumbent.
    pub hysteresis_margin: f64,
    /// Detections with a smaller region area are dropped.
    pub min_face_area: i64,
    /// Detections whose best score is lower are dropped.
    pub min_confidence: f64,
    /// Capacity of the bounded update channel to the consumer.
    pub channel_capacity: usize,
    /// How long `stop()` waits for the worker before releasing the
    /// capture source anyway.
    pub stop_timeout: Duration,
}

impl StreamConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.target_fps == 0 {
            return Err("target_fps must be >= 1");
        }
        if self.detect_interval == 0 {
            return Err("detect_interval must be >= 1");
        }
        if self.smoothing_window == 0 {
            return Err("smoothing_window must be >= 1");
        }
        if !(0.0..=1.0).contains(&self.hysteresis_margin) {
            return Err("hysteresis_margin must be in [0, 1]");
        }
        if self.channel_capacity == 0 {
            return Err("channel_capacity must be >= 1");
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            detect_interval: DEFAULT_DETECT_INTERVAL,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            hysteresis_margin: DEFAULT_HYSTERESIS_MARGIN,
            min_face_area: MIN_FACE_AREA,
            min_confidence: MIN_CONFIDENCE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            stop_timeout: Duration::from_millis(DEFAULT_STOP_TIMEOUT_MS),
        }
    }
}
