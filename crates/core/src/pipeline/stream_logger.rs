use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting observer for stream loop events.
///
/// Keeps the controller loop free of any particular output mechanism:
/// a GUI consumer can stay silent while the CLI reports timings.
pub trait StreamLogger: Send {
    /// One update was delivered for the frame with this sequence number.
    fn frame(&mut self, sequence: usize);

    /// How long a named loop stage took for one tick.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Point-in-time metric (e.g. update-channel depth).
    fn metric(&mut self, name: &str, value: f64);

    /// Human-readable status message.
    fn info(&mut self, message: &str);

    /// End-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used where the consumer has
/// its own reporting, and in tests.
pub struct NullStreamLogger;

impl StreamLogger for NullStreamLogger {
    fn frame(&mut self, _sequence: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` facade: throttled per-frame progress
/// plus a per-stage timing summary at the end of the run.
pub struct LogStreamLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    started_at: Instant,
    frames: usize,
}

impl LogStreamLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            started_at: Instant::now(),
            frames: 0,
        }
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.timings.is_empty() {
            return None;
        }

        let elapsed_s = self.started_at.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Stream summary ({} frames, {elapsed_s:.1}s):",
            self.frames
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let avg_ms = durations.iter().sum::<f64>() / durations.len() as f64;
            lines.push(format!("  {stage:10}: avg {avg_ms:6.1}ms over {} ticks", durations.len()));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        if self.frames > 0 && elapsed_s > 0.0 {
            lines.push(format!(
                "  Effective rate: {:.1} fps",
                self.frames as f64 / elapsed_s
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn frames_seen(&self) -> usize {
        self.frames
    }
}

impl Default for LogStreamLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl StreamLogger for LogStreamLogger {
    fn frame(&mut self, sequence: usize) {
        self.frames += 1;
        if self.frames % self.throttle_frames == 0 {
            log::info!("streamed {} frames (latest sequence {sequence})", self.frames);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
