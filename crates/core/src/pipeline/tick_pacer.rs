use std::thread;
use std::time::{Duration, Instant};

/// Paces loop ticks to a target rate.
///
/// After a tick's work is done, sleeps off whatever remains of the
/// `1 / target_fps` budget measured from the tick's start. A tick that
/// overran the budget proceeds immediately; no frames are dropped and
/// no catch-up is attempted, a slow tick simply delays the next one.
pub struct TickPacer {
    interval: Duration,
}

impl TickPacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / target_fps.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pace(&self, tick_start: Instant) {
        let elapsed = tick_start.elapsed();
        if elapsed < self.interval {
            thread::sleep(self.interval - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_fps() {
        assert_eq!(TickPacer::new(10).interval(), Duration::from_millis(100));
        assert_eq!(TickPacer::new(50).interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        assert_eq!(TickPacer::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_cheap_ticks_are_spaced_at_least_one_interval() {
        let pacer = TickPacer::new(50); // 20ms
        let start = Instant::now();
        for _ in 0..3 {
            let tick_start = Instant::now();
            pacer.pace(tick_start);
        }
        assert!(start.elapsed() >= Duration::from_millis(55));
    }

    #[test]
    fn test_overrunning_tick_does_not_sleep() {
        let pacer = TickPacer::new(20); // 50ms budget
        let tick_start = Instant::now() - Duration::from_millis(200);
        let before = Instant::now();
        pacer.pace(tick_start);
        assert!(before.elapsed() < Duration::from_millis(20));
    }
}
