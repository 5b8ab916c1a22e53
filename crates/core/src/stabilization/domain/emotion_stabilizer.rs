use std::collections::VecDeque;

use crate::shared::constants::{
    DEFAULT_HYSTERESIS_MARGIN, DEFAULT_SMOOTHING_WINDOW, NEUTRAL_EMOTION,
};

/// Converts a noisy per-tick emotion signal into a low-jitter output.
///
/// Two mechanisms combine:
///
/// 1. **Sliding-window weighted vote.** Each observation pushes a raw
///    `(emotion, score)` pair into a bounded history (oldest evicted
///    first). The candidate is the category with the highest *sum* of
///    scores across the window; its reported confidence is that sum
///    divided by the current history length. A rare but high-scoring
///    category can therefore beat a frequent low-scoring one.
/// 2. **Hysteresis gate.** A candidate of a *different* category than
///    the current stable one must score at least `margin` above the
///    incumbent's score, otherwise the previous stable state is
///    re-emitted unchanged.
///
/// Before any observation the stable state is `neutral` at 0.0.
pub struct EmotionStabilizer {
    capacity: usize,
    margin: f64,
    history: VecDeque<(String, f64)>,
    stable: (String, f64),
}

impl EmotionStabilizer {
    pub fn new(capacity: usize, margin: f64) -> Self {
        Self {
            capacity: capacity.max(1),
            margin,
            history: VecDeque::new(),
            stable: (NEUTRAL_EMOTION.to_string(), 0.0),
        }
    }

    /// The last emitted stable state.
    pub fn current(&self) -> (&str, f64) {
        (&self.stable.0, self.stable.1)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Records one raw classification and returns the stable state.
    ///
    /// Called on detect ticks only; skip ticks must not touch the
    /// history.
    pub fn observe(&mut self, emotion: &str, score: f64) -> (String, f64) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back((emotion.to_string(), score));

        let (candidate, candidate_score) = self.windowed_vote();
        if candidate != self.stable.0 && candidate_score < self.stable.1 + self.margin {
            return self.stable.clone();
        }
        self.stable = (candidate, candidate_score);
        self.stable.clone()
    }

    /// Highest summed score over the window; confidence is the sum
    /// divided by the history length. Ties go to the category seen
    /// earliest in the window.
    fn windowed_vote(&self) -> (String, f64) {
        let mut totals: Vec<(&str, f64)> = Vec::new();
        for (emotion, score) in &self.history {
            match totals.iter_mut().find(|(name, _)| *name == emotion) {
                Some((_, total)) => *total += score,
                None => totals.push((emotion, *score)),
            }
        }

        let mut best: (&str, f64) = totals[0];
        for &(name, total) in &totals[1..] {
            if total > best.1 {
                best = (name, total);
            }
        }
        (best.0.to_string(), best.1 / self.history.len() as f64)
    }
}

impl Default for EmotionStabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW, DEFAULT_HYSTERESIS_MARGIN)
    }
}
