use std::collections::HashMap;

use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// One detected face with a score per emotion category, each in [0, 1].
#[derive(Clone, Debug)]
pub struct Detection {
    pub region: Region,
    pub scores: HashMap<String, f64>,
}

impl Detection {
    pub fn new(region: Region, scores: HashMap<String, f64>) -> Self {
        Self { region, scores }
    }

    /// Highest-scoring category, or `None` for an empty score map.
    ///
    /// Equal scores break toward the lexicographically smaller name so
    /// the result does not depend on map iteration order.
    pub fn top_emotion(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (name, &score) in &self.scores {
            let better = match best {
                None => true,
                Some((bn, bs)) => score > bs || (score == bs && name.as_str() < bn),
            };
            if better {
                best = Some((name, score));
            }
        }
        best
    }
}

/// Domain interface for emotion classification (the classifier port).
///
/// Implementations may be slow (multi-hundred-millisecond calls) and
/// stateful, hence `&mut self`. Callers must treat any error as "zero
/// detections" for that frame; a classifier failure never terminates
/// the capture loop.
pub trait EmotionClassifier: Send {
    fn classify(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn detection(scores: &[(&str, f64)]) -> Detection {
        Detection::new(
            Region::new(0, 0, 100, 100),
            scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    #[test]
    fn test_top_emotion_picks_highest_score() {
        let d = detection(&[("happy", 0.9), ("sad", 0.05), ("neutral", 0.05)]);
        let (name, score) = d.top_emotion().unwrap();
        assert_eq!(name, "happy");
        assert_relative_eq!(score, 0.9);
    }

    #[test]
    fn test_top_emotion_empty_scores_is_none() {
        let d = detection(&[]);
        assert!(d.top_emotion().is_none());
    }

    #[test]
    fn test_top_emotion_tie_breaks_deterministically() {
        let d = detection(&[("surprise", 0.5), ("angry", 0.5)]);
        let (name, _) = d.top_emotion().unwrap();
        assert_eq!(name, "angry");
    }
}
