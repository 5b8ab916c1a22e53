use std::collections::HashMap;

use crate::classification::domain::emotion_classifier::{Detection, EmotionClassifier};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Classifier that replays a fixed script of detection sets, cycling
/// when the script runs out.
///
/// Stands in for a real model in the demo binary and in wiring tests;
/// an empty script behaves like a classifier that never finds a face.
pub struct ScriptedClassifier {
    script: Vec<Vec<Detection>>,
    calls: usize,
}

impl ScriptedClassifier {
    pub fn new(script: Vec<Vec<Detection>>) -> Self {
        Self { script, calls: 0 }
    }

    /// One single-face detection set per `(emotion, score)` entry,
    /// using a fixed centered region.
    pub fn cycling(emotions: &[(&str, f64)]) -> Self {
        let script = emotions
            .iter()
            .map(|(emotion, score)| {
                let mut scores = HashMap::new();
                scores.insert(emotion.to_string(), *score);
                vec![Detection::new(Region::new(80, 60, 160, 160), scores)]
            })
            .collect();
        Self::new(script)
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl EmotionClassifier for ScriptedClassifier {
    fn classify(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let result = if self.script.is_empty() {
            Vec::new()
        } else {
            self.script[self.calls % self.script.len()].clone()
        };
        self.calls += 1;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(vec![0u8; 16 * 16 * 3], 16, 16, 3, 0)
    }

    #[test]
    fn test_cycles_through_script() {
        let mut classifier = ScriptedClassifier::cycling(&[("happy", 0.9), ("sad", 0.85)]);
        let a = classifier.classify(&frame()).unwrap();
        let b = classifier.classify(&frame()).unwrap();
        let c = classifier.classify(&frame()).unwrap();
        assert!(a[0].scores.contains_key("happy"));
        assert!(b[0].scores.contains_key("sad"));
        assert!(c[0].scores.contains_key("happy"));
        assert_eq!(classifier.calls(), 3);
    }

    #[test]
    fn test_empty_script_yields_no_detections() {
        let mut classifier = ScriptedClassifier::new(Vec::new());
        assert!(classifier.classify(&frame()).unwrap().is_empty());
        assert!(classifier.classify(&frame()).unwrap().is_empty());
    }
}
