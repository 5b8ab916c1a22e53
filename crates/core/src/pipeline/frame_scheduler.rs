use crate::classification::domain::emotion_classifier::EmotionClassifier;
use crate::classification::domain::frame_classification::FrameClassification;
use crate::shared::frame::Frame;

/// Whether a tick actually ran the classifier or reused a cached result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    Detect,
    Skip,
}

impl TickKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickKind::Detect => "detect",
            TickKind::Skip => "skip",
        }
    }
}

/// Result of scheduling one frame through the pipeline.
#[derive(Clone, Debug)]
pub struct Tick {
    pub kind: TickKind,
    pub classification: FrameClassification,
}

/// Decouples the expensive classify step from smooth frame delivery.
///
/// Every `detect_interval`th tick invokes the classifier and caches
/// the derived [`FrameClassification`]; the ticks in between re-emit
/// the cached result re-projected onto the current frame, without
/// touching the classifier. Displayed boxes may therefore be stale by
/// up to `detect_interval - 1` ticks, a deliberate trade of accuracy
/// for steady frame delivery.
pub struct FrameScheduler {
    classifier: Box<dyn EmotionClassifier>,
    detect_interval: usize,
    min_face_area: i64,
    min_confidence: f64,
    tick_count: usize,
    cached: FrameClassification,
}

impl FrameScheduler {
    pub fn new(
        classifier: Box<dyn EmotionClassifier>,
        detect_interval: usize,
        min_face_area: i64,
        min_confidence: f64,
    ) -> Result<Self, &'static str> {
        if detect_interval < 1 {
            return Err("detect_interval must be >= 1");
        }
        Ok(Self {
            classifier,
            detect_interval,
            min_face_area,
            min_confidence,
            tick_count: 0,
            cached: FrameClassification::neutral(),
        })
    }

    /// Runs one tick. Classifier failures are caught here and degrade
    /// the tick to "zero detections", which derives to the neutral
    /// default; they never propagate into the loop.
    pub fn process(&mut self, frame: &Frame) -> Tick {
        let detect = self.tick_count % self.detect_interval == 0;
        self.tick_count += 1;

        if !detect {
            return Tick {
                kind: TickKind::Skip,
                classification: self.cached.projected_onto(frame),
            };
        }

        let detections = match self.classifier.classify(frame) {
            Ok(detections) => detections,
            Err(e) => {
                log::warn!("classifier failed on frame {}: {e}", frame.sequence());
                Vec::new()
            }
        };
        self.cached =
            FrameClassification::from_detections(&detections, self.min_face_area, self.min_confidence);

        Tick {
            kind: TickKind::Detect,
            classification: self.cached.clone(),
        }
    }

    /// Hands the classifier back, for reuse by a later stream run.
    pub fn into_classifier(self) -> Box<dyn EmotionClassifier> {
        self.classifier
    }
}
