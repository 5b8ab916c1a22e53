use crate::classification::domain::emotion_classifier::Detection;
use crate::shared::constants::NEUTRAL_EMOTION;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// One accepted face: region plus its best category and score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRegion {
    pub region: Region,
    pub emotion: String,
    pub score: f64,
}

/// The classification result of a single detect tick, and the value
/// object cached for redrawing on skip ticks.
///
/// `emotion`/`score` describe the primary face; `faces` lists every
/// accepted detection. When nothing is accepted the result is the
/// neutral default with zero confidence and no faces.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameClassification {
    pub emotion: String,
    pub score: f64,
    pub faces: Vec<ScoredRegion>,
}

impl FrameClassification {
    /// The default result: neutral, zero confidence, no faces.
    pub fn neutral() -> Self {
        Self {
            emotion: NEUTRAL_EMOTION.to_string(),
            score: 0.0,
            faces: Vec::new(),
        }
    }

    /// Derives a result from raw detections for one frame.
    ///
    /// A detection is accepted when its region area is at least
    /// `min_area` and its best score at least `min_confidence`;
    /// everything else is dropped here, before the stabilizer sees it.
    /// The primary is the largest accepted region; equal areas go to
    /// the earliest accepted detection.
    pub fn from_detections(detections: &[Detection], min_area: i64, min_confidence: f64) -> Self {
        let mut faces: Vec<ScoredRegion> = Vec::new();
        for detection in detections {
            if detection.region.area() < min_area {
                continue;
            }
            let Some((emotion, score)) = detection.top_emotion() else {
                continue;
            };
            if score < min_confidence {
                continue;
            }
            faces.push(ScoredRegion {
                region: detection.region,
                emotion: emotion.to_string(),
                score,
            });
        }

        let mut primary: Option<&ScoredRegion> = None;
        for face in &faces {
            if primary.map_or(true, |p| face.region.area() > p.region.area()) {
                primary = Some(face);
            }
        }

        match primary {
            Some(p) => Self {
                emotion: p.emotion.clone(),
                score: p.score,
                faces: faces.clone(),
            },
            None => Self::neutral(),
        }
    }

    pub fn regions(&self) -> Vec<Region> {
        self.faces.iter().map(|f| f.region).collect()
    }

    /// Re-projects this (possibly stale) result onto the given frame:
    /// same labels and scores, regions clamped to the frame bounds.
    pub fn projected_onto(&self, frame: &Frame) -> Self {
        Self {
            emotion: self.emotion.clone(),
            score: self.score,
            faces: self
                .faces
                .iter()
                .map(|f| ScoredRegion {
                    region: f.region.clamped(frame.width(), frame.height()),
                    emotion: f.emotion.clone(),
                    score: f.score,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn detection(x: i32, w: i32, h: i32, scores: &[(&str, f64)]) -> Detection {
        let map: HashMap<String, f64> =
            scores.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        Detection::new(Region::new(x, 0, w, h), map)
    }

    #[test]
    fn test_no_detections_is_neutral() {
        let result = FrameClassification::from_detections(&[], 1600, 0.25);
        assert_eq!(result.emotion, "neutral");
        assert_relative_eq!(result.score, 0.0);
        assert!(result.faces.is_empty());
    }

    #[test]
    fn test_small_regions_are_dropped() {
        let detections = vec![detection(0, 30, 30, &[("happy", 0.9)])]; // 900 < 1600
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);
        assert_eq!(result.emotion, "neutral");
        assert!(result.faces.is_empty());
    }

    #[test]
    fn test_low_confidence_is_dropped() {
        let detections = vec![detection(0, 100, 100, &[("sad", 0.2)])];
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);
        assert_eq!(result.emotion, "neutral");
    }

    #[test]
    fn test_empty_score_map_is_dropped() {
        let detections = vec![detection(0, 100, 100, &[])];
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);
        assert_eq!(result.emotion, "neutral");
    }

    #[test]
    fn test_primary_is_largest_accepted_region() {
        let detections = vec![
            detection(0, 50, 50, &[("happy", 0.9)]),
            detection(100, 80, 80, &[("sad", 0.6)]),
        ];
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);
        assert_eq!(result.emotion, "sad");
        assert_relative_eq!(result.score, 0.6);
        assert_eq!(result.faces.len(), 2);
    }

    #[test]
    fn test_primary_tie_goes_to_earliest() {
        let detections = vec![
            detection(0, 60, 60, &[("fear", 0.7)]),
            detection(100, 60, 60, &[("angry", 0.8)]),
        ];
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);
        assert_eq!(result.emotion, "fear");
    }

    #[test]
    fn test_rejected_detection_never_reaches_faces() {
        let detections = vec![
            detection(0, 100, 100, &[("happy", 0.9)]),
            detection(100, 10, 10, &[("sad", 0.99)]), // too small
        ];
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);
        assert_eq!(result.faces.len(), 1);
        assert_eq!(result.regions(), vec![Region::new(0, 0, 100, 100)]);
    }

    #[test]
    fn test_projected_onto_clamps_regions() {
        let detections = vec![detection(100, 100, 100, &[("happy", 0.9)])];
        let result = FrameClassification::from_detections(&detections, 1600, 0.25);

        let small = Frame::new(vec![0u8; 150 * 150 * 3], 150, 150, 3, 7);
        let projected = result.projected_onto(&small);
        assert_eq!(projected.emotion, "happy");
        assert_eq!(projected.faces[0].region, Region::new(100, 0, 50, 100));
    }
}
