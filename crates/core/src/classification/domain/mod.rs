pub mod emotion_classifier;
pub mod frame_classification;
