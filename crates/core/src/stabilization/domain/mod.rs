pub mod emotion_stabilizer;
