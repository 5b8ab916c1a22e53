use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::{CaptureError, FrameSource, ReadOutcome};
use crate::shared::frame::Frame;

/// Adapts a single image file to the [`FrameSource`] interface.
///
/// The image is decoded once at `open()` and replayed on every read
/// with a fresh sequence number and capture timestamp, so the rest of
/// the pipeline sees an ordinary frame stream. Useful when no camera
/// is available or a fixed scene is wanted.
pub struct StillImageSource {
    path: PathBuf,
    pixels: Option<DecodedImage>,
    next_sequence: usize,
}

struct DecodedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl StillImageSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pixels: None,
            next_sequence: 0,
        }
    }
}

impl FrameSource for StillImageSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        let img = image::open(&self.path).map_err(|e| CaptureError::Open(Box::new(e)))?;
        let rgb = img.to_rgb8();
        self.pixels = Some(DecodedImage {
            width: rgb.width(),
            height: rgb.height(),
            data: rgb.into_raw(),
        });
        self.next_sequence = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<ReadOutcome, CaptureError> {
        let decoded = self.pixels.as_ref().ok_or(CaptureError::Closed)?;
        let frame = Frame::new(
            decoded.data.clone(),
            decoded.width,
            decoded.height,
            3,
            self.next_sequence,
        );
        self.next_sequence += 1;
        Ok(ReadOutcome::Frame(frame))
    }

    fn close(&mut self) {
        if self.pixels.take().is_some() {
            log::debug!("released still image source {}", self.path.display());
        }
    }
}
