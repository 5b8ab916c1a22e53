use crate::capture::domain::frame_source::{CaptureError, FrameSource, ReadOutcome};
use crate::shared::frame::Frame;

/// Deviceless [`FrameSource`] generating a moving gradient pattern.
///
/// The generic fallback backend: lets the pipeline run end to end
/// where no camera or input file exists (demos, CI).
pub struct SyntheticSource {
    width: u32,
    height: u32,
    open: bool,
    next_sequence: usize,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            open: false,
            next_sequence: 0,
        }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(320, 240)
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        self.open = true;
        self.next_sequence = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<ReadOutcome, CaptureError> {
        if !self.open {
            return Err(CaptureError::Closed);
        }
        let seq = self.next_sequence;
        self.next_sequence += 1;

        let w = self.width as usize;
        let h = self.height as usize;
        let phase = (seq % 256) as u8;
        let mut data = Vec::with_capacity(w * h * 3);
        for row in 0..h {
            for col in 0..w {
                data.push(phase.wrapping_add(col as u8));
                data.push(phase.wrapping_add(row as u8));
                data.push(phase);
            }
        }

        Ok(ReadOutcome::Frame(Frame::new(
            data,
            self.width,
            self.height,
            3,
            seq,
        )))
    }

    fn close(&mut self) {
        self.open = false;
    }
}
