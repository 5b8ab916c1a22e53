use std::time::Instant;

use ndarray::ArrayView3;

/// A single captured frame: contiguous RGB bytes in row-major order,
/// plus a monotonically increasing sequence number and capture time.
///
/// Format conversion happens at capture boundaries only; the domain
/// layer treats pixel data as opaque. A frame is produced by one
/// source read, consumed by one pipeline tick, and never retained by
/// the source after handoff.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    sequence: usize,
    captured_at: Instant,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, sequence: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            sequence,
            captured_at: Instant::now(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    /// View as `(height, width, channels)` for classifier consumers.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        );
        ArrayView3::from_shape(shape, &self.data).expect("Frame data length must match dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.sequence(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_captured_at_is_monotonic_across_frames() {
        let a = Frame::new(vec![0u8; 3], 1, 1, 3, 0);
        let b = Frame::new(vec![0u8; 3], 1, 1, 3, 1);
        assert!(b.captured_at() >= a.captured_at());
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let data = vec![0u8; 24]; // 2x4x3
        let frame = Frame::new(data, 4, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGB: set pixel (row=1, col=0) to red
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr[[1, 0, 0]], 255); // R
        assert_eq!(arr[[1, 0, 1]], 0); // G
        assert_eq!(arr[[1, 0, 2]], 0); // B
    }
}
