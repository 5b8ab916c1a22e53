/// A face rectangle in frame coordinates: `(x, y)` top-left corner
/// plus width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    /// Clamp to the bounds of a frame of the given size.
    ///
    /// Cached regions are re-projected onto the current frame on skip
    /// ticks; the current frame may be smaller than the one the region
    /// was detected on.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Region {
        let fw = frame_width as i32;
        let fh = frame_height as i32;
        let x = self.x.clamp(0, fw);
        let y = self.y.clamp(0, fh);
        let width = (self.x + self.width).clamp(0, fw) - x;
        let height = (self.y + self.height).clamp(0, fh) - y;
        Region {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_area() {
        assert_eq!(Region::new(10, 20, 30, 40).area(), 1200);
    }

    #[test]
    fn test_area_degenerate_is_zero() {
        assert_eq!(Region::new(0, 0, -5, 40).area(), 0);
        assert_eq!(Region::new(0, 0, 40, 0).area(), 0);
    }

    #[test]
    fn test_clamped_inside_bounds_is_unchanged() {
        let r = Region::new(10, 10, 50, 50);
        assert_eq!(r.clamped(640, 480), r);
    }

    #[rstest]
    #[case::negative_origin(Region::new(-10, -20, 50, 50), Region::new(0, 0, 40, 30))]
    #[case::overhangs_right(Region::new(600, 10, 100, 50), Region::new(600, 10, 40, 50))]
    #[case::overhangs_bottom(Region::new(10, 450, 50, 100), Region::new(10, 450, 50, 30))]
    #[case::fully_outside(Region::new(700, 500, 50, 50), Region::new(640, 480, 0, 0))]
    fn test_clamped_to_640x480(#[case] region: Region, #[case] expected: Region) {
        assert_eq!(region.clamped(640, 480), expected);
    }

    #[test]
    fn test_clamped_region_never_exceeds_frame() {
        let r = Region::new(-100, -100, 10_000, 10_000).clamped(320, 240);
        assert_eq!(r, Region::new(0, 0, 320, 240));
    }
}
