/// Mapping from projected homogeneous coordinates to viewport pixels
use nalgebra::Vector4;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;

/// Integer pixel coordinate, origin at the top-left of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Output surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Perspective divide and viewport scaling.
    ///
    /// The divisor is the negated projected z, not w. Returns `None` when
    /// that depth is zero or the result is not finite; callers skip the
    /// segment.
    pub fn to_screen(&self, projected: &Vector4<f64>) -> Option<ScreenPoint> {
        let depth = -projected.z;
        if depth == 0.0 {
            return None;
        }

        let (half_w, half_h) = self.center();
        let x = projected.x * half_w / depth + half_w;
        let y = projected.y * half_h / depth + half_h;

        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        // `as` truncates toward zero and saturates at the i32 range
        Some(ScreenPoint::new(x as i32, y as i32))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screen_divides_by_negated_z() {
        let viewport = Viewport::default();
        let point = viewport.to_screen(&Vector4::new(100.0, -50.0, -200.0, 1.0));
        assert_eq!(point, Some(ScreenPoint::new(600, 300)));
    }

    #[test]
    fn test_to_screen_truncates_toward_zero() {
        let viewport = Viewport::default();
        let point = viewport.to_screen(&Vector4::new(1.0, -1.0, -3.0, 1.0));
        // 400 + 133.33 and 400 - 133.33
        assert_eq!(point, Some(ScreenPoint::new(533, 266)));
    }

    #[test]
    fn test_to_screen_uses_viewport_halves() {
        let viewport = Viewport::new(200, 100);
        let point = viewport.to_screen(&Vector4::new(1.0, 1.0, -1.0, 1.0));
        assert_eq!(point, Some(ScreenPoint::new(200, 100)));
        let origin = viewport.to_screen(&Vector4::new(0.0, 0.0, -5.0, 1.0));
        assert_eq!(origin, Some(ScreenPoint::new(100, 50)));
    }

    #[test]
    fn test_zero_depth_is_skipped() {
        let viewport = Viewport::default();
        assert_eq!(viewport.to_screen(&Vector4::new(1.0, 1.0, 0.0, 1.0)), None);
        assert_eq!(viewport.to_screen(&Vector4::new(1.0, 1.0, -0.0, 1.0)), None);
    }

    #[test]
    fn test_non_finite_is_skipped() {
        let viewport = Viewport::default();
        assert_eq!(viewport.to_screen(&Vector4::new(f64::NAN, 1.0, -1.0, 1.0)), None);
        assert_eq!(viewport.to_screen(&Vector4::new(1.0, f64::INFINITY, -1.0, 1.0)), None);
    }

}
