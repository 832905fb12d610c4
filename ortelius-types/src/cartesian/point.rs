use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point on the screen in whole pixels.
///
/// The origin is the lower-left corner of the screen rectangle and `y` grows
/// upwards, so moving up on the screen means moving north on the map. Raster
/// surfaces that store rows top-down flip the coordinate at the moment a
/// pixel is written, never earlier.
///
/// Points outside the screen rectangle, including negative coordinates, are
/// valid values. They come up routinely when geometry near the viewport edge
/// is projected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal offset from the left edge of the screen.
    pub x: i32,
    /// Vertical offset from the bottom edge of the screen.
    pub y: i32,
}

impl PixelPoint {
    /// Creates a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `other` to `self`.
    pub fn diff(&self, other: &PixelPoint) -> Vector2<i32> {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    /// Sum of the horizontal and vertical distances to `other`.
    ///
    /// Cheaper than the Euclidean distance and good enough for threshold
    /// checks like drag detection.
    pub fn taxicab_distance(&self, other: &PixelPoint) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_points_from_other_to_self() {
        let a = PixelPoint::new(10, 20);
        let b = PixelPoint::new(3, 25);
        assert_eq!(a.diff(&b), Vector2::new(7, -5));
    }

    #[test]
    fn taxicab_distance_sums_axes() {
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(-3, 4);
        assert_eq!(a.taxicab_distance(&b), 7);
        assert_eq!(b.taxicab_distance(&a), 7);
    }
}
