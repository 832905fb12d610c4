use approx::AbsDiffEq;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// An axis-aligned rectangle in geographic coordinates.
///
/// The rectangle is stored by its lower-left and upper-right corners, with
/// `x` being longitude and `y` latitude, both in degrees. Constructors
/// normalize the input so that `x_min <= x_max` and `y_min <= y_max` always
/// hold.
///
/// A zero-area rectangle is a legal value. It is what you get for a single
/// point, and callers that need a drawable area are expected to expand it
/// before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl GeoRect {
    /// Creates a rectangle from two opposite corners given as raw
    /// coordinates.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min: x_min.min(x_max),
            y_min: y_min.min(y_max),
            x_max: x_min.max(x_max),
            y_max: y_min.max(y_max),
        }
    }

    /// Creates a rectangle from two opposite corner points.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self::new(a.lon(), a.lat(), b.lon(), b.lat())
    }

    /// Zero-area rectangle collapsed onto a single point.
    pub fn from_point(point: GeoPoint) -> Self {
        Self::new(point.lon(), point.lat(), point.lon(), point.lat())
    }

    /// Smallest rectangle containing all the given points.
    ///
    /// Returns `None` if the iterator yields no points.
    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut rect = Self::from_point(iter.next()?);
        for point in iter {
            rect = rect.merge(Self::from_point(point));
        }

        Some(rect)
    }

    /// Western boundary, degrees of longitude.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Southern boundary, degrees of latitude.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Eastern boundary, degrees of longitude.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Northern boundary, degrees of latitude.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Lower-left corner.
    pub fn lower_left(&self) -> GeoPoint {
        GeoPoint::latlon(self.y_min, self.x_min)
    }

    /// Upper-right corner.
    pub fn upper_right(&self) -> GeoPoint {
        GeoPoint::latlon(self.y_max, self.x_max)
    }

    /// Center of the rectangle.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::latlon(
            (self.y_min + self.y_max) / 2.0,
            (self.x_min + self.x_max) / 2.0,
        )
    }

    /// True if either span is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// True if the point lies inside the rectangle or on its boundary.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lon() >= self.x_min
            && point.lon() <= self.x_max
            && point.lat() >= self.y_min
            && point.lat() <= self.y_max
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Shifts the rectangle by the given vector, `x` being degrees of
    /// longitude and `y` degrees of latitude.
    pub fn translate(&self, delta: Vector2<f64>) -> Self {
        Self {
            x_min: self.x_min + delta.x,
            y_min: self.y_min + delta.y,
            x_max: self.x_max + delta.x,
            y_max: self.y_max + delta.y,
        }
    }

    /// Rectangle with the same center and the given spans.
    pub fn with_spans(&self, width: f64, height: f64) -> Self {
        let center = self.center();
        Self::new(
            center.lon() - width / 2.0,
            center.lat() - height / 2.0,
            center.lon() + width / 2.0,
            center.lat() + height / 2.0,
        )
    }

    /// Rectangle grown on every side by the given fraction of the
    /// corresponding span.
    pub fn with_margin(&self, fraction: f64) -> Self {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        Self::new(
            self.x_min - dx,
            self.y_min - dy,
            self.x_max + dx,
            self.y_max + dy,
        )
    }
}

impl AbsDiffEq for GeoRect {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x_min.abs_diff_eq(&other.x_min, epsilon)
            && self.y_min.abs_diff_eq(&other.y_min, epsilon)
            && self.x_max.abs_diff_eq(&other.x_max, epsilon)
            && self.y_max.abs_diff_eq(&other.y_max, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::latlon;

    #[test]
    fn new_normalizes_corners() {
        let rect = GeoRect::new(10.0, 50.0, 5.0, 40.0);
        assert_eq!(rect.x_min(), 5.0);
        assert_eq!(rect.y_min(), 40.0);
        assert_eq!(rect.x_max(), 10.0);
        assert_eq!(rect.y_max(), 50.0);
    }

    #[test]
    fn from_points_builds_hull() {
        let rect = GeoRect::from_points(vec![
            latlon!(52.0, 13.0),
            latlon!(48.0, 16.0),
            latlon!(50.0, 8.0),
        ])
        .unwrap();

        assert_eq!(rect.x_min(), 8.0);
        assert_eq!(rect.y_min(), 48.0);
        assert_eq!(rect.x_max(), 16.0);
        assert_eq!(rect.y_max(), 52.0);
    }

    #[test]
    fn from_points_of_empty_input_is_none() {
        assert!(GeoRect::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_rect_is_degenerate() {
        let rect = GeoRect::from_point(latlon!(52.0, 13.0));
        assert!(rect.is_degenerate());
        assert_eq!(rect.center().lat(), 52.0);
        assert_eq!(rect.center().lon(), 13.0);
    }

    #[test]
    fn merge_covers_both_inputs() {
        let a = GeoRect::new(0.0, 0.0, 1.0, 1.0);
        let b = GeoRect::new(2.0, -1.0, 3.0, 0.5);
        let merged = a.merge(b);
        assert_eq!(merged, GeoRect::new(0.0, -1.0, 3.0, 1.0));
    }

    #[test]
    fn translate_shifts_both_corners() {
        let rect = GeoRect::new(0.0, 0.0, 1.0, 1.0);
        let shifted = rect.translate(Vector2::new(2.0, -3.0));
        assert_abs_diff_eq!(shifted, GeoRect::new(2.0, -3.0, 3.0, -2.0));
    }

    #[test]
    fn with_spans_keeps_center() {
        let rect = GeoRect::new(0.0, 0.0, 2.0, 2.0);
        let resized = rect.with_spans(4.0, 1.0);
        assert_abs_diff_eq!(resized, GeoRect::new(-1.0, 0.5, 3.0, 1.5));
        assert_abs_diff_eq!(resized.center().lon(), 1.0);
        assert_abs_diff_eq!(resized.center().lat(), 1.0);
    }

    #[test]
    fn with_margin_grows_every_side() {
        let rect = GeoRect::new(0.0, 0.0, 1.0, 2.0);
        let grown = rect.with_margin(0.2);
        assert_abs_diff_eq!(grown, GeoRect::new(-0.2, -0.4, 1.2, 2.4), epsilon = 1e-12);
    }

    #[test]
    fn contains_includes_boundary() {
        let rect = GeoRect::new(0.0, 0.0, 1.0, 1.0);
        assert!(rect.contains(&latlon!(0.0, 0.0)));
        assert!(rect.contains(&latlon!(0.5, 0.5)));
        assert!(!rect.contains(&latlon!(1.5, 0.5)));
    }
}
