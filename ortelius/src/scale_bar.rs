//! On-screen distance scale.

use ortelius_types::cartesian::PixelPoint;
use ortelius_types::geo::Datum;

use crate::render::{Canvas, LinePaint};
use crate::view::MapView;
use crate::Color;

/// Configuration of a [`ScaleBar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBarOptions {
    /// Fraction of the screen width the bar aims to cover before its length
    /// is rounded to a readable number.
    pub width_fraction: f64,
    /// Distance of the bar from the lower-left screen corner, in pixels.
    pub margin: u32,
    /// Color of the bar and its label.
    pub color: Color,
    /// Ellipsoid used to measure the width of the viewport.
    pub datum: Datum,
}

impl Default for ScaleBarOptions {
    fn default() -> Self {
        Self {
            width_fraction: 0.25,
            margin: 12,
            color: Color::BLACK,
            datum: Datum::WGS84,
        }
    }
}

/// Draws a distance scale in the corner of the map.
///
/// The bar's length in meters is measured along the great circle at the
/// vertical middle of the screen, then rounded down to a number of the form
/// 1, 2 or 5 times a power of ten so the label reads "500m" or "2km" rather
/// than "473m". The drawn bar is shortened proportionally to match the
/// rounded distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleBar {
    options: ScaleBarOptions,
}

impl ScaleBar {
    /// Creates a scale bar with the given configuration.
    pub fn new(options: ScaleBarOptions) -> Self {
        Self { options }
    }

    /// Configuration of this scale bar.
    pub fn options(&self) -> ScaleBarOptions {
        self.options
    }

    /// Draws the bar onto the canvas.
    ///
    /// Does nothing if the view has no projection yet or the measured
    /// viewport width is not a usable positive number.
    pub fn draw(&self, canvas: &mut dyn Canvas, view: &MapView) {
        let Some(projection) = view.projection() else {
            return;
        };

        let screen = projection.screen();
        let mid = screen.height() as i32 / 2;
        let left = projection.to_geo(&PixelPoint::new(0, mid));
        let right = projection.to_geo(&PixelPoint::new(screen.width() as i32, mid));
        let screen_meters = self.options.datum.great_circle_distance(&left, &right);

        if !screen_meters.is_finite() || screen_meters <= 0.0 {
            log::debug!("skipping scale bar: viewport width is {screen_meters} meters");
            return;
        }

        let target_meters = screen_meters * self.options.width_fraction;
        let nice = NiceLength::from_meters(target_meters);
        let pixels_per_meter = f64::from(screen.width()) / screen_meters;
        let bar_width = (nice.meters() * pixels_per_meter).round() as i32;
        if bar_width < 1 {
            return;
        }

        let margin = self.options.margin as i32;
        let paint = LinePaint {
            color: self.options.color,
            width: 1,
        };

        let left_end = PixelPoint::new(margin, margin);
        let right_end = PixelPoint::new(margin + bar_width, margin);
        canvas.draw_line(left_end, right_end, paint);
        canvas.draw_line(left_end, PixelPoint::new(margin, margin + 4), paint);
        canvas.draw_line(right_end, PixelPoint::new(margin + bar_width, margin + 4), paint);
        canvas.draw_text(
            PixelPoint::new(margin, margin + 7),
            &nice.label(),
            self.options.color,
        );
    }
}

/// A distance rounded down to 1, 2 or 5 times a power of ten meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceLength {
    base: f64,
    multiplier: u32,
}

impl NiceLength {
    /// Largest nice length not exceeding the target.
    ///
    /// The multiplier ladder is {1, 2, 5}: the raw multiplier is clamped
    /// down to the nearest rung, so 930 meters becomes 500 meters, not 900.
    pub fn from_meters(target: f64) -> Self {
        let mut base = 10f64.powf(target.log10().floor());
        // log10 of an exact power of ten can land a hair below the integer.
        if base * 10.0 <= target {
            base *= 10.0;
        }

        let raw = (target / base).floor();
        let multiplier = if raw >= 5.0 {
            5
        } else if raw >= 2.0 {
            2
        } else {
            1
        };

        Self { base, multiplier }
    }

    /// Power-of-ten base of the length in meters.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// The ladder multiplier: 1, 2 or 5.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// The rounded distance in meters.
    pub fn meters(&self) -> f64 {
        self.base * f64::from(self.multiplier)
    }

    /// Human-readable label: meters below a kilometer base, kilometers from
    /// there on.
    pub fn label(&self) -> String {
        if self.base < 1000.0 {
            format!("{}m", self.meters() as i64)
        } else {
            format!("{}km", (self.meters() / 1000.0) as i64)
        }
    }
}
