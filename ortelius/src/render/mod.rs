//! Rendering backend of the map.
//!
//! The engine draws through the [`Canvas`] trait, which a backend implements
//! with whatever surface it has. The crate ships one backend, the software
//! [`RasterCanvas`], which composes frames into an RGBA image in memory.

mod glyphs;
mod raster;

pub use raster::RasterCanvas;

use ortelius_types::cartesian::{PixelPoint, ScreenSize};

use crate::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stroke parameters for drawing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinePaint {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: u32,
}

impl Default for LinePaint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1,
        }
    }
}

/// Parameters for drawing point markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointPaint {
    /// Fill color of the marker.
    pub color: Color,
    /// Radius of the marker in pixels.
    pub radius: u32,
}

impl Default for PointPaint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            radius: 4,
        }
    }
}

/// Drawing operations the map composes frames with.
///
/// All coordinates are [`PixelPoint`]s with the lower-left origin. Every
/// operation clips against the surface: drawing outside of it is a no-op,
/// never an error, so callers can project geometry near the viewport edge
/// without bounds checking.
pub trait Canvas {
    /// Size of the drawing surface.
    fn size(&self) -> ScreenSize;

    /// Fills the whole surface with one color.
    fn clear(&mut self, color: Color);

    /// Draws a straight line segment between two points.
    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, paint: LinePaint);

    /// Fills a disc centered at `center`.
    fn fill_circle(&mut self, center: PixelPoint, radius: u32, color: Color);

    /// Outlines the axis-aligned rectangle spanned by two opposite corners.
    fn stroke_rect(&mut self, corner_a: PixelPoint, corner_b: PixelPoint, paint: LinePaint);

    /// Fills the axis-aligned rectangle spanned by two opposite corners.
    fn fill_rect(&mut self, corner_a: PixelPoint, corner_b: PixelPoint, color: Color);

    /// Draws a short label with the built-in glyph set, `origin` being the
    /// lower-left corner of the first character.
    ///
    /// Only digits and the letters needed for distance labels are available;
    /// unknown characters are skipped.
    fn draw_text(&mut self, origin: PixelPoint, text: &str, color: Color);
}
