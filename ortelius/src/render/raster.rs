use image::{Rgba, RgbaImage};
use nalgebra::Vector2;
use ortelius_types::cartesian::{PixelPoint, ScreenSize};

use super::glyphs;
use super::{Canvas, LinePaint};
use crate::Color;

/// Software canvas backed by an RGBA image in memory.
///
/// This is the compositing target of the engine: layers, overlays and the
/// scale bar all draw into it, and the finished frame can be copied to a
/// window surface or encoded to a file.
///
/// The canvas speaks the engine's lower-left pixel coordinates; the
/// conversion to the top-down row order of the underlying image happens at
/// the single point where a pixel is written.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Creates a canvas of the given size with all pixels transparent.
    pub fn new(size: ScreenSize) -> Self {
        Self {
            image: RgbaImage::new(size.width(), size.height()),
        }
    }

    /// The composed image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the canvas and returns the composed image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Copies `source` onto the canvas shifted by `offset`, in canvas
    /// coordinates: positive `y` moves the content up.
    ///
    /// Pixels shifted outside the surface are dropped; uncovered areas keep
    /// whatever the canvas already contains.
    pub(crate) fn blit(&mut self, source: &RgbaImage, offset: Vector2<i32>) {
        let (width, height) = self.image.dimensions();
        for (x, y, pixel) in source.enumerate_pixels() {
            // Image rows grow downward, so moving content up means
            // decreasing the row index.
            let dest_x = x as i32 + offset.x;
            let dest_y = y as i32 - offset.y;
            if dest_x < 0 || dest_y < 0 || dest_x >= width as i32 || dest_y >= height as i32 {
                continue;
            }

            self.image.put_pixel(dest_x as u32, dest_y as u32, *pixel);
        }
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.is_transparent() {
            return;
        }

        let (width, height) = self.image.dimensions();
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }

        let row = height - 1 - y as u32;
        self.image.put_pixel(x as u32, row, Rgba(color.to_u8_array()));
    }

    fn stamp(&mut self, x: i32, y: i32, radius: i32, color: Color) {
        if radius <= 0 {
            self.put_pixel(x, y, color);
            return;
        }

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.put_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Cuts a segment down to the part that can touch the surface.
    ///
    /// Projected coordinates are unbounded: a segment may span billions of
    /// pixels, and its length may not even fit in `i32`. It can only be
    /// walked pixel by pixel after clipping. The window is one brush radius
    /// wider than the surface, so thick lines passing just outside still
    /// bleed in.
    fn clip_segment(
        &self,
        from: PixelPoint,
        to: PixelPoint,
        margin: i32,
    ) -> Option<(PixelPoint, PixelPoint)> {
        let (width, height) = self.image.dimensions();
        let apron = f64::from(margin) + 1.0;
        let min_x = -apron;
        let min_y = -apron;
        let max_x = f64::from(width) + apron;
        let max_y = f64::from(height) + apron;

        let x0 = f64::from(from.x);
        let y0 = f64::from(from.y);
        let dx = f64::from(to.x) - x0;
        let dy = f64::from(to.y) - y0;

        // Liang-Barsky: every window boundary shrinks the parameter range
        // [t0, t1] of the visible part of the segment.
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-dx, x0 - min_x),
            (dx, max_x - x0),
            (-dy, y0 - min_y),
            (dy, max_y - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
            }
        }

        if t0 > t1 {
            return None;
        }

        let point_at =
            |t: f64| PixelPoint::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
        Some((point_at(t0), point_at(t1)))
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> ScreenSize {
        let (width, height) = self.image.dimensions();
        ScreenSize::new(width, height)
    }

    fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_u8_array());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, paint: LinePaint) {
        // Bresenham with a square brush for widths above one pixel.
        let radius = paint.width as i32 / 2;
        let Some((from, to)) = self.clip_segment(from, to, radius) else {
            return;
        };

        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let step_x = if from.x < to.x { 1 } else { -1 };
        let step_y = if from.y < to.y { 1 } else { -1 };

        let mut x = from.x;
        let mut y = from.y;
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, radius, paint.color);
            if x == to.x && y == to.y {
                break;
            }

            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn fill_circle(&mut self, center: PixelPoint, radius: u32, color: Color) {
        let r = radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put_pixel(center.x + dx, center.y + dy, color);
                }
            }
        }
    }

    fn stroke_rect(&mut self, corner_a: PixelPoint, corner_b: PixelPoint, paint: LinePaint) {
        let x_min = corner_a.x.min(corner_b.x);
        let x_max = corner_a.x.max(corner_b.x);
        let y_min = corner_a.y.min(corner_b.y);
        let y_max = corner_a.y.max(corner_b.y);

        self.draw_line(PixelPoint::new(x_min, y_min), PixelPoint::new(x_max, y_min), paint);
        self.draw_line(PixelPoint::new(x_max, y_min), PixelPoint::new(x_max, y_max), paint);
        self.draw_line(PixelPoint::new(x_max, y_max), PixelPoint::new(x_min, y_max), paint);
        self.draw_line(PixelPoint::new(x_min, y_max), PixelPoint::new(x_min, y_min), paint);
    }

    fn fill_rect(&mut self, corner_a: PixelPoint, corner_b: PixelPoint, color: Color) {
        let x_min = corner_a.x.min(corner_b.x);
        let x_max = corner_a.x.max(corner_b.x);
        let y_min = corner_a.y.min(corner_b.y);
        let y_max = corner_a.y.max(corner_b.y);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                self.put_pixel(x, y, color);
            }
        }
    }

    fn draw_text(&mut self, origin: PixelPoint, text: &str, color: Color) {
        for (index, c) in text.chars().enumerate() {
            let Some(rows) = glyphs::glyph(c) else {
                continue;
            };

            let cell_x = origin.x + index as i32 * glyphs::ADVANCE;
            for (row_index, row) in rows.iter().enumerate() {
                let y = origin.y + (glyphs::HEIGHT - 1) - row_index as i32;
                for col in 0..5 {
                    if row & (0x10 >> col) != 0 {
                        self.put_pixel(cell_x + col, y, color);
                    }
                }
            }
        }
    }
}
