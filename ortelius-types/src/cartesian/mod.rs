//! Screen-space types measured in pixels.

mod point;
mod size;

pub use point::PixelPoint;
pub use size::Size;

/// Pixel size of a drawing surface.
pub type ScreenSize = Size<u32>;
