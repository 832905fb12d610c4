//! Types measured in degrees on the Earth's surface.

mod datum;
mod point;
mod rect;

pub use datum::Datum;
pub use point::GeoPoint;
pub use rect::GeoRect;
