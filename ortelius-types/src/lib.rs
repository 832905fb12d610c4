//! Geometric primitives shared by the Ortelius map engine and applications
//! built on top of it.
//!
//! The crate is split along the two coordinate spaces a map works in:
//!
//! * [`geo`] contains types measured in degrees on the Earth's surface:
//!   [`geo::GeoPoint`], [`geo::GeoRect`] and the [`geo::Datum`] used for
//!   distance calculations.
//! * [`cartesian`] contains screen-space types measured in pixels:
//!   [`cartesian::PixelPoint`] and [`cartesian::Size`].
//!
//! Keeping the two spaces in distinct types means a latitude can never be
//! handed to a function that wanted a pixel row. Conversion between the
//! spaces is the map engine's job and is not provided here.

pub mod cartesian;
pub mod geo;
