use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// A position on the Earth's surface given by latitude and longitude in
/// degrees.
///
/// The type does not restrict the coordinates to any range. Validity of the
/// values is the data source's concern; the engine treats whatever it is
/// given as plain numbers.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    pub fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }
}

impl AbsDiffEq for GeoPoint {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a [`GeoPoint`] from latitude and longitude values in degrees.
///
/// ```
/// use ortelius_types::latlon;
///
/// let point = latlon!(52.52, 13.405);
/// assert_eq!(point.lat(), 52.52);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::geo::GeoPoint::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latlon_macro_creates_point() {
        let point = latlon!(37.566, 126.9784);
        assert_eq!(point.lat(), 37.566);
        assert_eq!(point.lon(), 126.9784);
    }

    #[test]
    fn radians_match_degrees() {
        let point = GeoPoint::latlon(90.0, -180.0);
        assert!((point.lat_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((point.lon_rad() + std::f64::consts::PI).abs() < 1e-12);
    }
}
