use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Reference ellipsoid used to measure distances on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// The WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Semimajor axis of the ellipsoid in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening of the ellipsoid.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Mean radius of the ellipsoid in meters.
    pub fn mean_radius(&self) -> f64 {
        let semiminor = self.semimajor * (1.0 - 1.0 / self.inv_flattening);
        (2.0 * self.semimajor + semiminor) / 3.0
    }

    /// Great-circle distance between two points in meters.
    ///
    /// Uses the haversine formula on a sphere of the datum's mean radius,
    /// which is accurate to a fraction of a percent. Good enough for a scale
    /// bar, not for geodesy.
    pub fn great_circle_distance(&self, from: &GeoPoint, to: &GeoPoint) -> f64 {
        let half_dlat = (to.lat_rad() - from.lat_rad()) / 2.0;
        let half_dlon = (to.lon_rad() - from.lon_rad()) / 2.0;
        let a = half_dlat.sin().powi(2)
            + from.lat_rad().cos() * to.lat_rad().cos() * half_dlon.sin().powi(2);

        2.0 * self.mean_radius() * a.sqrt().asin()
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::latlon;

    #[test]
    fn wgs84_mean_radius() {
        assert_relative_eq!(Datum::WGS84.mean_radius(), 6_371_008.77, epsilon = 0.01);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let datum = Datum::WGS84;
        let distance =
            datum.great_circle_distance(&latlon!(0.0, 0.0), &latlon!(0.0, 1.0));
        assert_relative_eq!(distance, 111_195.0, max_relative = 1e-4);
    }

    #[test]
    fn longitude_distance_shrinks_with_latitude() {
        let datum = Datum::WGS84;
        let at_equator =
            datum.great_circle_distance(&latlon!(0.0, 13.0), &latlon!(0.0, 14.0));
        let at_berlin =
            datum.great_circle_distance(&latlon!(52.5, 13.0), &latlon!(52.5, 14.0));
        assert!(at_berlin < at_equator * 0.65);
        assert!(at_berlin > at_equator * 0.55);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let datum = Datum::default();
        let point = latlon!(48.8566, 2.3522);
        assert_eq!(datum.great_circle_distance(&point, &point), 0.0);
    }
}
