//! Viewport state of the map and the projection derived from it.

use ortelius_types::cartesian::{PixelPoint, ScreenSize, Size};
use ortelius_types::geo::{GeoPoint, GeoRect};

use crate::error::OrteliusError;

/// Linear mapping between geographic and screen coordinates.
///
/// Longitude is scaled onto the `x` axis and latitude onto the `y` axis over
/// the bounding box the projection was created with. This is deliberately not
/// a Mercator projection: there is no latitude-dependent stretching, so both
/// directions of the mapping stay exact algebraic inverses of each other up
/// to pixel rounding. Hit testing and rendering rely on that symmetry, and
/// for the city-to-country extents the engine is used at the shape
/// distortion is not noticeable.
///
/// A projection is a snapshot. [`MapView`] derives a fresh one whenever the
/// viewport changes, and the one used for compositing a frame never changes
/// mid-frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    screen: ScreenSize,
    bounds: GeoRect,
}

impl MapProjection {
    /// Creates a projection mapping `bounds` onto a screen of size `screen`.
    ///
    /// Returns [`OrteliusError::DegenerateProjection`] if the screen or the
    /// bounding box has a zero span in either direction, since a scale factor
    /// cannot be derived then.
    pub fn new(screen: ScreenSize, bounds: GeoRect) -> Result<Self, OrteliusError> {
        if screen.is_zero() || bounds.is_degenerate() {
            return Err(OrteliusError::DegenerateProjection);
        }

        Ok(Self { screen, bounds })
    }

    /// Screen size the projection was created for.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Geographic bounds the projection was created for.
    pub fn bounds(&self) -> GeoRect {
        self.bounds
    }

    /// Projects a geographic point to screen pixels.
    ///
    /// The result uses the lower-left pixel origin. Points outside the bounds
    /// project to coordinates outside the screen rectangle; nothing is
    /// clipped here.
    pub fn to_pixel(&self, point: &GeoPoint) -> PixelPoint {
        let x = (point.lon() - self.bounds.x_min()) / self.bounds.width()
            * f64::from(self.screen.width());
        let y = (point.lat() - self.bounds.y_min()) / self.bounds.height()
            * f64::from(self.screen.height());

        PixelPoint::new(x.round() as i32, y.round() as i32)
    }

    /// Returns the geographic coordinate shown at the given pixel.
    pub fn to_geo(&self, pixel: &PixelPoint) -> GeoPoint {
        let lon = f64::from(pixel.x) / f64::from(self.screen.width()) * self.bounds.width()
            + self.bounds.x_min();
        let lat = f64::from(pixel.y) / f64::from(self.screen.height()) * self.bounds.height()
            + self.bounds.y_min();

        GeoPoint::latlon(lat, lon)
    }
}

/// The viewport of a map: which part of the world is shown on the screen.
///
/// The view keeps the *requested* bounding box exactly as the caller gave it
/// and derives the *effective* bounding box from it: the requested box grown
/// in one dimension until its aspect ratio matches the screen's, so that a
/// degree of longitude and a degree of latitude take the same number of
/// pixels. The effective box is what rendering and coordinate conversion
/// use. On every resize it is re-derived from the unchanged requested box,
/// which keeps repeated resizes from accumulating error.
///
/// Until the screen has a real size (before the first layout, or after the
/// window is collapsed to nothing) the view stores the requested box and
/// defers everything else; [`MapView::projection`] returns `None` in that
/// state and rendering skips the frame.
#[derive(Debug, Clone)]
pub struct MapView {
    requested: GeoRect,
    screen: ScreenSize,
    effective: GeoRect,
    projection: Option<MapProjection>,
}

impl MapView {
    /// Creates a view of the given extent with a zero-size screen.
    pub fn new(extent: GeoRect) -> Self {
        Self {
            requested: extent,
            screen: ScreenSize::default(),
            effective: extent,
            projection: None,
        }
    }

    /// Current screen size.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// The bounding box the caller asked for, unmodified.
    pub fn requested_bounds(&self) -> GeoRect {
        self.requested
    }

    /// The bounding box actually shown on the screen.
    ///
    /// Equals the requested box grown to the screen's aspect ratio, with the
    /// corner coordinates round-tripped through the projection so they agree
    /// exactly with what [`MapView::to_geo`] reports at the screen corners.
    /// While no projection exists this is simply the requested box.
    pub fn effective_bounds(&self) -> GeoRect {
        self.effective
    }

    /// The projection for the current viewport, if one can be derived.
    pub fn projection(&self) -> Option<MapProjection> {
        self.projection
    }

    /// Requests a new viewport extent.
    ///
    /// A box that cannot produce a projection on the current screen (a
    /// zero-area box) is ignored and the prior viewport stays in effect.
    /// Before the first layout any box is accepted and kept until the screen
    /// gets a size.
    pub fn set_viewport(&mut self, requested: GeoRect) {
        if self.screen.is_zero() {
            self.requested = requested;
            self.effective = requested;
            self.projection = None;
            return;
        }

        let fitted = fit_aspect(&requested, self.screen);
        match MapProjection::new(self.screen, fitted) {
            Ok(projection) => self.store(requested, projection),
            Err(_) => {
                log::warn!("keeping current viewport: requested box {requested:?} is degenerate")
            }
        }
    }

    /// Updates the screen size and refits the last requested box to it.
    ///
    /// A zero-area size is stored as-is and clears the projection; rendering
    /// stays deferred until a real size arrives.
    pub fn resize(&mut self, screen: ScreenSize) {
        self.screen = screen;
        if screen.is_zero() {
            self.projection = None;
            return;
        }

        let fitted = fit_aspect(&self.requested, screen);
        match MapProjection::new(screen, fitted) {
            Ok(projection) => {
                let requested = self.requested;
                self.store(requested, projection);
            }
            Err(_) => {
                // The stored request is a zero-area box that aspect fitting
                // cannot repair. Keep deferring until a usable request
                // arrives.
                self.projection = None;
            }
        }
    }

    /// Projects a geographic point to screen pixels.
    pub fn to_pixel(&self, point: &GeoPoint) -> Result<PixelPoint, OrteliusError> {
        Ok(self
            .projection
            .ok_or(OrteliusError::DegenerateProjection)?
            .to_pixel(point))
    }

    /// Returns the geographic coordinate shown at the given pixel.
    pub fn to_geo(&self, pixel: &PixelPoint) -> Result<GeoPoint, OrteliusError> {
        Ok(self
            .projection
            .ok_or(OrteliusError::DegenerateProjection)?
            .to_geo(pixel))
    }

    fn store(&mut self, requested: GeoRect, projection: MapProjection) {
        let screen = projection.screen();
        let lower_left = projection.to_geo(&PixelPoint::new(0, 0));
        let upper_right = projection.to_geo(&PixelPoint::new(
            screen.width() as i32,
            screen.height() as i32,
        ));

        self.requested = requested;
        self.effective = GeoRect::from_corners(lower_left, upper_right);
        self.projection = Some(projection);
    }
}

/// Grows the requested box in one dimension so its aspect ratio matches the
/// screen's, keeping the center fixed.
///
/// Only ever grows: the whole requested box stays visible, with the extra
/// area split evenly between the two sides of the grown dimension. A box
/// with a single zero span is repaired by this (the zero dimension grows to
/// match), a zero-area box is returned unchanged.
fn fit_aspect(requested: &GeoRect, screen: ScreenSize) -> GeoRect {
    let screen: Size<f64> = screen.cast();
    let screen_ratio = screen.width() / screen.height();
    let width = requested.width();
    let height = requested.height();

    if width == 0.0 && height == 0.0 {
        return *requested;
    }

    if width < height * screen_ratio {
        requested.with_spans(height * screen_ratio, height)
    } else {
        requested.with_spans(width, width / screen_ratio)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use ortelius_types::latlon;

    use super::*;

    fn screen(width: u32, height: u32) -> ScreenSize {
        ScreenSize::new(width, height)
    }

    #[test]
    fn projection_rejects_degenerate_input() {
        let bounds = GeoRect::new(0.0, 0.0, 1.0, 1.0);
        assert_matches!(
            MapProjection::new(screen(0, 100), bounds),
            Err(OrteliusError::DegenerateProjection)
        );
        assert_matches!(
            MapProjection::new(screen(100, 100), GeoRect::from_point(latlon!(1.0, 1.0))),
            Err(OrteliusError::DegenerateProjection)
        );
    }

    #[test]
    fn projection_maps_corners_to_screen_corners() {
        let projection =
            MapProjection::new(screen(200, 100), GeoRect::new(10.0, 40.0, 12.0, 41.0)).unwrap();

        assert_eq!(projection.to_pixel(&latlon!(40.0, 10.0)), PixelPoint::new(0, 0));
        assert_eq!(
            projection.to_pixel(&latlon!(41.0, 12.0)),
            PixelPoint::new(200, 100)
        );
        assert_eq!(
            projection.to_pixel(&latlon!(40.5, 11.0)),
            PixelPoint::new(100, 50)
        );
    }

    #[test]
    fn projection_round_trips_within_pixel_resolution() {
        let bounds = GeoRect::new(13.0, 52.0, 13.8, 52.6);
        let projection = MapProjection::new(screen(640, 480), bounds).unwrap();

        let degrees_per_pixel_x = bounds.width() / 640.0;
        let degrees_per_pixel_y = bounds.height() / 480.0;

        for point in [
            latlon!(52.1, 13.1),
            latlon!(52.33, 13.57),
            latlon!(52.59, 13.79),
        ] {
            let back = projection.to_geo(&projection.to_pixel(&point));
            assert!((back.lon() - point.lon()).abs() <= degrees_per_pixel_x);
            assert!((back.lat() - point.lat()).abs() <= degrees_per_pixel_y);
        }
    }

    #[test]
    fn pixel_to_geo_round_trips_exactly() {
        let projection =
            MapProjection::new(screen(640, 480), GeoRect::new(13.0, 52.0, 13.8, 52.6)).unwrap();

        for pixel in [
            PixelPoint::new(0, 0),
            PixelPoint::new(320, 240),
            PixelPoint::new(639, 479),
        ] {
            assert_eq!(projection.to_pixel(&projection.to_geo(&pixel)), pixel);
        }
    }

    #[test]
    fn aspect_fit_grows_narrow_box_horizontally() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.resize(screen(200, 100));

        assert_abs_diff_eq!(
            view.effective_bounds(),
            GeoRect::new(-0.5, 0.0, 1.5, 1.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn aspect_fit_grows_flat_box_vertically() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 2.0, 1.0));
        view.resize(screen(100, 200));

        assert_abs_diff_eq!(
            view.effective_bounds(),
            GeoRect::new(0.0, -1.5, 2.0, 2.5),
            epsilon = 1e-9
        );
    }

    #[test]
    fn aspect_fit_keeps_matching_box() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 2.0, 1.0));
        view.resize(screen(200, 100));

        assert_abs_diff_eq!(
            view.effective_bounds(),
            GeoRect::new(0.0, 0.0, 2.0, 1.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn set_viewport_is_idempotent() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.resize(screen(317, 211));

        view.set_viewport(GeoRect::new(8.1, 47.95, 8.45, 48.3));
        let first = view.effective_bounds();
        view.set_viewport(GeoRect::new(8.1, 47.95, 8.45, 48.3));

        assert_eq!(view.effective_bounds(), first);
    }

    #[test]
    fn set_viewport_defers_until_layout() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.set_viewport(GeoRect::new(5.0, 5.0, 6.0, 7.0));

        assert!(view.projection().is_none());
        assert_eq!(view.effective_bounds(), GeoRect::new(5.0, 5.0, 6.0, 7.0));

        view.resize(screen(100, 100));
        assert!(view.projection().is_some());
        assert_abs_diff_eq!(
            view.effective_bounds(),
            GeoRect::new(4.5, 5.0, 6.5, 7.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn resize_refits_the_requested_box() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.resize(screen(100, 100));
        view.resize(screen(200, 100));
        view.resize(screen(100, 100));

        // Refitting always starts from the requested box, so bouncing
        // through other sizes does not distort the extent.
        assert_abs_diff_eq!(
            view.effective_bounds(),
            GeoRect::new(0.0, 0.0, 1.0, 1.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn resize_to_zero_stores_state_and_defers() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.resize(screen(100, 100));
        view.resize(screen(0, 0));

        assert!(view.projection().is_none());
        assert_matches!(
            view.to_geo(&PixelPoint::new(10, 10)),
            Err(OrteliusError::DegenerateProjection)
        );

        view.resize(screen(100, 100));
        assert!(view.projection().is_some());
    }

    #[test]
    fn degenerate_request_keeps_prior_viewport() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.resize(screen(100, 100));
        let before = view.effective_bounds();

        view.set_viewport(GeoRect::from_point(latlon!(48.0, 8.0)));

        assert_eq!(view.effective_bounds(), before);
        assert!(view.projection().is_some());
    }

    #[test]
    fn single_zero_span_is_repaired_by_aspect_fit() {
        let mut view = MapView::new(GeoRect::new(0.0, 0.0, 1.0, 1.0));
        view.resize(screen(100, 100));
        view.set_viewport(GeoRect::new(5.0, 3.0, 5.0, 4.0));

        let effective = view.effective_bounds();
        assert_abs_diff_eq!(effective, GeoRect::new(4.5, 3.0, 5.5, 4.0), epsilon = 1e-9);
    }

    #[test]
    fn effective_bounds_agree_with_corner_conversion() {
        let mut view = MapView::new(GeoRect::new(13.1, 52.3, 13.63, 52.71));
        view.resize(screen(641, 473));

        let effective = view.effective_bounds();
        let lower_left = view.to_geo(&PixelPoint::new(0, 0)).unwrap();
        let upper_right = view.to_geo(&PixelPoint::new(641, 473)).unwrap();

        assert_eq!(effective.lower_left(), lower_left);
        assert_eq!(effective.upper_right(), upper_right);
    }
}
