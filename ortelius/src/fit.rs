//! Bounding box calculators behind zoom-to commands.
//!
//! Everything that zooms the map to some geometry funnels through
//! [`fit_rect`]: the entry points here only differ in how they reduce their
//! input to a raw bounding box. The result is always a box that is
//! comfortable to look at, never a speck or an edge-hugging extent, and it
//! is handed to [`Map::set_viewport`](crate::Map::set_viewport) unchanged.

use ortelius_types::geo::{GeoPoint, GeoRect};

use crate::error::OrteliusError;

/// Tuning of the zoom-to box calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Smallest span, in degrees, a zoom target is ever given.
    ///
    /// Roughly 500 meters of latitude at the default value. Zooming to a
    /// single point or a very short line produces a box of exactly this
    /// span, so there is always some context around the target.
    pub min_span: f64,

    /// Margin added around a target, as a fraction of its span per side.
    pub border_fraction: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_span: 0.005,
            border_fraction: 0.2,
        }
    }
}

/// Expands a raw extent into a comfortable viewing box.
///
/// If both spans of the input are below `min_span * (1 - border_fraction)`,
/// the result is a box of exactly the minimum span centered on the input.
/// Otherwise each side moves out by `border_fraction` of the corresponding
/// span. The two cases meet at the threshold: applying the margin to a box
/// right below it would produce less than the minimum span, which is the
/// point of switching to the fixed-size branch.
pub fn fit_rect(raw: GeoRect, options: &FitOptions) -> GeoRect {
    let threshold = options.min_span * (1.0 - options.border_fraction);
    if raw.width() < threshold && raw.height() < threshold {
        raw.with_spans(options.min_span, options.min_span)
    } else {
        raw.with_margin(options.border_fraction)
    }
}

/// Viewing box centered on a single point.
pub fn fit_point(point: GeoPoint, options: &FitOptions) -> GeoRect {
    fit_rect(GeoRect::from_point(point), options)
}

/// Viewing box around a set of polylines.
///
/// Fails with [`OrteliusError::EmptyGeometry`] if the input contains no
/// points at all; a caller zooming to a search result wants to hear about
/// that rather than silently jump to nowhere.
pub fn fit_lines<'a>(
    lines: impl IntoIterator<Item = &'a [GeoPoint]>,
    options: &FitOptions,
) -> Result<GeoRect, OrteliusError> {
    let raw = GeoRect::from_points(lines.into_iter().flatten().copied())
        .ok_or(OrteliusError::EmptyGeometry)?;

    Ok(fit_rect(raw, options))
}

/// Viewing box around a set of already-computed extents.
pub fn fit_rects(
    rects: impl IntoIterator<Item = GeoRect>,
    options: &FitOptions,
) -> Result<GeoRect, OrteliusError> {
    let mut iter = rects.into_iter();
    let first = iter.next().ok_or(OrteliusError::EmptyGeometry)?;
    let raw = iter.fold(first, |merged, rect| merged.merge(rect));

    Ok(fit_rect(raw, options))
}
