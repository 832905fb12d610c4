//! Drawable map layers.
//!
//! A [`Layer`] is a named, orderable, hideable piece of map content. What a
//! layer can contain is the closed set of [`LayerBody`] variants: the
//! surrounding application creates a small, fixed family of layer kinds, so
//! an enum keeps rendering an exhaustive match instead of an open trait
//! hierarchy. Adding a kind means adding a variant, and the compiler then
//! points at every place that must handle it.
//!
//! Layers do not own map geometry. Line-based bodies carry only [`LineId`]s
//! and resolve them through the [`ShapeProvider`] at render time, so a layer
//! stays valid when the data source reloads.

mod provider;

pub use provider::{LineId, ShapeProvider, VecShapeProvider};

use ortelius_types::geo::{GeoPoint, GeoRect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::OrteliusError;
use crate::render::{Canvas, LinePaint, PointPaint};
use crate::view::MapProjection;

/// Coarse z-ordering bucket of a layer.
///
/// Buckets control compositing order independently of registration order:
/// every `Bottom` layer is drawn before every `Middle` layer, and `Top`
/// layers are drawn last, ending up above everything else. Within one bucket
/// layers keep the order they were registered in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayerOrder {
    /// Composited first, below everything else. Used for the base network.
    Bottom,
    /// The default bucket for ordinary content.
    #[default]
    Middle,
    /// Composited last, above everything else. Used for highlights.
    Top,
}

/// The drawable content of a layer.
#[derive(Debug, Clone)]
pub enum LayerBody {
    /// Every line of the data source, drawn in one style. This is the base
    /// map.
    Network(LinePaint),
    /// A subset of the data source's lines, resolved by id at render time.
    Lines {
        /// Lines to draw.
        ids: Vec<LineId>,
        /// Stroke to draw them with.
        paint: LinePaint,
    },
    /// Point markers at fixed geographic positions.
    Markers {
        /// Marker positions.
        points: Vec<GeoPoint>,
        /// Marker appearance.
        paint: PointPaint,
    },
    /// Rectangle outlines in geographic coordinates, e.g. coverage extents.
    GeoBoxes {
        /// Rectangles to outline.
        boxes: Vec<GeoRect>,
        /// Stroke to outline them with.
        paint: LinePaint,
    },
}

/// A drawable layer of the map.
pub struct Layer {
    name: String,
    order: LayerOrder,
    visible: bool,
    body: LayerBody,
}

impl Layer {
    /// Creates a visible layer in the [`LayerOrder::Middle`] bucket.
    pub fn new(name: impl Into<String>, body: LayerBody) -> Self {
        Self {
            name: name.into(),
            order: LayerOrder::default(),
            visible: true,
            body,
        }
    }

    /// Moves the layer into the given order bucket.
    pub fn with_order(mut self, order: LayerOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the initial visibility of the layer.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Name of the layer, for logs and layer lists.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Order bucket of the layer.
    ///
    /// The bucket is fixed at construction; collections rely on it not
    /// changing after the layer is registered.
    pub fn order(&self) -> LayerOrder {
        self.order
    }

    /// Whether the layer is currently drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the layer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Content of the layer.
    pub fn body(&self) -> &LayerBody {
        &self.body
    }

    /// Mutable access to the content of the layer.
    pub fn body_mut(&mut self) -> &mut LayerBody {
        &mut self.body
    }

    /// Draws the layer onto the canvas.
    ///
    /// Visibility is not checked here; that is the caller's concern. The
    /// first line the data source cannot resolve aborts the layer with
    /// [`OrteliusError::MissingGeometry`], leaving whatever was already
    /// drawn on the canvas.
    pub fn render(
        &self,
        canvas: &mut dyn Canvas,
        projection: &MapProjection,
        provider: &dyn ShapeProvider,
    ) -> Result<(), OrteliusError> {
        match &self.body {
            LayerBody::Network(paint) => {
                for id in provider.line_ids() {
                    let shape = provider
                        .line_geometry(id)
                        .ok_or(OrteliusError::MissingGeometry(id))?;
                    draw_polyline(canvas, projection, &shape, *paint);
                }
            }
            LayerBody::Lines { ids, paint } => {
                for &id in ids {
                    let shape = provider
                        .line_geometry(id)
                        .ok_or(OrteliusError::MissingGeometry(id))?;
                    draw_polyline(canvas, projection, &shape, *paint);
                }
            }
            LayerBody::Markers { points, paint } => {
                for point in points {
                    canvas.fill_circle(projection.to_pixel(point), paint.radius, paint.color);
                }
            }
            LayerBody::GeoBoxes { boxes, paint } => {
                for geo_box in boxes {
                    canvas.stroke_rect(
                        projection.to_pixel(&geo_box.lower_left()),
                        projection.to_pixel(&geo_box.upper_right()),
                        *paint,
                    );
                }
            }
        }

        Ok(())
    }
}

fn draw_polyline(
    canvas: &mut dyn Canvas,
    projection: &MapProjection,
    shape: &[GeoPoint],
    paint: LinePaint,
) {
    for pair in shape.windows(2) {
        canvas.draw_line(
            projection.to_pixel(&pair[0]),
            projection.to_pixel(&pair[1]),
            paint,
        );
    }
}
