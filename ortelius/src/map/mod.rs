//! The map itself: viewport, layers, data source and overlays in one place.

mod builder;
mod layer_collection;
mod overlay;

pub use builder::MapBuilder;
pub use layer_collection::{LayerCollection, LayerId};
pub use overlay::{OverlayTask, OverlayTasks};

use image::RgbaImage;
use nalgebra::Vector2;
use ortelius_types::cartesian::{PixelPoint, ScreenSize};
use ortelius_types::geo::{GeoPoint, GeoRect};

use crate::error::OrteliusError;
use crate::fit::{fit_rect, FitOptions};
use crate::layer::ShapeProvider;
use crate::messenger::Messenger;
use crate::render::{Canvas, RasterCanvas};
use crate::scale_bar::ScaleBar;
use crate::view::MapView;
use crate::Color;

/// The map: a viewport over a data source with layers composited on top.
///
/// A map is owned by the drawing surface it serves and lives exactly as long
/// as that surface. It never draws on its own: the owner calls
/// [`Map::render`] when the shell delivers a paint event, and the map asks
/// for paint events through its [`Messenger`] whenever its state changes.
///
/// Everything here is single-threaded except [`Map::overlay_tasks`], whose
/// handle may be shared with background threads.
pub struct Map {
    view: MapView,
    layers: LayerCollection,
    provider: Box<dyn ShapeProvider>,
    overlays: OverlayTasks,
    scale_bar: Option<ScaleBar>,
    messenger: Option<Box<dyn Messenger>>,
    fit_options: FitOptions,
    background: Color,
    drag_offset: Vector2<i32>,
    cached_frame: Option<RgbaImage>,
}

impl Map {
    /// Creates a new map with no layers.
    ///
    /// [`MapBuilder`] is the more convenient way to construct a map.
    pub fn new(
        view: MapView,
        provider: Box<dyn ShapeProvider>,
        messenger: Option<Box<dyn Messenger>>,
    ) -> Self {
        Self {
            view,
            layers: LayerCollection::new(),
            provider,
            overlays: OverlayTasks::new(),
            scale_bar: Some(ScaleBar::default()),
            messenger,
            fit_options: FitOptions::default(),
            background: Color::WHITE,
            drag_offset: Vector2::zeros(),
            cached_frame: None,
        }
    }

    /// Current viewport of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Requests a new viewport extent.
    ///
    /// The box is fitted to the screen's aspect ratio as described in
    /// [`MapView::set_viewport`].
    pub fn set_viewport(&mut self, bounds: GeoRect) {
        self.view.set_viewport(bounds);
        self.cached_frame = None;
        self.redraw();
    }

    /// Updates the screen size of the map.
    pub fn resize(&mut self, screen: ScreenSize) {
        self.view.resize(screen);
        self.cached_frame = None;
        self.redraw();
    }

    /// Zooms out to the full extent of the data source.
    pub fn zoom_to_extent(&mut self) {
        let bounds = fit_rect(self.provider.bounds(), &self.fit_options);
        self.set_viewport(bounds);
    }

    /// Projects a geographic point to screen pixels with the current
    /// projection.
    pub fn to_pixel(&self, point: &GeoPoint) -> Result<PixelPoint, OrteliusError> {
        self.view.to_pixel(point)
    }

    /// Returns the geographic coordinate currently shown at the given pixel.
    pub fn to_geo(&self, pixel: &PixelPoint) -> Result<GeoPoint, OrteliusError> {
        self.view.to_geo(pixel)
    }

    /// Layers of the map.
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Layers of the map, for modification.
    ///
    /// The map does not watch for changes; call [`Map::redraw`] after
    /// modifying layers to get the new state on screen.
    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    /// The data source of the map.
    pub fn provider(&self) -> &dyn ShapeProvider {
        self.provider.as_ref()
    }

    /// Handle to the overlay task set, cloneable into background threads.
    pub fn overlay_tasks(&self) -> OverlayTasks {
        self.overlays.clone()
    }

    /// Zoom and margin parameters used by [`Map::zoom_to_extent`].
    pub fn fit_options(&self) -> FitOptions {
        self.fit_options
    }

    /// Shows the scale bar with the given configuration, or hides it.
    pub fn set_scale_bar(&mut self, scale_bar: Option<ScaleBar>) {
        self.scale_bar = scale_bar;
        self.redraw();
    }

    /// Pixel offset applied to the composed frame while a drag is in
    /// progress.
    pub fn drag_offset(&self) -> Vector2<i32> {
        self.drag_offset
    }

    /// Sets the drag preview offset.
    ///
    /// While the offset is non-zero, [`Map::render`] shifts the last
    /// composed frame instead of re-projecting all layers, which keeps
    /// panning cheap no matter how much data is loaded. The viewport itself
    /// is not touched; the controller commits it once the drag ends.
    pub fn set_drag_offset(&mut self, offset: Vector2<i32>) {
        if self.drag_offset != offset {
            self.drag_offset = offset;
            self.redraw();
        }
    }

    /// Resets the drag preview offset without requesting a redraw.
    ///
    /// Called when a drag ends, right before the viewport change that will
    /// redraw anyway.
    pub fn clear_drag_offset(&mut self) {
        self.drag_offset = Vector2::zeros();
    }

    /// Composes the current frame into the canvas.
    ///
    /// Layers are drawn bottom to top, then overlay tasks, then the scale
    /// bar. Without a valid projection (before the first layout, or while
    /// the window has zero area) the canvas is just filled with the
    /// background color.
    pub fn render(&mut self, canvas: &mut RasterCanvas) {
        let Some(projection) = self.view.projection() else {
            log::debug!("skipping frame: no projection for the current viewport");
            canvas.clear(self.background);
            return;
        };

        if canvas.size() != self.view.screen() {
            log::warn!(
                "canvas size {:?} does not match viewport size {:?}",
                canvas.size(),
                self.view.screen()
            );
        }

        if self.drag_offset != Vector2::zeros() {
            if let Some(frame) = &self.cached_frame {
                canvas.clear(self.background);
                canvas.blit(frame, self.drag_offset);
                return;
            }
        }

        canvas.clear(self.background);
        self.layers.render(canvas, &projection, self.provider.as_ref());
        self.overlays.run(canvas, &projection);
        if let Some(scale_bar) = &self.scale_bar {
            scale_bar.draw(canvas, &self.view);
        }

        self.cached_frame = Some(canvas.image().clone());
    }

    /// Requests a redraw through the map's messenger, if one is set.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }

    /// Sets the messenger the map requests redraws through.
    pub fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.messenger = Some(messenger);
    }
}
