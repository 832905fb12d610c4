use nalgebra::Vector2;
use ortelius_types::geo::GeoRect;

use super::{EventHandler, EventPropagation, MouseButton, PointerEvent, UserEvent};
use crate::map::Map;

/// Parameters of the default map navigation.
#[derive(Debug, Clone, Copy)]
pub struct MapControllerOptions {
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl Default for MapControllerOptions {
    fn default() -> Self {
        Self {
            zoom_in_factor: 4.0,
            zoom_out_factor: 1.3,
        }
    }
}

impl MapControllerOptions {
    /// How much a left double click shrinks the viewport spans.
    pub fn zoom_in_factor(&self) -> f64 {
        self.zoom_in_factor
    }

    /// Returns the options with the given zoom in factor.
    pub fn with_zoom_in_factor(mut self, factor: f64) -> Self {
        self.set_zoom_in_factor(factor);
        self
    }

    /// Sets how much a left double click shrinks the viewport spans.
    pub fn set_zoom_in_factor(&mut self, factor: f64) {
        self.zoom_in_factor = factor;
    }

    /// How much a right double click grows the viewport spans.
    pub fn zoom_out_factor(&self) -> f64 {
        self.zoom_out_factor
    }

    /// Returns the options with the given zoom out factor.
    pub fn with_zoom_out_factor(mut self, factor: f64) -> Self {
        self.set_zoom_out_factor(factor);
        self
    }

    /// Sets how much a right double click grows the viewport spans.
    pub fn set_zoom_out_factor(&mut self, factor: f64) {
        self.zoom_out_factor = factor;
    }
}

/// Default map navigation.
///
/// * Left double click zooms in around the clicked point.
/// * Right double click zooms out around the clicked point.
/// * Dragging with the left button pans the map. While the button is down
///   the layers are not redrawn, only shifted; the viewport moves once when
///   the button is released.
///
/// Register it with an [`EventProcessor`](super::EventProcessor) before the
/// application handlers so that the application can intercept events it
/// wants for itself.
#[derive(Default)]
pub struct MapController {
    options: MapControllerOptions,
}

impl MapController {
    /// Creates a controller with the given options.
    pub fn new(options: MapControllerOptions) -> Self {
        Self { options }
    }

    /// Navigation parameters of this controller.
    pub fn options(&self) -> &MapControllerOptions {
        &self.options
    }

    fn zoom_around(
        &self,
        map: &mut Map,
        span_factor: f64,
        event: &PointerEvent,
    ) -> EventPropagation {
        let Some(center) = event.geo_position else {
            return EventPropagation::Propagate;
        };

        let bounds = map.view().effective_bounds();
        let new_bounds = GeoRect::from_point(center)
            .with_spans(bounds.width() * span_factor, bounds.height() * span_factor);
        map.set_viewport(new_bounds);

        EventPropagation::Stop
    }
}

impl EventHandler for MapController {
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::Click {
                button: MouseButton::Left,
                count: 2,
                event,
            } => self.zoom_around(map, 1.0 / self.options.zoom_in_factor, event),
            UserEvent::Click {
                button: MouseButton::Right,
                count: 2,
                event,
            } => self.zoom_around(map, self.options.zoom_out_factor, event),
            UserEvent::DragStarted(MouseButton::Left, _) => EventPropagation::Consume,
            UserEvent::Drag {
                button: MouseButton::Left,
                offset,
                ..
            } => {
                map.set_drag_offset(*offset);
                EventPropagation::Stop
            }
            UserEvent::DragEnded {
                button: MouseButton::Left,
                press,
                event,
            } => {
                map.clear_drag_offset();
                if let (Some(from), Some(to)) = (press.geo_position, event.geo_position) {
                    let shift = Vector2::new(from.lon() - to.lon(), from.lat() - to.lat());
                    map.set_viewport(map.view().effective_bounds().translate(shift));
                }

                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }
}
