//! User interaction handling.
//!
//! Interaction is split in two stages. The windowing shell feeds
//! [`RawPointerEvent`]s to an [`EventProcessor`]; the processor keeps the
//! pointer state between events and synthesizes the interesting
//! [`UserEvent`]s out of the raw stream: clicks with their click count,
//! drags with their start and end, plain pointer motion. The synthesized
//! events are then offered to the registered [`EventHandler`]s in order,
//! until one of them stops the propagation.
//!
//! The crate ships one handler, [`MapController`], which implements the
//! standard map interactions: drag to pan, double-click to zoom in,
//! double-right-click to zoom out. Applications append their own handlers
//! after it for selection, context menus and the like.

mod event_processor;
mod map;

pub use event_processor::EventProcessor;
pub use map::{MapController, MapControllerOptions};

use nalgebra::Vector2;
use ortelius_types::cartesian::PixelPoint;
use ortelius_types::geo::GeoPoint;

use crate::map::Map;

/// Pointer events as the windowing shell reports them.
///
/// Positions are in the engine's lower-left-origin pixel coordinates; a
/// shell working with top-down window coordinates flips `y` before calling
/// the processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPointerEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// The pointer moved to the given position.
    PointerMoved(PixelPoint),
}

/// Pointer state snapshot attached to every synthesized event.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Pointer position on the screen.
    pub position: PixelPoint,
    /// The geographic coordinate under the pointer, if the map can project
    /// at the moment.
    pub geo_position: Option<GeoPoint>,
    /// State of the mouse buttons.
    pub buttons: MouseButtonsState,
}

/// Events synthesized from the raw input stream.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, PointerEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, PointerEvent),
    /// A press-release pair quick and close enough to count as a click.
    ///
    /// Fires right after the corresponding
    /// [`UserEvent::ButtonReleased`]. `count` grows while clicks keep
    /// landing within the multi-click timeout of each other, so a double
    /// click arrives as `count == 1` followed by `count == 2`.
    Click {
        /// The clicked button.
        button: MouseButton,
        /// 1 for a single click, 2 for a double click and so on.
        count: u32,
        /// Pointer state at the release.
        event: PointerEvent,
    },
    /// The pointer moved.
    PointerMoved(PointerEvent),
    /// The pointer moved far enough from a pressed position to start a
    /// drag. The snapshot is taken at the press position.
    DragStarted(MouseButton, PointerEvent),
    /// The pointer moved while dragging.
    Drag {
        /// The button the drag is performed with.
        button: MouseButton,
        /// Pixel offset of the pointer from the press position.
        offset: Vector2<i32>,
        /// Current pointer state.
        event: PointerEvent,
    },
    /// The dragged button was released.
    DragEnded {
        /// The button the drag was performed with.
        button: MouseButton,
        /// Pointer state captured when the button was pressed.
        press: PointerEvent,
        /// Pointer state at the release.
        event: PointerEvent,
    },
}

/// What the processor should do with an event after a handler saw it.
pub enum EventPropagation {
    /// Give the event to the next handler.
    Propagate,
    /// Do not give the event to the next handlers.
    Stop,
    /// Do not give the event to the next handlers, and direct the follow-up
    /// events of the started gesture to this handler.
    Consume,
}

/// Reacts to user events, usually by mutating the map.
pub trait EventHandler {
    /// Handles the event.
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation;
}

impl<T: FnMut(&UserEvent, &mut Map) -> EventPropagation> EventHandler for T {
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        self(event, map)
    }
}

/// A button of a mouse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button (wheel).
    Middle,
    /// Right mouse button.
    Right,
    /// Any other button the device might have.
    Other,
}

/// State of a single mouse button.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum MouseButtonState {
    /// The button is pressed.
    Pressed,
    /// The button is not pressed.
    #[default]
    Released,
}

/// State of all mouse buttons.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MouseButtonsState {
    /// State of the left mouse button.
    pub left: MouseButtonState,
    /// State of the middle mouse button.
    pub middle: MouseButtonState,
    /// State of the right mouse button.
    pub right: MouseButtonState,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.left = MouseButtonState::Pressed,
            MouseButton::Middle => self.middle = MouseButtonState::Pressed,
            MouseButton::Right => self.right = MouseButtonState::Pressed,
            MouseButton::Other => {}
        }
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.left = MouseButtonState::Released,
            MouseButton::Middle => self.middle = MouseButtonState::Released,
            MouseButton::Right => self.right = MouseButtonState::Released,
            MouseButton::Other => {}
        }
    }

    /// The single pressed button, if exactly one is pressed.
    pub fn single_pressed(&self) -> Option<MouseButton> {
        let mut result = None;
        if self.left == MouseButtonState::Pressed {
            result = Some(MouseButton::Left);
        }

        if self.middle == MouseButtonState::Pressed {
            if result.is_some() {
                return None;
            }
            result = Some(MouseButton::Middle);
        }

        if self.right == MouseButtonState::Pressed {
            if result.is_some() {
                return None;
            }
            result = Some(MouseButton::Right);
        }

        result
    }
}
