use ortelius_types::cartesian::PixelPoint;
use web_time::{Duration, SystemTime};

use super::{
    EventHandler, EventPropagation, MouseButton, MouseButtonsState, PointerEvent, RawPointerEvent,
    UserEvent,
};
use crate::map::Map;

/// Pointer travel, in taxicab pixels, above which a pressed pointer is
/// considered to be dragging rather than clicking.
const DRAG_THRESHOLD: i32 = 3;

/// How quickly a button must be released after the press to count as a
/// click.
const CLICK_TIMEOUT: Duration = Duration::from_millis(200);

/// Maximum pause between two clicks that still grows the click count.
const MULTI_CLICK_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Clone, Copy)]
struct PressState {
    button: MouseButton,
    event: PointerEvent,
    time: SystemTime,
}

/// Synthesizes [`UserEvent`]s from raw pointer input and routes them to the
/// registered handlers.
///
/// Handlers are offered events in registration order. When a handler
/// consumes a [`UserEvent::DragStarted`], the following [`UserEvent::Drag`]
/// and [`UserEvent::DragEnded`] events of that gesture are delivered to that
/// handler alone, so two handlers can never tug at one drag.
///
/// The geographic position attached to the events is resolved at the moment
/// each event fires. In particular the press position of a drag is resolved
/// at press time, which makes the end-of-drag geometry independent of
/// whatever happened to the viewport in between.
pub struct EventProcessor {
    handlers: Vec<Box<dyn EventHandler>>,
    pointer_position: PixelPoint,
    buttons_state: MouseButtonsState,
    press: Option<PressState>,
    last_click_time: SystemTime,
    click_count: u32,
    drag_target: Option<usize>,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self {
            handlers: vec![],
            pointer_position: PixelPoint::new(0, 0),
            buttons_state: MouseButtonsState::default(),
            press: None,
            last_click_time: SystemTime::UNIX_EPOCH,
            click_count: 0,
            drag_target: None,
        }
    }
}

impl EventProcessor {
    /// Creates a processor with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the end of the handler list.
    pub fn add_handler(&mut self, handler: impl EventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Processes a raw event and dispatches whatever user events it
    /// produces.
    pub fn handle(&mut self, event: RawPointerEvent, map: &mut Map) {
        let user_events = self.process(event, map);
        for user_event in user_events {
            self.dispatch(&user_event, map);
        }
    }

    fn process(&mut self, event: RawPointerEvent, map: &Map) -> Vec<UserEvent> {
        let now = SystemTime::now();
        match event {
            RawPointerEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                let pointer_event = self.pointer_event(map);
                self.press = Some(PressState {
                    button,
                    event: pointer_event,
                    time: now,
                });

                vec![UserEvent::ButtonPressed(button, pointer_event)]
            }
            RawPointerEvent::ButtonReleased(button) => {
                self.buttons_state.set_released(button);
                let current = self.pointer_event(map);
                let mut events = vec![UserEvent::ButtonReleased(button, current)];

                // The press state is consumed either way, so a second
                // release can never produce a leftover click.
                let press = self.press.take();

                if self.drag_target.is_some() {
                    if let Some(press) = press {
                        events.push(UserEvent::DragEnded {
                            button,
                            press: press.event,
                            event: current,
                        });
                    }
                } else if let Some(press) = press {
                    let quick = now.duration_since(press.time).unwrap_or_default() < CLICK_TIMEOUT;
                    let close = current.position.taxicab_distance(&press.event.position)
                        <= DRAG_THRESHOLD;
                    if press.button == button && quick && close {
                        if now.duration_since(self.last_click_time).unwrap_or_default()
                            < MULTI_CLICK_TIMEOUT
                        {
                            self.click_count += 1;
                        } else {
                            self.click_count = 1;
                        }

                        self.last_click_time = now;
                        events.push(UserEvent::Click {
                            button,
                            count: self.click_count,
                            event: current,
                        });
                    }
                }

                events
            }
            RawPointerEvent::PointerMoved(position) => {
                self.pointer_position = position;
                let current = self.pointer_event(map);
                let mut events = vec![UserEvent::PointerMoved(current)];

                if let Some(press) = self.press {
                    if self.buttons_state.single_pressed() == Some(press.button) {
                        if self.drag_target.is_none()
                            && position.taxicab_distance(&press.event.position) > DRAG_THRESHOLD
                        {
                            events.push(UserEvent::DragStarted(press.button, press.event));
                        }

                        if self.drag_target.is_some() {
                            events.push(UserEvent::Drag {
                                button: press.button,
                                offset: position.diff(&press.event.position),
                                event: current,
                            });
                        }
                    }
                }

                events
            }
        }
    }

    fn dispatch(&mut self, event: &UserEvent, map: &mut Map) {
        // A handler that consumes a DragStarted immediately gets the motion
        // that triggered it, so the first pixels of the gesture are not
        // lost. The payload is prepared up front.
        let follow_up = match event {
            UserEvent::DragStarted(button, start) => Some(UserEvent::Drag {
                button: *button,
                offset: self.pointer_position.diff(&start.position),
                event: self.pointer_event(map),
            }),
            _ => None,
        };

        let mut new_drag_target = None;
        for (index, handler) in self.handlers.iter_mut().enumerate() {
            if matches!(event, UserEvent::Drag { .. } | UserEvent::DragEnded { .. })
                && self.drag_target != Some(index)
            {
                continue;
            }

            match handler.handle(event, map) {
                EventPropagation::Propagate => {}
                EventPropagation::Stop => break,
                EventPropagation::Consume => {
                    if let Some(follow_up) = &follow_up {
                        new_drag_target = Some(index);
                        handler.handle(follow_up, map);
                    }

                    break;
                }
            }
        }

        if new_drag_target.is_some() {
            self.drag_target = new_drag_target;
        }

        if matches!(event, UserEvent::DragEnded { .. }) {
            self.drag_target = None;
        }
    }

    fn pointer_event(&self, map: &Map) -> PointerEvent {
        PointerEvent {
            position: self.pointer_position,
            geo_position: map.view().to_geo(&self.pointer_position).ok(),
            buttons: self.buttons_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_abs_diff_eq;
    use ortelius_types::cartesian::ScreenSize;
    use ortelius_types::geo::GeoRect;

    use super::super::MapController;
    use super::*;
    use crate::map::MapBuilder;

    fn test_map() -> Map {
        let mut map = MapBuilder::default()
            .with_extent(GeoRect::new(0.0, 0.0, 1.0, 1.0))
            .without_scale_bar()
            .build();
        map.resize(ScreenSize::new(100, 100));
        map
    }

    fn recorder(
        log: Rc<RefCell<Vec<String>>>,
        result: fn() -> EventPropagation,
    ) -> impl FnMut(&UserEvent, &mut Map) -> EventPropagation {
        move |event: &UserEvent, _: &mut Map| {
            let name = match event {
                UserEvent::ButtonPressed(..) => "pressed".to_string(),
                UserEvent::ButtonReleased(..) => "released".to_string(),
                UserEvent::Click { count, .. } => format!("click{count}"),
                UserEvent::PointerMoved(..) => "moved".to_string(),
                UserEvent::DragStarted(..) => "drag_started".to_string(),
                UserEvent::Drag { .. } => "drag".to_string(),
                UserEvent::DragEnded { .. } => "drag_ended".to_string(),
            };
            log.borrow_mut().push(name);
            result()
        }
    }

    fn click(processor: &mut EventProcessor, map: &mut Map, button: MouseButton) {
        processor.handle(RawPointerEvent::ButtonPressed(button), map);
        processor.handle(RawPointerEvent::ButtonReleased(button), map);
    }

    #[test]
    fn quick_press_release_synthesizes_a_click() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut processor = EventProcessor::new();
        processor.add_handler(recorder(log.clone(), || EventPropagation::Propagate));
        let mut map = test_map();

        click(&mut processor, &mut map, MouseButton::Left);

        assert_eq!(*log.borrow(), vec!["pressed", "released", "click1"]);
    }

    #[test]
    fn consecutive_quick_clicks_grow_the_count() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut processor = EventProcessor::new();
        processor.add_handler(recorder(log.clone(), || EventPropagation::Propagate));
        let mut map = test_map();

        click(&mut processor, &mut map, MouseButton::Left);
        click(&mut processor, &mut map, MouseButton::Left);

        assert_eq!(
            *log.borrow(),
            vec!["pressed", "released", "click1", "pressed", "released", "click2"]
        );
    }

    #[test]
    fn stale_press_does_not_click() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut processor = EventProcessor::new();
        processor.add_handler(recorder(log.clone(), || EventPropagation::Propagate));
        let mut map = test_map();

        processor.handle(RawPointerEvent::ButtonPressed(MouseButton::Left), &mut map);
        if let Some(press) = &mut processor.press {
            press.time = SystemTime::now() - Duration::from_secs(1);
        }
        processor.handle(RawPointerEvent::ButtonReleased(MouseButton::Left), &mut map);

        assert_eq!(*log.borrow(), vec!["pressed", "released"]);
    }

    #[test]
    fn release_without_press_does_not_click() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut processor = EventProcessor::new();
        processor.add_handler(recorder(log.clone(), || EventPropagation::Propagate));
        let mut map = test_map();

        processor.handle(RawPointerEvent::ButtonReleased(MouseButton::Left), &mut map);

        assert_eq!(*log.borrow(), vec!["released"]);
    }

    #[test]
    fn travelled_pointer_does_not_click() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut processor = EventProcessor::new();
        processor.add_handler(recorder(log.clone(), || EventPropagation::Propagate));
        let mut map = test_map();

        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(10, 10)), &mut map);
        processor.handle(RawPointerEvent::ButtonPressed(MouseButton::Left), &mut map);
        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(50, 50)), &mut map);
        processor.handle(RawPointerEvent::ButtonReleased(MouseButton::Left), &mut map);

        let log = log.borrow();
        assert!(!log.iter().any(|name| name.starts_with("click")), "{log:?}");
    }

    #[test]
    fn drag_pans_the_map() {
        let mut processor = EventProcessor::new();
        processor.add_handler(MapController::default());
        let mut map = test_map();

        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(25, 25)), &mut map);
        processor.handle(RawPointerEvent::ButtonPressed(MouseButton::Left), &mut map);
        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(75, 75)), &mut map);

        // While the drag is running only the visual offset changes.
        assert_eq!(map.drag_offset(), nalgebra::Vector2::new(50, 50));
        assert_abs_diff_eq!(
            map.view().effective_bounds(),
            GeoRect::new(0.0, 0.0, 1.0, 1.0),
            epsilon = 1e-9
        );

        processor.handle(RawPointerEvent::ButtonReleased(MouseButton::Left), &mut map);

        assert_eq!(map.drag_offset(), nalgebra::Vector2::new(0, 0));
        assert_abs_diff_eq!(
            map.view().effective_bounds(),
            GeoRect::new(-0.5, -0.5, 0.5, 0.5),
            epsilon = 1e-9
        );
    }

    #[test]
    fn drag_events_reach_only_the_consuming_handler() {
        let first_log = Rc::new(RefCell::new(vec![]));
        let second_log = Rc::new(RefCell::new(vec![]));
        let mut processor = EventProcessor::new();
        processor.add_handler(recorder(first_log.clone(), || EventPropagation::Consume));
        processor.add_handler(recorder(second_log.clone(), || EventPropagation::Propagate));
        let mut map = test_map();

        processor.handle(RawPointerEvent::ButtonPressed(MouseButton::Left), &mut map);
        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(30, 0)), &mut map);
        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(40, 0)), &mut map);
        processor.handle(RawPointerEvent::ButtonReleased(MouseButton::Left), &mut map);

        let first = first_log.borrow();
        assert!(first.iter().any(|name| name == "drag_started"), "{first:?}");
        assert!(first.iter().any(|name| name == "drag"), "{first:?}");
        assert!(first.iter().any(|name| name == "drag_ended"), "{first:?}");

        // The first handler consumed everything, including the press.
        let second = second_log.borrow();
        assert!(second.is_empty(), "{second:?}");
    }

    #[test]
    fn second_press_after_drag_starts_a_fresh_gesture() {
        let mut processor = EventProcessor::new();
        processor.add_handler(MapController::default());
        let mut map = test_map();

        processor.handle(RawPointerEvent::ButtonPressed(MouseButton::Left), &mut map);
        processor.handle(RawPointerEvent::PointerMoved(PixelPoint::new(20, 20)), &mut map);
        processor.handle(RawPointerEvent::ButtonReleased(MouseButton::Left), &mut map);

        assert!(processor.drag_target.is_none());
        assert!(processor.press.is_none());
    }
}
