//! An aggregator that collects winit events for one window and turns them into recognizer input.
//!
//! It tracks the cursor position, the left mouse button, and the keyboard modifiers, because
//! winit reports them in separate events while the recognizer expects each pointer event to carry
//! its position.
use gestura_geometry::Point;
use log::warn;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent},
    keyboard::ModifiersState,
};

use crate::{EventOrigins, InputEvent, Instant, Modifiers, PointerId, PointerInput, WheelInput};

#[derive(Debug, Clone, Default)]
pub struct EventAggregator {
    cursor_pos: Option<Point>,
    mouse_pressed: bool,
    modifiers: Modifiers,
    origins: EventOrigins,
}

impl EventAggregator {
    /// How many pixels a wheel line delta scrolls.
    pub const PIXELS_PER_LINE: f64 = 100.0;

    /// Sets where the window's client area is located, used for the page, screen, and SVG
    /// coordinate spaces.
    pub fn set_origins(&mut self, origins: EventOrigins) {
        self.origins = origins;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Updates the aggregated state and returns the resulting recognizer input, if any.
    ///
    /// `to_logical` converts physical window positions into the units gestures are recognized in.
    pub fn update(
        &mut self,
        time: Instant,
        event: &WindowEvent,
        to_logical: impl Fn(Point) -> Point,
    ) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(time, to_logical((position.x, position.y).into()))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.mouse_button_state_changed(time, *state),
            WindowEvent::MouseWheel { delta, .. } => self.mouse_wheel(time, *delta),
            WindowEvent::Touch(Touch {
                phase,
                location,
                id,
                ..
            }) => {
                let input = self.pointer_input(
                    time,
                    PointerId::touch(*id),
                    to_logical((location.x, location.y).into()),
                );
                Some(match phase {
                    TouchPhase::Started => InputEvent::PointerDown(input),
                    TouchPhase::Moved => InputEvent::PointerMove(input),
                    TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::PointerUp(input),
                })
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers_changed(modifiers.state());
                None
            }
            _ => None,
        }
    }

    pub fn modifiers_changed(&mut self, state: ModifiersState) {
        self.modifiers = state.into();
    }

    fn cursor_moved(&mut self, time: Instant, pos: Point) -> Option<InputEvent> {
        self.cursor_pos = Some(pos);
        self.mouse_pressed
            .then(|| InputEvent::PointerMove(self.pointer_input(time, PointerId::MOUSE, pos)))
    }

    fn mouse_button_state_changed(
        &mut self,
        time: Instant,
        state: ElementState,
    ) -> Option<InputEvent> {
        let Some(pos) = self.cursor_pos else {
            warn!("Mouse button {state:?} without a known cursor position, ignored");
            return None;
        };

        let pressed = state == ElementState::Pressed;
        if pressed == self.mouse_pressed {
            return None;
        }
        self.mouse_pressed = pressed;

        let input = self.pointer_input(time, PointerId::MOUSE, pos);
        Some(if pressed {
            InputEvent::PointerDown(input)
        } else {
            InputEvent::PointerUp(input)
        })
    }

    fn mouse_wheel(&mut self, time: Instant, delta: MouseScrollDelta) -> Option<InputEvent> {
        let pos = self.cursor_pos?;
        // winit's deltas are positive when the content should move down, which is the opposite
        // of the DOM's.
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * Self::PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(position) => -position.y,
        };
        Some(InputEvent::Wheel(
            WheelInput::new(time, pos, delta_y, self.modifiers).with_origins(self.origins),
        ))
    }

    fn pointer_input(&self, time: Instant, pointer: PointerId, pos: Point) -> PointerInput {
        PointerInput::new(time, pointer, pos).with_origins(self.origins)
    }
}

#[cfg(test)]
mod tests {
    use winit::{dpi::PhysicalPosition, event::DeviceId};

    use super::*;

    fn device() -> DeviceId {
        // Safety: Only used to construct events, never passed to winit.
        unsafe { DeviceId::dummy() }
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn mouse_input(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
        }
    }

    fn identity(p: Point) -> Point {
        p
    }

    #[test]
    fn mouse_events_become_pointer_events() {
        let mut aggregator = EventAggregator::default();
        let now = Instant::now();

        assert_eq!(
            aggregator.update(now, &mouse_input(ElementState::Pressed), identity),
            None
        );
        assert_eq!(aggregator.update(now, &cursor_moved(1.0, 2.0), identity), None);

        let down = aggregator.update(now, &mouse_input(ElementState::Pressed), identity);
        assert_eq!(
            down,
            Some(InputEvent::PointerDown(PointerInput::new(
                now,
                PointerId::MOUSE,
                (1.0, 2.0)
            )))
        );
        // Repeated presses are not reported.
        assert_eq!(
            aggregator.update(now, &mouse_input(ElementState::Pressed), identity),
            None
        );

        let moved = aggregator.update(now, &cursor_moved(4.0, 6.0), |p| p / 2.0);
        assert_eq!(
            moved,
            Some(InputEvent::PointerMove(PointerInput::new(
                now,
                PointerId::MOUSE,
                (2.0, 3.0)
            )))
        );

        let up = aggregator.update(now, &mouse_input(ElementState::Released), identity);
        assert!(matches!(up, Some(InputEvent::PointerUp(_))));
        assert_eq!(aggregator.update(now, &cursor_moved(5.0, 5.0), identity), None);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut aggregator = EventAggregator::default();
        let now = Instant::now();
        aggregator.update(now, &cursor_moved(1.0, 2.0), identity);
        let right = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Right,
        };
        assert_eq!(aggregator.update(now, &right, identity), None);
    }

    #[test]
    fn touches_become_pointer_events() {
        let mut aggregator = EventAggregator::default();
        let now = Instant::now();
        let touch = |phase| {
            WindowEvent::Touch(Touch {
                device_id: device(),
                phase,
                location: PhysicalPosition::new(10.0, 20.0),
                force: None,
                id: 3,
            })
        };

        let expected = PointerInput::new(now, PointerId(4), (10.0, 20.0));
        assert_eq!(
            aggregator.update(now, &touch(TouchPhase::Started), identity),
            Some(InputEvent::PointerDown(expected))
        );
        assert_eq!(
            aggregator.update(now, &touch(TouchPhase::Moved), identity),
            Some(InputEvent::PointerMove(expected))
        );
        assert_eq!(
            aggregator.update(now, &touch(TouchPhase::Cancelled), identity),
            Some(InputEvent::PointerUp(expected))
        );
    }

    #[test]
    fn wheel_uses_dom_direction_and_modifiers() {
        let mut aggregator = EventAggregator::default();
        let now = Instant::now();
        let wheel = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: TouchPhase::Moved,
        };
        // No cursor position yet.
        assert_eq!(aggregator.update(now, &wheel, identity), None);

        aggregator.update(now, &cursor_moved(7.0, 8.0), identity);
        aggregator.modifiers_changed(ModifiersState::SHIFT);
        assert_eq!(
            aggregator.update(now, &wheel, identity),
            Some(InputEvent::Wheel(WheelInput::new(
                now,
                (7.0, 8.0),
                -100.0,
                Modifiers::SHIFT
            )))
        );
    }

    #[test]
    fn origins_are_attached_to_events() {
        let mut aggregator = EventAggregator::default();
        let now = Instant::now();
        let origins = EventOrigins::new(
            (0.0, 0.0).into(),
            (300.0, 200.0).into(),
            gestura_geometry::Rect::new((0.0, 0.0), (640.0, 480.0)),
        );
        aggregator.set_origins(origins);
        aggregator.update(now, &cursor_moved(1.0, 2.0), identity);

        let Some(InputEvent::PointerDown(down)) =
            aggregator.update(now, &mouse_input(ElementState::Pressed), identity)
        else {
            panic!("Expected a pointer down");
        };
        assert_eq!(down.origins, origins);
        assert_eq!(crate::RawEvent::screen_pos(&down), Point::new(301.0, 202.0));
    }
}
