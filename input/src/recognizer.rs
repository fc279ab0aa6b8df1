use gestura_geometry::Point;
use log::{debug, error};

use crate::{
    Gesture, GestureConfig, GestureState, InputEvent, Instant, PointerId, RawEvent,
    RawPointerEvent, RawWheelEvent, ZoomStep,
    session::Session,
    timer::TimerAction,
};

/// Recognizes clicks, double clicks, holds, drags, pinch zooms, and rotations on one surface.
///
/// The recognizer is driven by the four event handlers and by [`Self::tick`]. Timers (hold
/// detection, double click confirmation) are deadlines: they fire when a later event or a tick
/// advances time past them. Hosts that want a hold to be reported without further input should
/// wake up at [`Self::next_deadline`] and call [`Self::tick`].
#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    session: Session,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: Session::default(),
        }
    }

    /// Replaces the configuration. The current session continues with the new settings and
    /// callbacks.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn state(&self) -> GestureState {
        self.session.state()
    }

    /// The number of pointers currently pressed.
    pub fn pointer_count(&self) -> usize {
        self.session.pointer_count()
    }

    /// `true` if pointer move events are of interest, which is the case while at least one
    /// pointer is pressed. Callers may skip delivering moves otherwise.
    pub fn wants_pointer_moves(&self) -> bool {
        self.session.pointer_count() > 0
    }

    /// The instant the pending timer becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    pub fn dispatch(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(e) => self.pointer_down(e),
            InputEvent::PointerUp(e) => self.pointer_up(e),
            InputEvent::PointerMove(e) => {
                if self.wants_pointer_moves() {
                    self.pointer_move(e)
                }
            }
            InputEvent::Wheel(e) => self.wheel(e),
        }
    }

    pub fn pointer_down(&mut self, event: &impl RawPointerEvent) {
        self.tick(event.time());

        let pos = self.project(event);
        let count = self.session.press(event.pointer_id(), pos);

        if count == 1 {
            // A timer pending at the first press can only be the one that waits for a double
            // click.
            if self.session.cancel_timer() {
                self.session.transition(GestureState::Double);
                self.emit(Gesture::DoubleClick(pos));
            } else {
                self.session.transition(GestureState::Pressed);
                self.session.start_timer(
                    event.time(),
                    self.config.settings.hold_time,
                    TimerAction::Hold(pos),
                );
            }
        } else {
            self.session.cancel_timer();
        }

        if count == 2
            && self.session.state() == GestureState::Pressed
            && let Some((first, second)) = self.session.pair_ids()
            && let Some((a, b)) = self.session.pair()
        {
            event.capture_pointer(first);
            event.capture_pointer(second);
            self.session
                .transition(GestureState::Zoom(ZoomStep::between(a, b)));
        }
    }

    pub fn pointer_up(&mut self, event: &impl RawPointerEvent) {
        self.tick(event.time());

        let pointer = event.pointer_id();
        let Some(remaining) = self.session.release(pointer) else {
            debug!("Ignoring release of untracked pointer {pointer}");
            return;
        };

        match (remaining, self.session.state()) {
            (0, state) => {
                let clicked = state == GestureState::Pressed && self.session.has_hold_timer();
                if clicked {
                    self.session.cancel_timer();
                }
                self.session.transition(GestureState::Idle);
                if clicked {
                    let pos = self.project(event);
                    if self.config.callbacks.double_click.is_some() {
                        self.session.start_timer(
                            event.time(),
                            self.config.settings.double_click_time,
                            TimerAction::Click(pos),
                        );
                    } else {
                        self.emit(Gesture::Click(pos));
                    }
                }
            }
            // The remaining pointer is not re-armed for hold detection, but may still start a
            // drag.
            (1, GestureState::Zoom(_)) => self.session.transition(GestureState::Pressed),
            (2, GestureState::Zoom(_)) => {
                if let Some((a, b)) = self.session.pair() {
                    self.session
                        .transition(GestureState::Zoom(ZoomStep::between(a, b)));
                }
            }
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, event: &impl RawPointerEvent) {
        self.tick(event.time());

        let pointer = event.pointer_id();
        let Some(previous) = self.session.pointer_pos(pointer) else {
            return;
        };
        let pos = self.project(event);

        match self.session.state() {
            GestureState::Pressed => {
                // The pressed position stays the reference until the threshold is reached.
                if previous.distance_to(pos) >= self.config.settings.drag_threshold {
                    self.session.cancel_timer();
                    event.capture_pointer(pointer);
                    self.session.transition(GestureState::Drag);
                    self.drag(pointer, previous, pos);
                }
            }
            GestureState::Drag => self.drag(pointer, previous, pos),
            GestureState::Zoom(step) => self.zoom(pointer, pos, step),
            GestureState::Idle | GestureState::Double | GestureState::Hold => {
                self.session.update(pointer, pos)
            }
        }
    }

    /// Zooms or rotates around the wheel position. Independent of the pointer session.
    pub fn wheel(&mut self, event: &impl RawWheelEvent) {
        let delta_y = event.delta_y();
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }

        let anchor = self.project(event);
        let settings = &self.config.settings;

        let gesture = if event.modifiers().is_held(settings.wheel_rotate_modifier) {
            settings.wheel_rotate_angle.map(|angle| Gesture::Rotate {
                anchor,
                angle: if delta_y > 0.0 { angle } else { -angle },
            })
        } else {
            settings.wheel_zoom_factor.map(|factor| Gesture::Zoom {
                anchor,
                factor: if delta_y < 0.0 { factor } else { factor.recip() },
            })
        };

        if let Some(gesture) = gesture {
            self.emit(gesture);
        }
    }

    /// Advances time to `now` and fires the pending timer if it is due.
    pub fn tick(&mut self, now: Instant) {
        let Some(action) = self.session.take_due_timer(now) else {
            return;
        };
        debug!("Timer fired: {action:?}");

        match action {
            TimerAction::Hold(pos) => {
                if self.config.callbacks.hold.is_some() {
                    self.session.transition(GestureState::Hold);
                    self.emit(Gesture::Hold(pos));
                }
            }
            TimerAction::Click(pos) => self.emit(Gesture::Click(pos)),
        }
    }

    /// Cancels the pending timer and forgets all pressed pointers. Can be called any number of
    /// times.
    pub fn dispose(&mut self) {
        self.session.cancel_timer();
        self.session = Session::default();
    }

    fn drag(&mut self, pointer: PointerId, from: Point, to: Point) {
        self.session.update(pointer, to);
        self.emit(Gesture::Drag {
            from,
            to,
            delta: to - from,
        });
    }

    fn zoom(&mut self, pointer: PointerId, pos: Point, step: ZoomStep) {
        let previous = self.session.pair();
        self.session.update(pointer, pos);
        let (Some((a0, b0)), Some((a1, b1))) = (previous, self.session.pair()) else {
            // More than two pointers.
            return;
        };

        let anchor = a1.midpoint(b1);
        let distance = a1.distance_to(b1);
        let angle = (b0 - a0).signed_angle_to(b1 - a1);
        let pan = anchor - step.anchor;

        self.session
            .transition(GestureState::Zoom(ZoomStep::new(anchor, distance)));

        if step.baseline > 0.0 {
            let factor = distance / step.baseline;
            if factor != 1.0 {
                self.emit(Gesture::Zoom { anchor, factor });
            }
        }
        if angle != 0.0 {
            self.emit(Gesture::Rotate { anchor, angle });
        }
        if !pan.is_zero() {
            self.emit(Gesture::Drag {
                from: step.anchor,
                to: anchor,
                delta: pan,
            });
        }
    }

    /// Invokes the callback registered for the gesture. Callback failures are logged and don't
    /// affect the session, which is already updated at this point.
    fn emit(&mut self, gesture: Gesture) {
        debug!("Recognized {gesture:?}");
        if let Some(Err(e)) = self.config.callbacks.invoke(gesture) {
            error!("The {} callback failed: {e:?}", gesture.name());
        }
    }

    fn project(&self, event: &dyn RawEvent) -> Point {
        self.config.coordinates.project(event)
    }
}
