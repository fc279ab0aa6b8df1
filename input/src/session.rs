use std::{collections::BTreeMap, mem, time::Duration};

use derive_more::Constructor;
use gestura_geometry::Point;
use itertools::Itertools;
use log::debug;

use crate::{
    Instant, PointerId,
    timer::{Timer, TimerAction},
};

/// The recognition phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// One pointer is down, it is not yet known what it becomes.
    Pressed,
    /// The second press of a double click is down.
    Double,
    Hold,
    Drag,
    /// Two pointers are down and pinch, rotate, or pan.
    Zoom(ZoomStep),
}

/// Midpoint and distance of the two zoom pointers at the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct ZoomStep {
    pub anchor: Point,
    pub baseline: f64,
}

impl ZoomStep {
    pub fn between(a: Point, b: Point) -> Self {
        Self::new(a.midpoint(b), a.distance_to(b))
    }
}

/// Mutable state of one recognizer.
#[derive(Debug, Default)]
pub(crate) struct Session {
    state: GestureState,
    /// Last known position of all pressed pointers. Ordered by id, which decides which of two
    /// pointers is the first one of a pair.
    pointers: BTreeMap<PointerId, Point>,
    timer: Option<Timer>,
}

impl Session {
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn transition(&mut self, state: GestureState) {
        if mem::discriminant(&self.state) != mem::discriminant(&state) {
            debug!("Gesture state: {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_pos(&self, pointer: PointerId) -> Option<Point> {
        self.pointers.get(&pointer).copied()
    }

    /// Records the position of the pointer and returns the number of tracked pointers.
    pub fn press(&mut self, pointer: PointerId, pos: Point) -> usize {
        self.pointers.insert(pointer, pos);
        self.pointers.len()
    }

    pub fn update(&mut self, pointer: PointerId, pos: Point) {
        if let Some(p) = self.pointers.get_mut(&pointer) {
            *p = pos;
        }
    }

    /// Stops tracking the pointer. `None` if it wasn't tracked, otherwise the number of pointers
    /// still tracked.
    pub fn release(&mut self, pointer: PointerId) -> Option<usize> {
        self.pointers.remove(&pointer)?;
        Some(self.pointers.len())
    }

    /// The ids of the two tracked pointers, `None` if not exactly two are tracked.
    pub fn pair_ids(&self) -> Option<(PointerId, PointerId)> {
        self.pointers.keys().copied().collect_tuple()
    }

    /// The positions of the two tracked pointers, `None` if not exactly two are tracked.
    pub fn pair(&self) -> Option<(Point, Point)> {
        self.pointers.values().copied().collect_tuple()
    }

    pub fn has_hold_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(Timer::is_hold)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(|t| t.deadline)
    }

    /// Starts a timer, replacing any pending one.
    pub fn start_timer(&mut self, now: Instant, delay: Duration, action: TimerAction) {
        debug!("Timer started: {action:?} in {delay:?}");
        self.timer = Some(Timer::start(now, delay, action));
    }

    /// Cancels the pending timer. `true` if there was one.
    pub fn cancel_timer(&mut self) -> bool {
        let cancelled = self.timer.take();
        if let Some(timer) = &cancelled {
            debug!("Timer cancelled: {:?}", timer.action);
        }
        cancelled.is_some()
    }

    /// Removes and returns the pending timer if it is due at `now`.
    pub fn take_due_timer(&mut self, now: Instant) -> Option<TimerAction> {
        if !self.timer.as_ref()?.is_due(now) {
            return None;
        }
        self.timer.take().map(|t| t.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_ordered_by_pointer_id() {
        let mut session = Session::default();
        session.press(PointerId(7), Point::new(70.0, 0.0));
        assert_eq!(session.pair(), None);
        session.press(PointerId(3), Point::new(30.0, 0.0));
        assert_eq!(session.pair_ids(), Some((PointerId(3), PointerId(7))));
        assert_eq!(
            session.pair(),
            Some((Point::new(30.0, 0.0), Point::new(70.0, 0.0)))
        );
        session.press(PointerId(1), Point::ZERO);
        assert_eq!(session.pair(), None);
    }

    #[test]
    fn releasing_untracked_pointer_is_ignored() {
        let mut session = Session::default();
        session.press(PointerId(1), Point::ZERO);
        assert_eq!(session.release(PointerId(2)), None);
        assert_eq!(session.release(PointerId(1)), Some(0));
    }

    #[test]
    fn timer_fires_only_when_due() {
        let mut session = Session::default();
        let now = Instant::now();
        session.start_timer(now, Duration::from_millis(100), TimerAction::Hold(Point::ZERO));
        assert!(session.has_hold_timer());
        assert_eq!(session.take_due_timer(now + Duration::from_millis(99)), None);
        assert_eq!(
            session.take_due_timer(now + Duration::from_millis(100)),
            Some(TimerAction::Hold(Point::ZERO))
        );
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn starting_a_timer_replaces_the_pending_one() {
        let mut session = Session::default();
        let now = Instant::now();
        session.start_timer(now, Duration::from_secs(1), TimerAction::Hold(Point::ZERO));
        session.start_timer(now, Duration::from_millis(10), TimerAction::Click(Point::ZERO));
        assert!(!session.has_hold_timer());
        assert_eq!(session.next_deadline(), Some(now + Duration::from_millis(10)));
        assert!(session.cancel_timer());
        assert!(!session.cancel_timer());
    }
}
