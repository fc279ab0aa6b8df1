use std::time::Duration;

use gestura_geometry::Point;

use crate::Instant;

/// A deferred single-shot action of a recognizer session.
///
/// Timers don't run by themselves. They become due at their deadline and are fired by the
/// recognizer when time is advanced past it. Dropping a timer cancels it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Timer {
    pub deadline: Instant,
    pub action: TimerAction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TimerAction {
    /// The pointer was held down at the point since the press.
    Hold(Point),
    /// No second press arrived in time, the release at the point was a click.
    Click(Point),
}

impl Timer {
    pub fn start(now: Instant, delay: Duration, action: TimerAction) -> Self {
        Self {
            deadline: now + delay,
            action,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline <= now
    }

    pub fn is_hold(&self) -> bool {
        matches!(self.action, TimerAction::Hold(_))
    }
}
