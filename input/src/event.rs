//! The event source as seen by the recognizer.
//!
//! Anything that delivers pointer and wheel events (a winit window, a DOM bridge, a test) only has
//! to implement [`RawPointerEvent`] and [`RawWheelEvent`]. [`PointerInput`] and [`WheelInput`] are
//! ready made implementations used by the winit [`EventAggregator`](crate::EventAggregator).

use derive_more::Constructor;
use gestura_geometry::{Point, Rect, Vector};
use log::trace;

use crate::{Instant, Modifiers, PointerId};

/// A raw coordinate bearing event.
///
/// All positions are in the same unit. Which one the recognizer uses is decided by the configured
/// [`CoordinateSpace`](crate::CoordinateSpace).
pub trait RawEvent {
    fn time(&self) -> Instant;
    /// Position relative to the element that receives the events.
    fn client_pos(&self) -> Point;
    /// Position relative to the document origin.
    fn page_pos(&self) -> Point;
    /// Position relative to the screen origin.
    fn screen_pos(&self) -> Point;
    /// Bounds of the event target in client coordinates.
    fn target_bounds(&self) -> Rect;
}

pub trait RawPointerEvent: RawEvent {
    fn pointer_id(&self) -> PointerId;

    /// Asks the event target to deliver all further move and up events of `pointer` to the
    /// recognizer, even if the pointer leaves the target's bounds.
    fn capture_pointer(&self, pointer: PointerId);
}

pub trait RawWheelEvent: RawEvent {
    /// Vertical scroll amount. Positive values scroll down, as in the DOM.
    fn delta_y(&self) -> f64;
    fn modifiers(&self) -> Modifiers;
}

/// Where the client coordinate system sits inside the page and the screen.
#[derive(Debug, Copy, Clone, PartialEq, Default, Constructor)]
pub struct EventOrigins {
    /// Offset of the client origin in page coordinates.
    pub page: Vector,
    /// Offset of the client origin in screen coordinates.
    pub screen: Vector,
    /// Bounds of the target element in client coordinates.
    pub target: Rect,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerInput {
    pub time: Instant,
    pub pointer: PointerId,
    /// Client position.
    pub pos: Point,
    pub origins: EventOrigins,
}

impl PointerInput {
    pub fn new(time: Instant, pointer: PointerId, pos: impl Into<Point>) -> Self {
        Self {
            time,
            pointer,
            pos: pos.into(),
            origins: EventOrigins::default(),
        }
    }

    #[must_use]
    pub fn with_origins(mut self, origins: EventOrigins) -> Self {
        self.origins = origins;
        self
    }
}

impl RawEvent for PointerInput {
    fn time(&self) -> Instant {
        self.time
    }

    fn client_pos(&self) -> Point {
        self.pos
    }

    fn page_pos(&self) -> Point {
        self.pos + self.origins.page
    }

    fn screen_pos(&self) -> Point {
        self.pos + self.origins.screen
    }

    fn target_bounds(&self) -> Rect {
        self.origins.target
    }
}

impl RawPointerEvent for PointerInput {
    fn pointer_id(&self) -> PointerId {
        self.pointer
    }

    fn capture_pointer(&self, pointer: PointerId) {
        // Platforms that route pointer events through winit keep delivering them while a button
        // or a touch is down.
        trace!("Pointer capture requested for {pointer}");
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelInput {
    pub time: Instant,
    /// Client position.
    pub pos: Point,
    pub delta_y: f64,
    pub modifiers: Modifiers,
    pub origins: EventOrigins,
}

impl WheelInput {
    pub fn new(time: Instant, pos: impl Into<Point>, delta_y: f64, modifiers: Modifiers) -> Self {
        Self {
            time,
            pos: pos.into(),
            delta_y,
            modifiers,
            origins: EventOrigins::default(),
        }
    }

    #[must_use]
    pub fn with_origins(mut self, origins: EventOrigins) -> Self {
        self.origins = origins;
        self
    }
}

impl RawEvent for WheelInput {
    fn time(&self) -> Instant {
        self.time
    }

    fn client_pos(&self) -> Point {
        self.pos
    }

    fn page_pos(&self) -> Point {
        self.pos + self.origins.page
    }

    fn screen_pos(&self) -> Point {
        self.pos + self.origins.screen
    }

    fn target_bounds(&self) -> Rect {
        self.origins.target
    }
}

impl RawWheelEvent for WheelInput {
    fn delta_y(&self) -> f64 {
        self.delta_y
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

/// An input event for the recognizer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerUp(PointerInput),
    PointerMove(PointerInput),
    Wheel(WheelInput),
}

