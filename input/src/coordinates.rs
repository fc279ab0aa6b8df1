use std::fmt;

use gestura_geometry::Point;

use crate::RawEvent;

/// Selects which coordinates of a raw event the recognizer works with.
#[derive(Default)]
pub enum CoordinateSpace {
    /// Relative to the element receiving the events.
    #[default]
    Client,
    /// Relative to the document.
    Page,
    /// Relative to the screen.
    Screen,
    /// Relative to the origin of the target's bounds, for SVG viewports.
    Svg,
    Custom(Box<dyn Fn(&dyn RawEvent) -> Point>),
}

impl CoordinateSpace {
    pub fn custom(f: impl Fn(&dyn RawEvent) -> Point + 'static) -> Self {
        Self::Custom(Box::new(f))
    }

    pub fn project(&self, event: &dyn RawEvent) -> Point {
        match self {
            Self::Client => event.client_pos(),
            Self::Page => event.page_pos(),
            Self::Screen => event.screen_pos(),
            Self::Svg => event.client_pos() - event.target_bounds().origin(),
            Self::Custom(f) => f(event),
        }
    }
}

impl fmt::Debug for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "Client"),
            Self::Page => write!(f, "Page"),
            Self::Screen => write!(f, "Screen"),
            Self::Svg => write!(f, "Svg"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use gestura_geometry::{Rect, Vector};

    use super::*;
    use crate::{EventOrigins, Instant, PointerId, PointerInput};

    fn event() -> PointerInput {
        PointerInput::new(Instant::now(), PointerId::MOUSE, (15.0, 25.0)).with_origins(
            EventOrigins::new(
                Vector::new(0.0, 100.0),
                Vector::new(200.0, 300.0),
                Rect::new((5.0, 5.0), (50.0, 50.0)),
            ),
        )
    }

    #[test]
    fn projections() {
        let e = event();
        assert_eq!(CoordinateSpace::Client.project(&e), Point::new(15.0, 25.0));
        assert_eq!(CoordinateSpace::Page.project(&e), Point::new(15.0, 125.0));
        assert_eq!(CoordinateSpace::Screen.project(&e), Point::new(215.0, 325.0));
        assert_eq!(CoordinateSpace::Svg.project(&e), Point::new(10.0, 20.0));
    }

    #[test]
    fn custom_projection() {
        let space = CoordinateSpace::custom(|e| e.client_pos() * 2.0);
        assert_eq!(space.project(&event()), Point::new(30.0, 50.0));
        assert_eq!(format!("{space:?}"), "Custom(..)");
    }
}
