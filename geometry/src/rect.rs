use crate::{Point, Vector};

/// A basic rectangle representation. Meant to be sorted and with finite values only.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(origin: impl Into<Point>, size: impl Into<Vector>) -> Self {
        let origin = origin.into();
        let size = size.into();
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.x,
            bottom: origin.y + size.y,
        }
    }

    pub fn origin(&self) -> Point {
        (self.left, self.top).into()
    }
}
