use gestura_geometry::{Point, Vector};

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A press and release without movement. When a double click handler is registered, this is
    /// only reported after the double click window passed.
    Click(Point),
    /// A second press inside the double click window. Reported at the second press.
    DoubleClick(Point),
    /// A press held without movement for the hold time. Reported at the press position.
    Hold(Point),
    /// A single pointer movement or a two pointer pan.
    Drag { from: Point, to: Point, delta: Vector },
    /// A scale step relative to the previous step.
    Zoom { anchor: Point, factor: f64 },
    /// A rotation step in degrees relative to the previous step.
    Rotate { anchor: Point, angle: f64 },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Click(_) => "click",
            Gesture::DoubleClick(_) => "double click",
            Gesture::Hold(_) => "hold",
            Gesture::Drag { .. } => "drag",
            Gesture::Zoom { .. } => "zoom",
            Gesture::Rotate { .. } => "rotate",
        }
    }
}
