//! Geometry primitives for pointer gesture recognition.

mod point;
mod rect;

pub use point::*;
pub use rect::*;
