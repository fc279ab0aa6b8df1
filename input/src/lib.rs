//! Recognizes clicks, double clicks, holds, drags, pinch zooms, and rotations from a stream of
//! pointer and wheel events.
mod config;
mod coordinates;
mod event;
mod event_aggregator;
mod gesture;
mod pointer;
mod recognizer;
mod session;
mod timer;

pub use config::*;
pub use coordinates::*;
pub use event::*;
pub use event_aggregator::*;
pub use gesture::*;
pub use pointer::*;
pub use recognizer::*;
pub use session::{GestureState, ZoomStep};

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
