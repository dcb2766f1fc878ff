//! Core control loop for the dotfield animation.
//!
//! Everything here is plain state plus pure update functions; no GPU, no I/O.
//! The host drives one [`FrameEngine::tick`] per display refresh:
//!
//! ```text
//!   frame callback(timestamp)
//!          │
//!          ▼
//!   FlickerFreeClock::advance ──▶ Trajectory::position
//!          │                             │
//!          │        PointerState ────────┤  (override when active)
//!          │                             ▼
//!          └────────────────────▶ blend::approach ──▶ FrameUniforms
//! ```
//!
//! Pointer entry points may be called from the host's input path between
//! ticks; they only perform plain writes, and the tick reads the latest
//! value (last-write-wins coalescing).

pub mod blend;
pub mod clock;
pub mod frame;
pub mod pointer;
pub mod trajectory;

pub use blend::approach;
pub use clock::FlickerFreeClock;
pub use frame::{FrameEngine, FrameUniforms, DEFAULT_NUM_DOTS};
pub use pointer::{PointerEvent, PointerState};
pub use trajectory::{CubicEase, Trajectory};

/// A 2D point or extent in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}
