//! Pointer input handling for the canvas.
//!
//! ## Architecture
//!
//! Drag tracking is an explicit state machine (`DragController`) instead of
//! scattered mutable flags: one owned `DragSession` is created on
//! pointer-down over a marker, mutated on every pointer-move, and consumed
//! exactly once on release. Coordinate conversions are centralized in
//! `coords` so the screen/content formulas exist in one place.
//!
//! ## Modules
//!
//! - `coords` - screen <-> content coordinate conversion
//! - `viewport` - pan/zoom transform state, animation, reset
//! - `drag` - marker reposition gesture state machine
//! - `placement` - secondary-activation marker placement

pub mod coords;
pub mod drag;
pub mod placement;
pub mod viewport;

pub use coords::{CoordinateContext, CoordinateConverter};
pub use drag::{DragController, DragRelease, DragSession};
pub use viewport::{Easing, Viewport};
