//! Read-only projections handed to the external renderer.

pub mod markers;

pub use markers::{MarkerVisual, project_markers};
