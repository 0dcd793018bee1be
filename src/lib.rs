//! Headless canvas core for annotating a background plan with positional
//! markers.
//!
//! The crate owns three concerns and nothing else:
//!
//! - the pan/zoom coordinate engine ([`input::viewport`], [`input::coords`]),
//!   which keeps pointer/screen space, viewport space and content space
//!   consistent under continuous input;
//! - the content mode resolver ([`content`]), which classifies the background
//!   source (empty, raster photo, paginated vector document) and derives the
//!   render dimensions per fitting policy;
//! - the gesture protocol ([`input::drag`], [`input::placement`]), which turns
//!   pointer events into a live drag preview plus exactly one commit per
//!   gesture, and secondary activations into validated placement requests.
//!
//! Rendering and persistence are collaborators: the embedder draws the
//! [`render::markers::MarkerVisual`] projection and implements
//! [`bridge::PersistenceBridge`]. [`canvas::PlanCanvas`] wires the pieces
//! together behind pointer-event entry points.

pub mod bridge;
pub mod canvas;
pub mod constants;
pub mod content;
pub mod error;
pub mod input;
pub mod perf;
pub mod render;
pub mod spatial_index;
pub mod types;

pub use canvas::{PlanCanvas, PointerResponse};
pub use error::{CanvasError, CanvasResult};
