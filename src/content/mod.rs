//! Background content classification and sizing.
//!
//! The background of a plan is one of three structurally different things:
//! nothing at all, a raster photo, or a page of a paginated vector document.
//! All three are collapsed into one [`ContentDescriptor`] so the rest of the
//! system works against abstract content bounds instead of three separately
//! coded branches.
//!
//! - `fitting` - the aspect-preserving fit-to-box rule and the two vector
//!   render policies
//! - `resolver` - the load state machine (supersession, failure fallback,
//!   timeout)

pub mod fitting;
pub mod resolver;

pub use resolver::{ContentResolver, LoadKind, LoadPhase, LoadTicket};

use kurbo::{Rect, Size};

use crate::constants::{CONTENT_BOX_SIZE, FALLBACK_CONTENT_SIZE};
use crate::types::RenderPolicy;

/// Structural kind of the background content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentMode {
    /// No background; markers float in the fixed content box.
    Empty,
    /// A raster photo, fit into a maximum bounding box.
    Raster,
    /// One page of a paginated vector document.
    Vector,
}

/// Resolved description of the background: its native (source-intrinsic)
/// size and the render size used for layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentDescriptor {
    pub mode: ContentMode,
    pub native: Size,
    pub render: Size,
    /// Page currently displayed (vector only; 0 otherwise).
    pub page_index: usize,
    /// Total pages (vector only; 0 otherwise).
    pub page_count: usize,
    /// Vector render policy, immutable per document.
    pub policy: Option<RenderPolicy>,
}

impl ContentDescriptor {
    /// Descriptor for a plan without background content: the fixed box.
    pub fn empty() -> Self {
        let box_size = Size::new(CONTENT_BOX_SIZE, CONTENT_BOX_SIZE);
        Self {
            mode: ContentMode::Empty,
            native: box_size,
            render: box_size,
            page_index: 0,
            page_count: 0,
            policy: None,
        }
    }

    /// Fixed fallback substituted on load failure or timeout, so markers
    /// remain placeable instead of the system hanging.
    pub fn fallback() -> Self {
        let size = Size::new(FALLBACK_CONTENT_SIZE.0, FALLBACK_CONTENT_SIZE.1);
        Self {
            mode: ContentMode::Raster,
            native: size,
            render: size,
            page_index: 0,
            page_count: 0,
            policy: None,
        }
    }

    /// Raster content fit into `max_box`, preserving aspect ratio.
    pub fn raster(native: Size, max_box: Size) -> Self {
        Self {
            mode: ContentMode::Raster,
            native,
            render: fitting::fit_raster(native, max_box),
            page_index: 0,
            page_count: 0,
            policy: None,
        }
    }

    /// One vector page sized per the document's render policy.
    pub fn vector(
        native_page: Size,
        page_index: usize,
        page_count: usize,
        policy: RenderPolicy,
    ) -> Self {
        let render = match policy {
            RenderPolicy::Legacy => fitting::fit_vector_legacy(native_page),
            RenderPolicy::HighRes => fitting::fit_vector_high_res(native_page),
        };
        Self {
            mode: ContentMode::Vector,
            native: native_page,
            render,
            page_index,
            page_count,
            policy: Some(policy),
        }
    }

    /// Content-space bounds markers may occupy. Raster content is bounded by
    /// its render size; empty and vector content by the fixed box.
    pub fn content_bounds(&self) -> Rect {
        match self.mode {
            ContentMode::Raster => Rect::new(0.0, 0.0, self.render.width, self.render.height),
            ContentMode::Empty | ContentMode::Vector => {
                Rect::new(0.0, 0.0, CONTENT_BOX_SIZE, CONTENT_BOX_SIZE)
            }
        }
    }
}
