//! Core types shared across the canvas system.
//!
//! Markers and content sources cross the persistence-bridge boundary, so they
//! carry serde derives. All marker coordinates are content-space floats;
//! screen-space values never appear in these types.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Stable marker identifier, owned by the persistence bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(Uuid);

impl MarkerId {
    /// Mint a fresh identifier. Normally done by the bridge when it
    /// materializes a marker.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of the plan being annotated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

impl PlanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Markers
// ============================================================================

/// A persisted positional annotation on the plan.
///
/// Position is mutated only through a successful commit; the drag preview
/// lives in the drag controller, never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub label: String,
    /// Content-space x, >= 0.
    pub x: f64,
    /// Content-space y, >= 0.
    pub y: f64,
}

impl Marker {
    pub fn new(id: MarkerId, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            label: label.into(),
            x: x.max(0.0),
            y: y.max(0.0),
        }
    }

    /// Last persisted content position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ============================================================================
// Content sources
// ============================================================================

/// Locator plus type hint for the background content, supplied by the
/// embedder. Absence of a source means the plan has no background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    /// URL or opaque binary reference understood by the external renderer.
    pub locator: String,
    /// Declared MIME type, when the embedder knows it.
    pub mime: Option<String>,
}

/// Known vector-document signatures checked against the locator.
const VECTOR_SIGNATURES: &[&str] = &[".pdf"];

/// MIME types classified as paginated vector documents.
const VECTOR_MIME_TYPES: &[&str] = &["application/pdf"];

impl ContentSource {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            mime: None,
        }
    }

    pub fn with_mime(locator: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            mime: Some(mime.into()),
        }
    }

    /// True when the locator or MIME hint carries a vector-document
    /// signature. Everything else defaults to raster.
    pub fn is_vector(&self) -> bool {
        let locator = self.locator.to_ascii_lowercase();
        if VECTOR_SIGNATURES.iter().any(|sig| locator.contains(sig)) {
            return true;
        }
        self.mime
            .as_deref()
            .is_some_and(|mime| VECTOR_MIME_TYPES.contains(&mime))
    }
}

/// Algorithm used to size a paginated vector document for display.
/// Immutable per plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderPolicy {
    /// Render small and let the outer container stretch the result.
    /// Kept for compatibility with documents created under the old viewer.
    Legacy,
    /// Render the page natively at a fixed target width.
    HighRes,
}

// ============================================================================
// Placement
// ============================================================================

/// A validated content-space point requesting marker creation.
/// Ephemeral: created and consumed within a single gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRequest {
    pub x: f64,
    pub y: f64,
}

impl PlacementRequest {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
