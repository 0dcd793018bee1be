//! Placement gesture - secondary activation creating a new marker.
//!
//! A secondary (right/alternate) pointer activation inside the canvas is
//! inverse-transformed into content space and validated against the current
//! content bounds. Out-of-bounds points are silently dropped: imprecise
//! pointer input near edges is a normal outcome, not an error.

use kurbo::Point;
use tracing::debug;

use crate::content::ContentDescriptor;
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::types::PlacementRequest;

/// Resolve a secondary activation at `screen` into a validated placement
/// request, or `None` when the point falls outside the content bounds.
pub fn resolve_placement(
    screen: Point,
    ctx: &CoordinateContext,
    descriptor: &ContentDescriptor,
) -> Option<PlacementRequest> {
    let content = CoordinateConverter::screen_to_content(screen, ctx);
    let bounds = descriptor.content_bounds();
    // Boundary values are accepted; only strictly-outside points are dropped.
    if content.x < bounds.x0
        || content.y < bounds.y0
        || content.x > bounds.x1
        || content.y > bounds.y1
    {
        debug!(
            x = content.x,
            y = content.y,
            "placement outside content bounds dropped"
        );
        return None;
    }
    Some(PlacementRequest {
        x: content.x,
        y: content.y,
    })
}
