//! Marker layer - pure projection of markers into display positions.
//!
//! The layer owns no state: it reads the persisted markers, the active drag
//! session and the selection set, and produces visual positions. A marker
//! targeted by the active drag session shows the live preview; every other
//! marker shows its persisted position. No write-back happens here.

use std::collections::HashSet;

use kurbo::Point;

use crate::input::drag::DragController;
use crate::types::{Marker, MarkerId};

/// Display state of one marker, ready for the external renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerVisual {
    pub id: MarkerId,
    pub label: String,
    /// Content-space display position: drag preview or persisted position.
    pub position: Point,
    pub selected: bool,
    pub dragging: bool,
}

/// Project markers into visuals.
pub fn project_markers(
    markers: &[Marker],
    drag: &DragController,
    selected: &HashSet<MarkerId>,
) -> Vec<MarkerVisual> {
    markers
        .iter()
        .map(|marker| {
            let preview = drag.preview_for(marker.id);
            MarkerVisual {
                id: marker.id,
                label: marker.label.clone(),
                position: preview.unwrap_or_else(|| marker.position()),
                selected: selected.contains(&marker.id),
                dragging: preview.is_some(),
            }
        })
        .collect()
}
