//! R-tree spatial index over marker positions.
//!
//! Pointer-down hit testing runs on every primary press, so marker lookup is
//! O(log n) through an R-tree instead of scanning the marker list. Markers
//! are points; hits are resolved against a disc whose radius is the
//! screen-space hit radius divided by the current scale.

use std::collections::HashMap;

use kurbo::Point;
use rstar::{AABB, RTree, RTreeObject};

use crate::types::MarkerId;

#[derive(Debug, Clone, Copy)]
struct MarkerEntry {
    marker: MarkerId,
    x: f64,
    y: f64,
}

impl MarkerEntry {
    fn distance_squared(&self, point: Point) -> f64 {
        let dx = self.x - point.x;
        let dy = self.y - point.y;
        dx * dx + dy * dy
    }
}

impl RTreeObject for MarkerEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PartialEq for MarkerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.marker == other.marker
    }
}

/// Spatial index for marker hit testing.
#[derive(Default)]
pub struct MarkerIndex {
    tree: RTree<MarkerEntry>,
    entries: HashMap<MarkerId, MarkerEntry>,
}

impl MarkerIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or reposition a marker.
    pub fn insert(&mut self, marker: MarkerId, position: Point) {
        if let Some(old) = self.entries.remove(&marker) {
            self.tree.remove(&old);
        }
        let entry = MarkerEntry {
            marker,
            x: position.x,
            y: position.y,
        };
        self.tree.insert(entry);
        self.entries.insert(marker, entry);
    }

    pub fn update(&mut self, marker: MarkerId, position: Point) {
        self.insert(marker, position);
    }

    pub fn remove(&mut self, marker: MarkerId) -> bool {
        match self.entries.remove(&marker) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    /// Rebuild the index from scratch (fresh marker list from the bridge).
    pub fn rebuild<I>(&mut self, markers: I)
    where
        I: Iterator<Item = (MarkerId, Point)>,
    {
        let entries: Vec<MarkerEntry> = markers
            .map(|(marker, position)| MarkerEntry {
                marker,
                x: position.x,
                y: position.y,
            })
            .collect();
        self.entries = entries.iter().map(|e| (e.marker, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    /// Markers whose hit disc of `radius` (content space) covers `point`,
    /// nearest first.
    pub fn query_hit(&self, point: Point, radius: f64) -> Vec<MarkerId> {
        let envelope = AABB::from_corners(
            [point.x - radius, point.y - radius],
            [point.x + radius, point.y + radius],
        );
        let mut hits: Vec<&MarkerEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.distance_squared(point) <= radius * radius)
            .collect();
        hits.sort_by(|a, b| {
            a.distance_squared(point)
                .partial_cmp(&b.distance_squared(point))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.into_iter().map(|entry| entry.marker).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}
