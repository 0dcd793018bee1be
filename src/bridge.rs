//! Persistence bridge - the collaborator that owns the canonical marker list.
//!
//! The canvas never mutates persisted state directly: drags and placements
//! funnel through this trait, and the local marker cache is updated from its
//! results. Errors are opaque (`anyhow`) - what went wrong inside the store
//! is not this crate's business.
//!
//! ## Deferred resolution
//!
//! Commits are issued once per gesture and must not block input handling. An
//! implementation backed by a network store typically enqueues the write and
//! returns `Ok(())` at issue time; the embedder then reports the real outcome
//! through [`crate::canvas::PlanCanvas::commit_resolved`], which performs the
//! deterministic rollback on failure. Returning `Err` directly is also valid
//! and rolls back immediately.

use crate::types::{Marker, MarkerId, PlanId};

pub trait PersistenceBridge {
    /// Fetch all markers for the plan.
    fn list_markers(&mut self, plan: &PlanId) -> anyhow::Result<Vec<Marker>>;

    /// Persist a new position for an existing marker. Coordinates are
    /// rounded content-space integers.
    fn commit_marker_position(&mut self, marker: MarkerId, x: i64, y: i64) -> anyhow::Result<()>;

    /// Materialize a new marker at a validated content-space point.
    /// `attrs` carries embedder-defined attributes (label, asset kind, ...).
    fn create_marker(
        &mut self,
        plan: &PlanId,
        x: f64,
        y: f64,
        attrs: serde_json::Value,
    ) -> anyhow::Result<Marker>;

    /// Remove a marker from the store.
    fn delete_marker(&mut self, marker: MarkerId) -> anyhow::Result<()>;
}
