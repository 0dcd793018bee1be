//! Canvas orchestrator - pointer event entry points and bridge wiring.
//!
//! `PlanCanvas` owns the viewport, the content resolver, the drag controller
//! and a local marker cache mirroring the bridge's canonical list. Pointer
//! events flow in here; persistence flows out through the
//! [`PersistenceBridge`].
//!
//! ## Commit discipline
//!
//! A drag produces exactly one commit, at release. The local cache is
//! updated optimistically and a `PendingCommit` records the last committed
//! position; pending commits are replaced, never stacked, so the last commit
//! issued always carries the final pointer-up position. Failure - whether
//! returned at issue time or reported later through [`Self::commit_resolved`]
//! - rolls the displayed position back to the recorded value.

use std::collections::HashSet;
use std::time::Instant;

use kurbo::{Point, Rect, Size};
use serde_json::Value;
use tracing::{debug, warn};

use crate::bridge::PersistenceBridge;
use crate::constants::MARKER_HIT_RADIUS_PX;
use crate::content::{ContentResolver, LoadTicket};
use crate::error::{CanvasError, CanvasResult};
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::input::drag::{DragController, DragRelease};
use crate::input::placement;
use crate::input::viewport::Viewport;
use crate::profile_scope;
use crate::render::markers::{MarkerVisual, project_markers};
use crate::spatial_index::MarkerIndex;
use crate::types::{ContentSource, Marker, MarkerId, PlanId};

/// Outcome of a primary-button gesture step, for the embedder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerResponse {
    /// Nothing under the pointer, or the event was swallowed by an active
    /// session; not consumed by the marker layer.
    Ignored,
    /// A drag session started on the marker.
    DragStarted(MarkerId),
    /// Released below the movement threshold; delegate as a click.
    Clicked(MarkerId),
    /// Drag finished and a position commit was issued.
    Committed(MarkerId),
}

/// Rollback bookkeeping for the single in-flight commit.
struct PendingCommit {
    marker: MarkerId,
    /// Position before the optimistic update - the last committed value.
    prior: Point,
}

pub struct PlanCanvas<B: PersistenceBridge> {
    plan: PlanId,
    bridge: B,
    viewport: Viewport,
    resolver: ContentResolver,
    drag: DragController,
    markers: Vec<Marker>,
    index: MarkerIndex,
    selected: HashSet<MarkerId>,
    pending_commit: Option<PendingCommit>,
}

impl<B: PersistenceBridge> PlanCanvas<B> {
    pub fn new(plan: PlanId, bridge: B) -> Self {
        Self {
            plan,
            bridge,
            viewport: Viewport::new(),
            resolver: ContentResolver::new(),
            drag: DragController::new(),
            markers: Vec::new(),
            index: MarkerIndex::new(),
            selected: HashSet::new(),
            pending_commit: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn plan(&self) -> &PlanId {
        &self.plan
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn content(&self) -> &ContentResolver {
        &self.resolver
    }

    pub fn content_mut(&mut self) -> &mut ContentResolver {
        &mut self.resolver
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn selected(&self) -> &HashSet<MarkerId> {
        &self.selected
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    // ========================================================================
    // Marker cache
    // ========================================================================

    /// Fetch the canonical marker list from the bridge and rebuild the hit
    /// index.
    pub fn load_markers(&mut self) -> CanvasResult<()> {
        let markers = self
            .bridge
            .list_markers(&self.plan)
            .map_err(CanvasError::ListFailed)?;
        self.index
            .rebuild(markers.iter().map(|m| (m.id, m.position())));
        self.selected.retain(|id| markers.iter().any(|m| m.id == *id));
        debug!(count = markers.len(), plan = %self.plan, "markers loaded");
        self.markers = markers;
        Ok(())
    }

    fn set_marker_position(&mut self, id: MarkerId, position: Point) {
        if let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) {
            marker.x = position.x;
            marker.y = position.y;
            self.index.update(id, position);
        }
    }

    // ========================================================================
    // Pointer protocol
    // ========================================================================

    fn context(&self, element_rect: Rect) -> CoordinateContext {
        CoordinateContext::new(element_rect, self.viewport.scale(), self.viewport.translate())
    }

    /// Primary-button press. `element_rect` must be the live bounding
    /// rectangle of the viewport element at the moment of the event - the
    /// viewport can resize, so a cached rectangle would skew the inverse
    /// transform.
    pub fn pointer_down(&mut self, screen: Point, element_rect: Rect) -> PointerResponse {
        profile_scope!("pointer_down");
        if self.drag.is_dragging() {
            // At most one session system-wide; ignored, not an error.
            return PointerResponse::Ignored;
        }
        let ctx = self.context(element_rect);
        let content = CoordinateConverter::screen_to_content(screen, &ctx);
        let radius = MARKER_HIT_RADIUS_PX / self.viewport.scale();
        let Some(hit) = self.index.query_hit(content, radius).into_iter().next() else {
            return PointerResponse::Ignored;
        };
        let Some(origin_content) = self.marker(hit).map(Marker::position) else {
            return PointerResponse::Ignored;
        };
        self.drag.begin(hit, screen, origin_content);
        PointerResponse::DragStarted(hit)
    }

    /// Pointer-move. Synchronous and unthrottled: only local preview state
    /// changes, so this runs once per input event at input rate. Returns the
    /// new preview position while a session is active.
    pub fn pointer_move(&mut self, screen: Point) -> Option<Point> {
        profile_scope!("pointer_move");
        self.drag.update(screen, self.viewport.scale())
    }

    /// Primary-button release: end of the gesture.
    pub fn pointer_up(&mut self) -> CanvasResult<PointerResponse> {
        self.finish_drag()
    }

    /// The pointer left the canvas region: ends the gesture like a release.
    pub fn pointer_leave(&mut self) -> CanvasResult<PointerResponse> {
        self.finish_drag()
    }

    fn finish_drag(&mut self) -> CanvasResult<PointerResponse> {
        match self.drag.release() {
            None => Ok(PointerResponse::Ignored),
            Some(DragRelease::Click(id)) => {
                // Below threshold: select locally and delegate upward.
                self.toggle_selected(id);
                Ok(PointerResponse::Clicked(id))
            }
            Some(DragRelease::Commit { marker, x, y }) => self.issue_commit(marker, x, y),
        }
    }

    /// One commit per gesture: optimistic local update, then the bridge
    /// call. The session was already cleared by the drag controller, so the
    /// UI never blocks on the commit resolving.
    fn issue_commit(&mut self, marker: MarkerId, x: i64, y: i64) -> CanvasResult<PointerResponse> {
        let Some(prior) = self.marker(marker).map(Marker::position) else {
            warn!(%marker, "commit skipped: marker no longer known");
            return Err(CanvasError::MarkerNotFound(marker));
        };
        self.set_marker_position(marker, Point::new(x as f64, y as f64));
        // Replaced, never stacked: a superseded pending commit is dropped.
        self.pending_commit = Some(PendingCommit { marker, prior });
        match self.bridge.commit_marker_position(marker, x, y) {
            Ok(()) => {
                debug!(%marker, x, y, "position commit issued");
                Ok(PointerResponse::Committed(marker))
            }
            Err(source) => {
                self.rollback(marker);
                Err(CanvasError::CommitFailed { marker, source })
            }
        }
    }

    /// Report the outcome of a deferred commit (a bridge that queued the
    /// write at issue time). Failure rolls the displayed position back to
    /// the last committed value; resolutions for superseded commits are
    /// discarded.
    pub fn commit_resolved(
        &mut self,
        marker: MarkerId,
        outcome: anyhow::Result<()>,
    ) -> CanvasResult<()> {
        let Some(pending) = self.pending_commit.take() else {
            debug!(%marker, "commit resolution with nothing pending, discarded");
            return Ok(());
        };
        if pending.marker != marker {
            self.pending_commit = Some(pending);
            debug!(%marker, "stale commit resolution discarded");
            return Ok(());
        }
        match outcome {
            Ok(()) => {
                debug!(%marker, "position commit confirmed");
                Ok(())
            }
            Err(source) => {
                self.set_marker_position(marker, pending.prior);
                warn!(%marker, "commit failed, displayed position rolled back");
                Err(CanvasError::CommitFailed { marker, source })
            }
        }
    }

    fn rollback(&mut self, marker: MarkerId) {
        let Some(pending) = self.pending_commit.take() else {
            return;
        };
        if pending.marker != marker {
            self.pending_commit = Some(pending);
            return;
        }
        self.set_marker_position(marker, pending.prior);
        warn!(%marker, "commit failed, displayed position rolled back");
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Secondary/alternate activation: place a new marker at the pointer.
    ///
    /// Out-of-bounds activations resolve to `Ok(None)` (silently dropped).
    /// On acceptance the bridge materializes the marker, which is then added
    /// to the local cache and hit index.
    pub fn place_marker(
        &mut self,
        screen: Point,
        element_rect: Rect,
        attrs: Value,
    ) -> CanvasResult<Option<MarkerId>> {
        let ctx = self.context(element_rect);
        let Some(request) = placement::resolve_placement(screen, &ctx, self.resolver.descriptor())
        else {
            return Ok(None);
        };
        let marker = self
            .bridge
            .create_marker(&self.plan, request.x, request.y, attrs)
            .map_err(CanvasError::CreateFailed)?;
        debug!(marker = %marker.id, x = marker.x, y = marker.y, "marker placed");
        let id = marker.id;
        self.index.insert(id, marker.position());
        self.markers.push(marker);
        Ok(Some(id))
    }

    /// Remove a marker through the bridge, then from the local cache.
    pub fn delete_marker(&mut self, marker: MarkerId) -> CanvasResult<()> {
        if self.marker(marker).is_none() {
            return Err(CanvasError::MarkerNotFound(marker));
        }
        self.bridge
            .delete_marker(marker)
            .map_err(|source| CanvasError::DeleteFailed { marker, source })?;
        if self.drag.preview_for(marker).is_some() {
            self.drag.abort();
        }
        self.markers.retain(|m| m.id != marker);
        self.index.remove(marker);
        self.selected.remove(&marker);
        debug!(%marker, "marker deleted");
        Ok(())
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Request new background content; see [`ContentResolver::request`].
    pub fn request_content(
        &mut self,
        source: Option<&ContentSource>,
        now: Instant,
    ) -> Option<LoadTicket> {
        self.resolver.request(source, now)
    }

    /// Reset the view for the active content.
    pub fn reset_view(&mut self, viewport_size: Size) {
        let descriptor = self.resolver.descriptor().clone();
        self.viewport.reset(&descriptor, viewport_size);
    }

    // ========================================================================
    // Selection & projection
    // ========================================================================

    pub fn toggle_selected(&mut self, marker: MarkerId) {
        if !self.selected.remove(&marker) {
            self.selected.insert(marker);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Project the marker layer for the external renderer.
    pub fn visuals(&self) -> Vec<MarkerVisual> {
        project_markers(&self.markers, &self.drag, &self.selected)
    }
}
