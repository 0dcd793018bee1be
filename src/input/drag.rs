//! Marker reposition gesture state machine.
//!
//! ## State transitions
//!
//! ```text
//! Idle     -> Dragging   (pointer down on a marker hit region)
//! Dragging -> Idle       (pointer up or pointer leaves the canvas)
//! ```
//!
//! Pointer-move handling is fully synchronous and unthrottled - it only
//! mutates local preview state, so it tracks the pointer at input rate. The
//! persistence commit happens exactly once per gesture, at release, bounding
//! write volume to O(1) per gesture regardless of how many move events fired.
//!
//! At most one `DragSession` exists system-wide; a pointer-down while a
//! session is active is a no-op, not an error.

use kurbo::Point;
use tracing::debug;

use crate::constants::DRAG_THRESHOLD_PX;
use crate::types::MarkerId;

/// Transient state of an in-progress marker reposition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub marker: MarkerId,
    /// Pointer position at pointer-down, screen space.
    pub origin_screen: Point,
    /// The marker's last persisted content position (not any preview).
    pub origin_content: Point,
    /// Live preview position, content space, each axis clamped >= 0.
    pub preview_content: Point,
    /// Set once the pointer has moved past the click/drag threshold.
    passed_threshold: bool,
}

/// What a finished gesture amounts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRelease {
    /// Movement stayed below the threshold: treat as a click on the marker,
    /// delegated to whatever click handler the marker exposes.
    Click(MarkerId),
    /// Reposition: commit the rounded final position exactly once.
    Commit { marker: MarkerId, x: i64, y: i64 },
}

/// Owns the single optional [`DragSession`].
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Live preview position if an active session targets this marker.
    pub fn preview_for(&self, marker: MarkerId) -> Option<Point> {
        self.session
            .filter(|s| s.marker == marker)
            .map(|s| s.preview_content)
    }

    /// Begin a session on pointer-down over a marker. Returns false (no-op)
    /// if a session is already active.
    pub fn begin(&mut self, marker: MarkerId, origin_screen: Point, origin_content: Point) -> bool {
        if self.session.is_some() {
            debug!(%marker, "drag ignored: session already active");
            return false;
        }
        self.session = Some(DragSession {
            marker,
            origin_screen,
            origin_content,
            preview_content: origin_content,
            passed_threshold: false,
        });
        debug!(%marker, "drag session started");
        true
    }

    /// Recompute the preview for a pointer-move:
    /// `preview = origin_content + (screen - origin_screen) / scale`,
    /// each axis clamped at 0. Returns the new preview, or None when idle.
    pub fn update(&mut self, screen: Point, scale: f64) -> Option<Point> {
        let session = self.session.as_mut()?;
        let screen_delta = screen - session.origin_screen;
        if !session.passed_threshold && screen_delta.hypot() >= DRAG_THRESHOLD_PX {
            session.passed_threshold = true;
        }
        let content_delta = screen_delta / scale;
        session.preview_content = Point::new(
            (session.origin_content.x + content_delta.x).max(0.0),
            (session.origin_content.y + content_delta.y).max(0.0),
        );
        Some(session.preview_content)
    }

    /// Consume the session on pointer-up or pointer-leave. The session is
    /// cleared synchronously here, before any commit resolves, so the UI
    /// never blocks on persistence latency.
    pub fn release(&mut self) -> Option<DragRelease> {
        let session = self.session.take()?;
        if !session.passed_threshold {
            debug!(marker = %session.marker, "drag below threshold: click");
            return Some(DragRelease::Click(session.marker));
        }
        let x = session.preview_content.x.round() as i64;
        let y = session.preview_content.y.round() as i64;
        debug!(marker = %session.marker, x, y, "drag released");
        Some(DragRelease::Commit {
            marker: session.marker,
            x,
            y,
        })
    }

    /// Drop the session without producing a release (marker deleted under
    /// the pointer, content swapped out).
    pub fn abort(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(marker = %session.marker, "drag session aborted");
        }
    }
}
