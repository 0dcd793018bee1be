//! Content load state machine.
//!
//! ```text
//! Empty -> (source arrives) -> Loading{Raster|Vector} -> {Ready | Error}
//! ```
//!
//! Decoding is delegated to the external renderer: a request hands back a
//! generation-stamped [`LoadTicket`] telling the embedder what to load, and
//! the embedder reports back native dimensions (or failure). A new request
//! supersedes any in-flight load - stale completions are detected by the
//! generation check and discarded, never applied over a newer descriptor.
//!
//! A load with no resolution within the timeout window is forced into the
//! error/fallback state by `check_timeout`, so the system never hangs
//! pending; markers remain placeable against the fallback box.

use std::time::{Duration, Instant};

use kurbo::Size;
use tracing::{debug, warn};

use crate::constants::{CONTENT_LOAD_TIMEOUT, RASTER_FIT_BOX};
use crate::types::{ContentSource, RenderPolicy};

use super::ContentDescriptor;

/// What kind of decode the embedder must perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    Raster,
    Vector,
}

/// Handle identifying one in-flight load. Resolutions carrying a superseded
/// ticket are discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    kind: LoadKind,
}

impl LoadTicket {
    pub fn kind(&self) -> LoadKind {
        self.kind
    }
}

/// Load status, separate from the active descriptor: the previous descriptor
/// stays in effect while a new load is pending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadPhase {
    /// Nothing requested yet.
    Idle,
    Loading { kind: LoadKind, started: Instant },
    Ready,
    /// Load failed or timed out; the fallback descriptor is active.
    Error,
}

pub struct ContentResolver {
    descriptor: ContentDescriptor,
    phase: LoadPhase,
    generation: u64,
    raster_fit_box: Size,
    timeout: Duration,
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentResolver {
    pub fn new() -> Self {
        Self {
            descriptor: ContentDescriptor::empty(),
            phase: LoadPhase::Idle,
            generation: 0,
            raster_fit_box: Size::new(RASTER_FIT_BOX.0, RASTER_FIT_BOX.1),
            timeout: CONTENT_LOAD_TIMEOUT,
        }
    }

    /// Override the maximum box used for raster fit-to-box sizing.
    pub fn with_raster_fit_box(mut self, max_box: Size) -> Self {
        self.raster_fit_box = max_box;
        self
    }

    /// The active descriptor. Starts as the empty box and is only replaced
    /// by a current (non-stale) resolution, failure or timeout.
    pub fn descriptor(&self) -> &ContentDescriptor {
        &self.descriptor
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading { .. })
    }

    /// Request new background content, superseding any in-flight load.
    ///
    /// No source means an empty plan and resolves immediately (no ticket).
    /// Otherwise the source is classified by its vector signature and the
    /// returned ticket tells the embedder what to decode.
    pub fn request(&mut self, source: Option<&ContentSource>, now: Instant) -> Option<LoadTicket> {
        self.generation += 1;
        match source {
            None => {
                self.descriptor = ContentDescriptor::empty();
                self.phase = LoadPhase::Ready;
                debug!("content resolved: empty plan");
                None
            }
            Some(source) => {
                let kind = if source.is_vector() {
                    LoadKind::Vector
                } else {
                    LoadKind::Raster
                };
                self.phase = LoadPhase::Loading { kind, started: now };
                debug!(locator = %source.locator, ?kind, generation = self.generation, "content load requested");
                Some(LoadTicket {
                    generation: self.generation,
                    kind,
                })
            }
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && self.is_loading()
    }

    /// Apply a finished raster decode. Returns false when the ticket was
    /// superseded and the resolution discarded.
    pub fn resolve_raster(&mut self, ticket: LoadTicket, native: Size) -> bool {
        if !self.is_current(ticket) {
            warn!("stale raster resolution discarded");
            return false;
        }
        self.descriptor = ContentDescriptor::raster(native, self.raster_fit_box);
        self.phase = LoadPhase::Ready;
        debug!(
            render_w = self.descriptor.render.width,
            render_h = self.descriptor.render.height,
            "raster content ready"
        );
        true
    }

    /// Apply a finished vector page decode. Returns false when superseded.
    pub fn resolve_vector(
        &mut self,
        ticket: LoadTicket,
        native_page: Size,
        page_index: usize,
        page_count: usize,
        policy: RenderPolicy,
    ) -> bool {
        if !self.is_current(ticket) {
            warn!("stale vector resolution discarded");
            return false;
        }
        self.descriptor = ContentDescriptor::vector(native_page, page_index, page_count, policy);
        self.phase = LoadPhase::Ready;
        debug!(
            ?policy,
            page_index,
            page_count,
            render_w = self.descriptor.render.width,
            render_h = self.descriptor.render.height,
            "vector content ready"
        );
        true
    }

    /// Report a failed load. Substitutes the fixed fallback descriptor so
    /// the rest of the system keeps functioning. Returns false when the
    /// ticket was superseded.
    pub fn resolve_failed(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            debug!("stale load failure discarded");
            return false;
        }
        warn!("content load failed, substituting fallback descriptor");
        self.descriptor = ContentDescriptor::fallback();
        self.phase = LoadPhase::Error;
        true
    }

    /// Force a load pending past the timeout window into the error/fallback
    /// state. Returns true when a timeout fired.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        let LoadPhase::Loading { started, .. } = self.phase else {
            return false;
        };
        if now.saturating_duration_since(started) < self.timeout {
            return false;
        }
        warn!("content load timed out, substituting fallback descriptor");
        self.descriptor = ContentDescriptor::fallback();
        self.phase = LoadPhase::Error;
        true
    }
}
