//! Crate-wide constants.
//!
//! Centralizes magic numbers so coordinate math, fitting rules and gesture
//! thresholds stay in one place.

use std::time::Duration;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Maximum viewport scale.
pub const MAX_SCALE: f64 = 5.0;

/// Default viewport scale.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Multiplicative step applied by `zoom_in` / `zoom_out`.
pub const ZOOM_STEP_FACTOR: f64 = 1.2;

/// Default duration for animated transform changes, in milliseconds.
pub const TRANSFORM_ANIMATION_MS: u64 = 300;

// ============================================================================
// Content box & fitting
// ============================================================================

/// Side length of the fixed content box used for empty and vector content.
pub const CONTENT_BOX_SIZE: f64 = 6000.0;

/// Content anchor placed at the viewport origin when resetting the view over
/// the fixed box. Centering on the true box center would show mostly void.
pub const BOX_RESET_ANCHOR: (f64, f64) = (2200.0, 2600.0);

/// Fallback descriptor dimensions substituted on content load failure.
pub const FALLBACK_CONTENT_SIZE: (f64, f64) = (800.0, 600.0);

/// Default maximum bounding box for fit-to-box raster sizing.
pub const RASTER_FIT_BOX: (f64, f64) = (1600.0, 1200.0);

/// Legacy vector policy: target dimension dividing the larger page side.
pub const LEGACY_TARGET_DIMENSION: f64 = 1200.0;

/// Legacy vector policy: lower scale clamp.
pub const LEGACY_MIN_SCALE: f64 = 2.0;

/// Legacy vector policy: upper scale clamp.
pub const LEGACY_MAX_SCALE: f64 = 4.0;

/// High-resolution vector policy: fixed render width.
pub const HIGH_RES_TARGET_WIDTH: f64 = 6000.0;

/// A content load with no resolution within this window is forced into the
/// error/fallback state rather than left pending.
pub const CONTENT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Input handling
// ============================================================================

/// Screen-space movement (pixels) separating a click from a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Marker hit-region radius in screen pixels. Divided by the current scale
/// for content-space queries so markers stay grabbable when zoomed out.
pub const MARKER_HIT_RADIUS_PX: f64 = 12.0;
