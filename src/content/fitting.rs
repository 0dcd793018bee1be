//! Content sizing rules.
//!
//! Pure functions deriving render dimensions from native dimensions. The
//! raster rule preserves aspect ratio inside a maximum box; the two vector
//! rules are mutually exclusive policies selected per document.

use kurbo::Size;

use crate::constants::{
    HIGH_RES_TARGET_WIDTH, LEGACY_MAX_SCALE, LEGACY_MIN_SCALE, LEGACY_TARGET_DIMENSION,
};

/// Fit-to-box: size `native` within `max_box` preserving aspect ratio.
///
/// If the native aspect is wider than the box aspect the width binds,
/// otherwise the height binds.
pub fn fit_raster(native: Size, max_box: Size) -> Size {
    let aspect = native.width / native.height;
    if aspect > max_box.width / max_box.height {
        Size::new(max_box.width, max_box.width / aspect)
    } else {
        Size::new(max_box.height * aspect, max_box.height)
    }
}

/// Legacy vector policy: render small and let the outer container stretch
/// the result. `scale = clamp(1200 / max(native_w, native_h), 2, 4)`.
pub fn fit_vector_legacy(native_page: Size) -> Size {
    let larger = native_page.width.max(native_page.height);
    let scale = (LEGACY_TARGET_DIMENSION / larger).clamp(LEGACY_MIN_SCALE, LEGACY_MAX_SCALE);
    Size::new(native_page.width * scale, native_page.height * scale)
}

/// High-resolution vector policy: render natively at a fixed target width,
/// avoiding the stretch artifacts of the legacy policy.
pub fn fit_vector_high_res(native_page: Size) -> Size {
    let scale = HIGH_RES_TARGET_WIDTH / native_page.width;
    Size::new(HIGH_RES_TARGET_WIDTH, native_page.height * scale)
}
