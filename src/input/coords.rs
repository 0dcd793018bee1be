//! Coordinate conversion utilities for canvas interactions.
//!
//! Centralizes the screen <-> content formulas so they are not duplicated
//! across input handling code. All conversions go through a
//! [`CoordinateContext`] built per event: the viewport element can resize or
//! move at any time, so its bounding rectangle must be the live one reported
//! with the pointer event, never a cached copy.

use kurbo::{Point, Rect, Vec2};

/// Context needed for coordinate conversions.
pub struct CoordinateContext {
    /// Live bounding rectangle of the viewport element, in screen space,
    /// captured at the moment of the pointer event.
    pub element_rect: Rect,
    pub scale: f64,
    pub translate: Vec2,
}

impl CoordinateContext {
    #[inline]
    pub fn new(element_rect: Rect, scale: f64, translate: Vec2) -> Self {
        Self {
            element_rect,
            scale,
            translate,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a screen position to a content position.
    #[inline]
    pub fn screen_to_content(screen: Point, ctx: &CoordinateContext) -> Point {
        Point::new(
            (screen.x - ctx.element_rect.x0 - ctx.translate.x) / ctx.scale,
            (screen.y - ctx.element_rect.y0 - ctx.translate.y) / ctx.scale,
        )
    }

    /// Convert a content position to a screen position.
    #[inline]
    pub fn content_to_screen(content: Point, ctx: &CoordinateContext) -> Point {
        Point::new(
            content.x * ctx.scale + ctx.translate.x + ctx.element_rect.x0,
            content.y * ctx.scale + ctx.translate.y + ctx.element_rect.y0,
        )
    }

    /// Convert a delta from screen to content space (for drag operations).
    #[inline]
    pub fn delta_screen_to_content(delta: Vec2, scale: f64) -> Vec2 {
        delta / scale
    }

    /// Convert a delta from content to screen space.
    #[inline]
    pub fn delta_content_to_screen(delta: Vec2, scale: f64) -> Vec2 {
        delta * scale
    }
}
