//! Viewport transform state - pan, zoom, animated transitions, reset.
//!
//! The viewport owns the scale + translate pair applied between screen and
//! content space: `forward(content) = content * scale + translate`, and the
//! inverse. Scale is always positive and clamped to the configured bounds.
//!
//! Transform changes can be animated; a running animation is replaced, never
//! stacked, by any newer transform change, and is advanced by `tick(now)`.

use std::time::{Duration, Instant};

use kurbo::{Point, Size, Vec2};
use tracing::debug;

use crate::constants::{
    BOX_RESET_ANCHOR, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, ZOOM_STEP_FACTOR,
};
use crate::content::{ContentDescriptor, ContentMode};

/// Easing curve for animated transform changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInOutQuad,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A scale + translate snapshot, used as animation endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Transform {
    scale: f64,
    translate: Vec2,
}

impl Transform {
    fn lerp(a: Transform, b: Transform, t: f64) -> Transform {
        Transform {
            scale: a.scale + (b.scale - a.scale) * t,
            translate: a.translate + (b.translate - a.translate) * t,
        }
    }
}

#[derive(Clone, Debug)]
struct TransformAnimation {
    from: Transform,
    to: Transform,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl TransformAnimation {
    /// Sample the animation; the bool is true once the animation finished.
    fn sample(&self, now: Instant) -> (Transform, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (Transform::lerp(self.from, self.to, self.easing.apply(t)), false)
    }
}

/// Pan/zoom state of the canvas viewport.
#[derive(Debug)]
pub struct Viewport {
    scale: f64,
    translate: Vec2,
    min_scale: f64,
    max_scale: f64,
    animation: Option<TransformAnimation>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::with_scale_bounds(MIN_SCALE, MAX_SCALE)
    }

    pub fn with_scale_bounds(min_scale: f64, max_scale: f64) -> Self {
        debug_assert!(min_scale > 0.0 && min_scale <= max_scale);
        Self {
            scale: DEFAULT_SCALE.clamp(min_scale, max_scale),
            translate: Vec2::ZERO,
            min_scale,
            max_scale,
            animation: None,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Content point to viewport-local screen point.
    #[inline]
    pub fn forward(&self, content: Point) -> Point {
        Point::new(
            content.x * self.scale + self.translate.x,
            content.y * self.scale + self.translate.y,
        )
    }

    /// Viewport-local screen point to content point.
    #[inline]
    pub fn inverse(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate.x) / self.scale,
            (screen.y - self.translate.y) / self.scale,
        )
    }

    /// Multiplicative zoom step, clamped to the scale bounds.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * ZOOM_STEP_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / ZOOM_STEP_FACTOR);
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Shift the viewport by a screen-space delta (scroll panning).
    pub fn pan(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Set the transform, optionally animated. A zero duration applies
    /// immediately; otherwise the change is eased over `duration` and any
    /// running animation is replaced.
    pub fn set_transform(
        &mut self,
        tx: f64,
        ty: f64,
        scale: f64,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) {
        let target = Transform {
            scale: scale.clamp(self.min_scale, self.max_scale),
            translate: Vec2::new(tx, ty),
        };
        if duration.is_zero() {
            self.scale = target.scale;
            self.translate = target.translate;
            self.animation = None;
            return;
        }
        self.animation = Some(TransformAnimation {
            from: Transform {
                scale: self.scale,
                translate: self.translate,
            },
            to: target,
            started: now,
            duration,
            easing,
        });
    }

    /// Advance a running transform animation. Returns true while animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = &self.animation else {
            return false;
        };
        let (transform, done) = animation.sample(now);
        self.scale = transform.scale;
        self.translate = transform.translate;
        if done {
            self.animation = None;
        }
        !done
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Reset the view for the given content.
    ///
    /// Raster content is recentered within the viewport at default scale.
    /// Empty and vector content live in the fixed content box, which is much
    /// larger than the viewport, so reset jumps to a fixed anchor instead of
    /// the geometric center.
    pub fn reset(&mut self, descriptor: &ContentDescriptor, viewport_size: Size) {
        self.animation = None;
        self.scale = DEFAULT_SCALE.clamp(self.min_scale, self.max_scale);
        match descriptor.mode {
            ContentMode::Raster => {
                let render = descriptor.render;
                self.translate = Vec2::new(
                    (viewport_size.width - render.width * self.scale) / 2.0,
                    (viewport_size.height - render.height * self.scale) / 2.0,
                );
            }
            ContentMode::Empty | ContentMode::Vector => {
                self.translate =
                    Vec2::new(-BOX_RESET_ANCHOR.0 * self.scale, -BOX_RESET_ANCHOR.1 * self.scale);
            }
        }
        debug!(
            scale = self.scale,
            tx = self.translate.x,
            ty = self.translate.y,
            mode = ?descriptor.mode,
            "viewport reset"
        );
    }
}
