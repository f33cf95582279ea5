use crate::constants::{POINTER_MIN_DT_MS, POINTER_SMOOTH_KEEP};
use glam::Vec2;

/// Cursor position plus instantaneous and smoothed speed (px/ms).
///
/// Mutated only from pointer-move handlers; every pointer-reactive component
/// reads it.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
    pub smooth_speed: f64,
    last_x: f64,
    last_y: f64,
    last_t: f64,
}

impl PointerTracker {
    /// Start centered in a `width x height` viewport at time `now_ms`.
    pub fn new(width: f64, height: f64, now_ms: f64) -> Self {
        let (cx, cy) = (width * 0.5, height * 0.5);
        Self {
            x: cx,
            y: cy,
            vx: 0.0,
            vy: 0.0,
            speed: 0.0,
            smooth_speed: 0.0,
            last_x: cx,
            last_y: cy,
            last_t: now_ms,
        }
    }

    pub fn on_move(&mut self, x: f64, y: f64, now_ms: f64) {
        let dt = (now_ms - self.last_t).max(POINTER_MIN_DT_MS);
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.x = x;
        self.y = y;
        self.vx = dx / dt;
        self.vy = dy / dt;
        self.speed = dx.hypot(dy) / dt;
        self.smooth_speed =
            self.smooth_speed * POINTER_SMOOTH_KEEP + self.speed * (1.0 - POINTER_SMOOTH_KEEP);
        self.last_x = x;
        self.last_y = y;
        self.last_t = now_ms;
    }

    /// Position as viewport fractions, clamped to `[0, 1]`.
    pub fn normalized(&self, width: f64, height: f64) -> Vec2 {
        normalize_point(self.x, self.y, width, height)
    }
}

#[inline]
pub fn normalize_point(x: f64, y: f64, width: f64, height: f64) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::splat(0.5);
    }
    Vec2::new(
        (x / width).clamp(0.0, 1.0) as f32,
        (y / height).clamp(0.0, 1.0) as f32,
    )
}
