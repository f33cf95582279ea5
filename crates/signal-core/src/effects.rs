//! Bounded pools of short-lived visual entities.
//!
//! [`RipplePool`] follows the cursor with a speed-adaptive rate limiter;
//! [`PulsePool`] holds the rings emitted when a section arrives. Both evict
//! oldest-first once full and drop entities whose age reaches their lifetime.

use crate::canvas::{Canvas2d, Composite};
use crate::constants::*;
use crate::palette::Palette;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::f64::consts::TAU;

pub trait Timed {
    fn born(&self) -> f64;
    fn life(&self) -> f64;

    #[inline]
    fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.born() >= self.life()
    }
}

/// FIFO pool with a hard capacity.
#[derive(Clone, Debug)]
pub struct BoundedPool<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Timed> BoundedPool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity: capacity.max(1),
        }
    }

    /// Push and evict from the front while over capacity; returns evicted count.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push_back(item);
        let mut evicted = 0;
        while self.items.len() > self.capacity {
            self.items.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn expire(&mut self, now_ms: f64) {
        self.items.retain(|it| !it.expired(now_ms));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }

    fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

/// Pointer speed bucket; everything a ripple looks like derives from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntensityTier {
    Slow,
    Medium,
    Fast,
}

impl IntensityTier {
    pub fn from_speed(speed: f64) -> Self {
        if speed > SPEED_FAST {
            IntensityTier::Fast
        } else if speed > SPEED_MEDIUM {
            IntensityTier::Medium
        } else {
            IntensityTier::Slow
        }
    }

    pub fn spawn_interval_ms(self) -> f64 {
        match self {
            IntensityTier::Fast => 130.0,
            IntensityTier::Medium => 240.0,
            IntensityTier::Slow => 480.0,
        }
    }

    pub fn rings(self) -> u8 {
        match self {
            IntensityTier::Fast => 3,
            IntensityTier::Medium => 2,
            IntensityTier::Slow => 1,
        }
    }

    pub fn max_radius(self) -> f64 {
        match self {
            IntensityTier::Fast => 200.0,
            IntensityTier::Medium => 130.0,
            IntensityTier::Slow => 72.0,
        }
    }

    pub fn alpha_scale(self) -> f64 {
        match self {
            IntensityTier::Fast => 0.48,
            IntensityTier::Medium => 0.32,
            IntensityTier::Slow => 0.18,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ripple {
    pub x: f64,
    pub y: f64,
    pub born: f64,
    pub life: f64,
    pub rings: u8,
    pub max_radius: f64,
    pub alpha_scale: f64,
    hit: SmallVec<[usize; 8]>,
}

impl Timed for Ripple {
    fn born(&self) -> f64 {
        self.born
    }
    fn life(&self) -> f64 {
        self.life
    }
}

impl Ripple {
    /// Element indices this ripple has already flashed.
    pub fn hits(&self) -> &[usize] {
        &self.hit
    }
}

/// Center of an element that ripples can "hit" (viewport coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTarget {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct RippleConfig {
    pub capacity: usize,
    pub life_ms: f64,
    pub min_move_px: f64,
    pub ring_stagger: f64,
    pub fade_in: f64,
    pub hit_tolerance_px: f64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            capacity: RIPPLE_MAX,
            life_ms: RIPPLE_LIFE_MS,
            min_move_px: RIPPLE_MIN_MOVE_PX,
            ring_stagger: RIPPLE_RING_STAGGER,
            fade_in: RIPPLE_FADE_IN,
            hit_tolerance_px: RIPPLE_HIT_TOLERANCE_PX,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RipplePool {
    pool: BoundedPool<Ripple>,
    config: RippleConfig,
    last_spawn: Option<f64>,
    last_x: f64,
    last_y: f64,
}

impl Default for RipplePool {
    fn default() -> Self {
        Self::new(RippleConfig::default())
    }
}

impl RipplePool {
    pub fn new(config: RippleConfig) -> Self {
        Self {
            pool: BoundedPool::new(config.capacity),
            config,
            last_spawn: None,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.pool.iter()
    }

    /// Try to spawn at `(x, y)`; `speed` is the pointer speed in px/ms.
    pub fn spawn(&mut self, x: f64, y: f64, speed: f64, now_ms: f64) -> bool {
        let tier = IntensityTier::from_speed(speed);
        if let Some(last) = self.last_spawn {
            if now_ms - last < tier.spawn_interval_ms() {
                return false;
            }
        }
        let moved = (x - self.last_x).hypot(y - self.last_y);
        if moved < self.config.min_move_px && !self.pool.is_empty() {
            return false;
        }
        self.last_spawn = Some(now_ms);
        self.last_x = x;
        self.last_y = y;
        self.pool.push(Ripple {
            x,
            y,
            born: now_ms,
            life: self.config.life_ms,
            rings: tier.rings(),
            max_radius: tier.max_radius(),
            alpha_scale: tier.alpha_scale(),
            hit: SmallVec::new(),
        });
        true
    }

    pub fn expire(&mut self, now_ms: f64) {
        self.pool.expire(now_ms);
    }

    /// Draw every live ripple and return the indices of targets newly hit
    /// by a leading ring this frame.
    pub fn draw<C: Canvas2d>(
        &mut self,
        ctx: &mut C,
        now_ms: f64,
        palette: &Palette,
        targets: &[HitTarget],
    ) -> Vec<usize> {
        self.pool.expire(now_ms);
        let mut newly_hit = Vec::new();
        if self.pool.is_empty() {
            return newly_hit;
        }
        let cfg = self.config;
        ctx.save();
        for ripple in self.pool.iter_mut().rev() {
            let progress = (now_ms - ripple.born) / ripple.life;
            let eased = ease_out_quad(progress);
            let envelope = fade_envelope(progress, cfg.fade_in);
            for ring in 0..ripple.rings {
                let rf = ring as f64;
                let ring_progress = (eased - rf * cfg.ring_stagger).max(0.0);
                if ring_progress <= 0.0 {
                    continue;
                }
                let radius = ring_progress * ripple.max_radius;
                let alpha = envelope * ripple.alpha_scale * (1.0 - rf * 0.22);
                if alpha <= 0.0 {
                    continue;
                }
                ctx.begin_path();
                ctx.arc(ripple.x, ripple.y, radius, 0.0, TAU);
                ctx.set_stroke_style(&palette.carrier_rgba(alpha));
                ctx.set_line_width(1.3 - rf * 0.3);
                ctx.set_shadow(7.0 - rf * 2.0, &palette.glow_carrier);
                ctx.stroke();

                if ring == 0 {
                    for (j, t) in targets.iter().enumerate() {
                        let dist = (t.x - ripple.x).hypot(t.y - ripple.y);
                        if (dist - radius).abs() < cfg.hit_tolerance_px && !ripple.hit.contains(&j)
                        {
                            ripple.hit.push(j);
                            newly_hit.push(j);
                        }
                    }
                }
            }
        }
        ctx.set_shadow(0.0, "transparent");
        ctx.restore();
        newly_hit
    }
}

/// `1 - (1 - p)^2`
#[inline]
pub fn ease_out_quad(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}

/// Linear ramp up until `fade_in`, linear ramp down afterwards.
#[inline]
pub fn fade_envelope(progress: f64, fade_in: f64) -> f64 {
    if progress < fade_in {
        progress / fade_in
    } else {
        1.0 - (progress - fade_in) / (1.0 - fade_in)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SectionPulse {
    pub x: f64,
    /// Document-space y, so pulses scroll with the page.
    pub y_doc: f64,
    pub born: f64,
    pub life: f64,
}

impl Timed for SectionPulse {
    fn born(&self) -> f64 {
        self.born
    }
    fn life(&self) -> f64 {
        self.life
    }
}

#[derive(Clone, Debug)]
pub struct PulsePool {
    pool: BoundedPool<SectionPulse>,
    life_ms: f64,
}

impl Default for PulsePool {
    fn default() -> Self {
        Self::new(PULSE_MAX, PULSE_LIFE_MS)
    }
}

impl PulsePool {
    pub fn new(capacity: usize, life_ms: f64) -> Self {
        Self {
            pool: BoundedPool::new(capacity),
            life_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Spawn below the top-center of a section rect given in viewport space.
    pub fn spawn_for_section(
        &mut self,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        scroll_y: f64,
        now_ms: f64,
    ) {
        self.pool.push(SectionPulse {
            x: rect_left + rect_width * 0.5,
            y_doc: scroll_y + rect_top + PULSE_Y_OFFSET_PX,
            born: now_ms,
            life: self.life_ms,
        });
    }

    pub fn draw<C: Canvas2d>(
        &mut self,
        ctx: &mut C,
        now_ms: f64,
        scroll_y: f64,
        viewport_h: f64,
        palette: &Palette,
        scope: bool,
    ) {
        self.pool.expire(now_ms);
        ctx.save();
        ctx.set_composite(Composite::Lighter);
        let boost = if scope { SCOPE_PULSE_BOOST } else { 1.0 };
        for pulse in self.pool.iter().rev() {
            let n = (now_ms - pulse.born) / pulse.life;
            let y = pulse.y_doc - scroll_y;
            if y < -PULSE_CULL_MARGIN_PX || y > viewport_h + PULSE_CULL_MARGIN_PX {
                continue;
            }
            for ring in 0..PULSE_RINGS {
                let rf = ring as f64;
                let ring_n = (n - rf * PULSE_RING_STAGGER).max(0.0);
                if ring_n <= 0.0 || ring_n >= 1.0 {
                    continue;
                }
                let r = 24.0 + ring_n * 140.0;
                let alpha = (1.0 - ring_n) * (0.26 - rf * 0.04) * boost;
                let carrier_ring = ring % 2 == 0;
                ctx.begin_path();
                ctx.arc(pulse.x, y, r, 0.0, TAU);
                if carrier_ring {
                    ctx.set_stroke_style(&palette.carrier_rgba(alpha));
                    ctx.set_shadow(8.0, &palette.glow_carrier);
                } else {
                    ctx.set_stroke_style(&palette.modulation_rgba(alpha * 0.9));
                    ctx.set_shadow(8.0, &palette.glow_mod);
                }
                ctx.set_line_width(1.4 - rf * 0.2);
                ctx.stroke();
            }
        }
        ctx.restore();
    }
}
