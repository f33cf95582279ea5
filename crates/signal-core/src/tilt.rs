//! Card tilt: instant hover response plus a LERP'd magnetic pull.
//!
//! Each card mirrors its inline `transform`/`transition` style so the caller
//! can apply only what changed and tests can observe the rest-state cleanup.

use crate::constants::*;

pub const HOVER_TRANSITION: &str =
    "transform 60ms ease-out, box-shadow 0.25s ease, border-color 0.25s ease";
pub const LEAVE_TRANSITION: &str =
    "transform 0.35s ease-out, box-shadow 0.25s ease, border-color 0.25s ease";
pub const MAGNETIC_TRANSITION: &str = "box-shadow 0.25s ease, border-color 0.25s ease";

#[derive(Clone, Copy, Debug)]
pub struct TiltConfig {
    pub max_rotation_deg: f64,
    pub magnetic_range_px: f64,
    pub magnetic_rotation_deg: f64,
    pub lerp: f64,
    pub rest_epsilon_deg: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_rotation_deg: TILT_MAX_ROTATION_DEG,
            magnetic_range_px: TILT_MAGNETIC_RANGE_PX,
            magnetic_rotation_deg: TILT_MAGNETIC_ROTATION_DEG,
            lerp: TILT_MAGNETIC_LERP,
            rest_epsilon_deg: TILT_REST_EPSILON_DEG,
        }
    }
}

/// Center and half extents of a card in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardRect {
    pub cx: f64,
    pub cy: f64,
    pub hw: f64,
    pub hh: f64,
}

impl CardRect {
    pub fn from_bounds(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            cx: left + width / 2.0,
            cy: top + height / 2.0,
            hw: width / 2.0,
            hh: height / 2.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CardTiltState {
    pub rect: CardRect,
    pub current: (f64, f64),
    pub target: (f64, f64),
    pub hovering: bool,
    transform: String,
    transition: String,
}

impl CardTiltState {
    /// Inline transform as last written; empty means "no inline transform".
    pub fn transform(&self) -> &str {
        &self.transform
    }

    pub fn transition(&self) -> &str {
        &self.transition
    }
}

/// Style write requested for one card.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleUpdate {
    pub index: usize,
    pub transform: Option<String>,
    pub transition: Option<&'static str>,
}

#[derive(Clone, Debug, Default)]
pub struct CardTilt {
    cards: Vec<CardTiltState>,
    config: TiltConfig,
    pointer: (f64, f64),
}

pub fn tilt_transform(rx: f64, ry: f64) -> String {
    format!(
        "perspective({}px) rotateX({:.2}deg) rotateY({:.2}deg)",
        TILT_PERSPECTIVE_PX, rx, ry
    )
}

impl CardTilt {
    pub fn new(rects: &[CardRect], config: TiltConfig) -> Self {
        Self {
            cards: rects
                .iter()
                .map(|&rect| CardTiltState {
                    rect,
                    ..Default::default()
                })
                .collect(),
            config,
            pointer: (0.0, 0.0),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&CardTiltState> {
        self.cards.get(index)
    }

    /// Replace card geometry after layout changes (resize, scroll).
    pub fn refresh_rects(&mut self, rects: &[CardRect]) {
        for (card, &rect) in self.cards.iter_mut().zip(rects) {
            card.rect = rect;
        }
    }

    pub fn track_pointer(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    pub fn enter(&mut self, index: usize) -> Option<StyleUpdate> {
        let card = self.cards.get_mut(index)?;
        card.hovering = true;
        card.transition = HOVER_TRANSITION.to_string();
        Some(StyleUpdate {
            index,
            transform: None,
            transition: Some(HOVER_TRANSITION),
        })
    }

    /// Hover response: rotation follows the cursor offset directly.
    pub fn hover_move(&mut self, index: usize, x: f64, y: f64) -> Option<StyleUpdate> {
        let max = self.config.max_rotation_deg;
        let card = self.cards.get_mut(index)?;
        if card.rect.hw <= 0.0 || card.rect.hh <= 0.0 {
            return None;
        }
        let rel_x = (x - card.rect.cx) / card.rect.hw;
        let rel_y = (y - card.rect.cy) / card.rect.hh;
        card.target = (-rel_y * max, rel_x * max);
        card.current = card.target;
        card.transform = tilt_transform(card.current.0, card.current.1);
        Some(StyleUpdate {
            index,
            transform: Some(card.transform.clone()),
            transition: None,
        })
    }

    /// Zero everything at once and let the CSS transition animate the return.
    pub fn leave(&mut self, index: usize) -> Option<StyleUpdate> {
        let card = self.cards.get_mut(index)?;
        card.hovering = false;
        card.current = (0.0, 0.0);
        card.target = (0.0, 0.0);
        card.transform.clear();
        card.transition = LEAVE_TRANSITION.to_string();
        Some(StyleUpdate {
            index,
            transform: Some(String::new()),
            transition: Some(LEAVE_TRANSITION),
        })
    }

    /// Per-frame magnetic pull for cards that are not hovered.
    pub fn update(&mut self) -> Vec<StyleUpdate> {
        let cfg = self.config;
        let (px, py) = self.pointer;
        let mut out = Vec::new();
        for (index, card) in self.cards.iter_mut().enumerate() {
            if card.hovering {
                continue;
            }
            let dx = px - card.rect.cx;
            let dy = py - card.rect.cy;
            let dist = dx.hypot(dy);
            card.target = if dist < cfg.magnetic_range_px && dist > 0.0 {
                let strength = 1.0 - dist / cfg.magnetic_range_px;
                (
                    -(dy / dist) * cfg.magnetic_rotation_deg * strength,
                    (dx / dist) * cfg.magnetic_rotation_deg * strength,
                )
            } else {
                (0.0, 0.0)
            };
            card.current.0 += (card.target.0 - card.current.0) * cfg.lerp;
            card.current.1 += (card.target.1 - card.current.1) * cfg.lerp;

            let at_rest = card.current.0.abs() < cfg.rest_epsilon_deg
                && card.current.1.abs() < cfg.rest_epsilon_deg
                && card.target == (0.0, 0.0);
            if at_rest {
                card.current = (0.0, 0.0);
                if !card.transform.is_empty() {
                    card.transform.clear();
                    card.transition.clear();
                    out.push(StyleUpdate {
                        index,
                        transform: Some(String::new()),
                        transition: Some(""),
                    });
                }
                continue;
            }

            card.transform = tilt_transform(card.current.0, card.current.1);
            card.transition = MAGNETIC_TRANSITION.to_string();
            out.push(StyleUpdate {
                index,
                transform: Some(card.transform.clone()),
                transition: Some(MAGNETIC_TRANSITION),
            });
        }
        out
    }
}
