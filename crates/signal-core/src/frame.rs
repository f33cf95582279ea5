//! Per-frame stage ordering and resize coalescing.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameStage {
    ClearOverlay,
    Ripples,
    Pulses,
    NavWaves,
    HeroCarrier,
    HeroSurface,
    Dividers,
    Skills,
    CardTilt,
}

/// Painter's order for the shared overlay; 3D stages own their surfaces.
pub const FRAME_ORDER: [FrameStage; 9] = [
    FrameStage::ClearOverlay,
    FrameStage::Ripples,
    FrameStage::Pulses,
    FrameStage::NavWaves,
    FrameStage::HeroCarrier,
    FrameStage::HeroSurface,
    FrameStage::Dividers,
    FrameStage::Skills,
    FrameStage::CardTilt,
];

/// One method per stage; implementors skip stages they have nothing for.
pub trait FrameStages {
    fn clear_overlay(&mut self, time_ms: f64);
    fn draw_ripples(&mut self, time_ms: f64);
    fn draw_pulses(&mut self, time_ms: f64);
    fn update_nav_waves(&mut self, time_ms: f64);
    fn draw_hero_carrier(&mut self, time_ms: f64);
    /// Only called while [`FrameStages::hero_surface_active`] is true.
    fn render_hero_surface(&mut self, time_ms: f64);
    fn draw_dividers(&mut self, time_ms: f64);
    fn render_skills(&mut self, time_ms: f64);
    fn update_card_tilt(&mut self, time_ms: f64);

    fn hero_surface_active(&self) -> bool {
        true
    }
}

pub fn run_stage<S: FrameStages + ?Sized>(stages: &mut S, stage: FrameStage, time_ms: f64) {
    match stage {
        FrameStage::ClearOverlay => stages.clear_overlay(time_ms),
        FrameStage::Ripples => stages.draw_ripples(time_ms),
        FrameStage::Pulses => stages.draw_pulses(time_ms),
        FrameStage::NavWaves => stages.update_nav_waves(time_ms),
        FrameStage::HeroCarrier => stages.draw_hero_carrier(time_ms),
        FrameStage::HeroSurface => {
            if stages.hero_surface_active() {
                stages.render_hero_surface(time_ms)
            }
        }
        FrameStage::Dividers => stages.draw_dividers(time_ms),
        FrameStage::Skills => stages.render_skills(time_ms),
        FrameStage::CardTilt => stages.update_card_tilt(time_ms),
    }
}

pub fn run_frame<S: FrameStages + ?Sized>(stages: &mut S, time_ms: f64) {
    for stage in FRAME_ORDER {
        run_stage(stages, stage, time_ms);
    }
}

/// Coalesces bursts of triggers into one firing `delay_ms` after the last.
#[derive(Clone, Copy, Debug)]
pub struct Debounce {
    delay_ms: f64,
    last_trigger: Option<f64>,
}

impl Debounce {
    pub const fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            last_trigger: None,
        }
    }

    pub fn trigger(&mut self, now_ms: f64) {
        self.last_trigger = Some(now_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.last_trigger.is_some()
    }

    /// True once per burst, when the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.last_trigger {
            Some(t) if now_ms - t >= self.delay_ms => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }
}
