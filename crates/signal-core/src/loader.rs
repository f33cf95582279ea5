//! Signal-acquisition splash: scan, lock, reconstruct, dissolve.
//!
//! [`SignalLoader::frame`] paints one frame and reports what the DOM side has
//! to change (dial translation, HUD text, overlay opacity, page start).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas2d, Viewport};
use crate::error::ScheduleError;
use crate::sequencer::{Latch, Phase, PhaseSchedule};

pub const LOADER_BG: &str = "#0a0e1a";
pub const LOADER_RGB: [u8; 3] = [58, 134, 255];
pub const LOADER_REMOVE_DELAY_MS: u32 = 600;

pub const STATUS_TEXTS: [&str; 4] = [
    "SCANNING FM BAND...",
    "CARRIER DETECTED  fc = 95.12 MHz",
    "RECONSTRUCTING WEBPAGE...",
    "",
];

pub const METER_BARS: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct LoaderTiming {
    pub scan_ms: f64,
    pub lock_ms: f64,
    pub reconstruct_ms: f64,
    pub dissolve_ms: f64,
}

impl Default for LoaderTiming {
    fn default() -> Self {
        Self {
            scan_ms: 2200.0,
            lock_ms: 2500.0,
            reconstruct_ms: 1200.0,
            dissolve_ms: 800.0,
        }
    }
}

impl LoaderTiming {
    pub fn schedule(&self) -> Result<PhaseSchedule, ScheduleError> {
        PhaseSchedule::new(vec![
            Phase::new(self.scan_ms, "scan"),
            Phase::new(self.lock_ms, "lock"),
            Phase::new(self.reconstruct_ms, "reconstruct"),
            Phase::new(self.dissolve_ms, "dissolve"),
        ])
    }
}

/// FM tuning dial geometry in MHz and CSS pixels.
#[derive(Clone, Copy, Debug)]
pub struct FmDial {
    pub band_start: f64,
    pub band_end: f64,
    pub target: f64,
    pub tick_width: f64,
    pub tick_step: f64,
}

impl Default for FmDial {
    fn default() -> Self {
        Self {
            band_start: 87.5,
            band_end: 108.0,
            target: 95.12,
            tick_width: 36.0,
            tick_step: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DialTick {
    pub freq: f64,
    pub major: bool,
    pub target: bool,
    /// Whole-MHz caption on major ticks.
    pub label: Option<String>,
}

impl FmDial {
    pub fn scan_start(&self) -> f64 {
        self.target - 2.0
    }

    pub fn scan_end(&self) -> f64 {
        self.target - 0.6
    }

    pub fn ticks(&self) -> Vec<DialTick> {
        let mut out = Vec::new();
        let mut i = 0u32;
        loop {
            let freq = self.band_start + i as f64 * self.tick_step;
            if freq > self.band_end + 0.01 {
                break;
            }
            let major = (freq - freq.round()).abs() < 0.02;
            out.push(DialTick {
                freq,
                major,
                target: (freq - self.target).abs() < 0.06,
                label: major.then(|| format!("{:.1}", freq.round())),
            });
            i += 1;
        }
        out
    }

    /// Tuned frequency: linear scan, cubic ease into the target, then hold.
    pub fn frequency(&self, phase: usize, progress: f64) -> f64 {
        match phase {
            0 => self.scan_start() + (self.scan_end() - self.scan_start()) * progress,
            1 => {
                let ease = 1.0 - (1.0 - progress).powi(3);
                self.scan_end() + (self.target - self.scan_end()) * ease
            }
            _ => self.target,
        }
    }

    pub fn strip_offset(&self, freq: f64, dial_width: f64) -> f64 {
        dial_width / 2.0 - (freq - self.band_start) / self.tick_step * self.tick_width
    }

    pub fn is_locked(phase: usize, progress: f64) -> bool {
        phase >= 1 && progress > 0.75
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudUpdate {
    /// `None` keeps the current text (the dissolve phase has none).
    pub status: Option<&'static str>,
    pub meter_lit: [bool; METER_BARS],
}

impl HudUpdate {
    pub fn for_phase(phase: usize) -> Self {
        let mut meter_lit = [false; METER_BARS];
        for (i, lit) in meter_lit.iter_mut().enumerate() {
            *lit = i <= phase;
        }
        Self {
            status: STATUS_TEXTS.get(phase).copied().filter(|s| !s.is_empty()),
            meter_lit,
        }
    }
}

/// DOM changes requested by one loader frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoaderFrame {
    pub strip_translate_px: Option<f64>,
    pub locked: bool,
    pub hud: Option<HudUpdate>,
    pub overlay_opacity: Option<f64>,
    /// True on the single frame (or skip) that starts the page underneath.
    pub init_portfolio: bool,
    /// True on the single frame (or skip) that ends the loader.
    pub finished: bool,
}

pub struct SignalLoader {
    schedule: PhaseSchedule,
    dial: FmDial,
    start_ms: f64,
    viewport: Viewport,
    rng: StdRng,
    last_phase: Option<usize>,
    portfolio: Latch,
    done: Latch,
}

impl SignalLoader {
    pub fn new(timing: LoaderTiming, dial: FmDial, start_ms: f64, seed: u64) -> Result<Self, ScheduleError> {
        let mut done = Latch::new();
        done.activate();
        Ok(Self {
            schedule: timing.schedule()?,
            dial,
            start_ms,
            viewport: Viewport::default(),
            rng: StdRng::seed_from_u64(seed),
            last_phase: None,
            portfolio: Latch::new(),
            done,
        })
    }

    pub fn dial(&self) -> &FmDial {
        &self.dial
    }

    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    pub fn is_finished(&self) -> bool {
        self.done.is_finished()
    }

    pub fn portfolio_started(&self) -> bool {
        self.portfolio.is_finished()
    }

    pub fn resize<C: Canvas2d>(&mut self, ctx: &mut C, viewport: Viewport) {
        self.viewport = viewport;
        crate::canvas::resize_surface(ctx, viewport);
    }

    pub fn frame<C: Canvas2d>(&mut self, ctx: &mut C, time_ms: f64, dial_width: f64) -> LoaderFrame {
        let mut out = LoaderFrame::default();
        if self.done.is_finished() {
            return out;
        }
        let pos = self.schedule.locate(time_ms - self.start_ms);
        if pos.complete {
            return self.finish();
        }
        let (phase, p) = (pos.index, pos.progress);
        let (w, h) = (self.viewport.width, self.viewport.height);

        ctx.set_fill_style(LOADER_BG);
        ctx.fill_rect(0.0, 0.0, w, h);

        match phase {
            0 => {
                self.draw_noise(ctx, 1.0 - p * 0.25);
                draw_baseline(ctx, w, h, p * 0.4);
                draw_grid(ctx, w, h, p * 0.25);
                if p > 0.6 {
                    let hint = (p - 0.6) / 0.4;
                    let eased = hint * hint;
                    self.draw_carrier(ctx, time_ms, eased * 0.25, eased * 0.12);
                }
            }
            1 => {
                self.draw_noise(ctx, (0.4 - p * 0.8).max(0.0));
                draw_grid(ctx, w, h, 0.25 + p * 0.75);
                draw_baseline(ctx, w, h, 1.0);
                self.draw_carrier(ctx, time_ms, 0.25 + p * 0.75, 0.12 + p * 0.48);
            }
            2 => {
                draw_grid(ctx, w, h, 1.0);
                self.draw_carrier(ctx, time_ms, 1.0, 0.6);
                out.init_portfolio = self.start_portfolio();
            }
            _ => {
                draw_grid(ctx, w, h, 1.0);
                self.draw_carrier(ctx, time_ms, 1.0, 0.6);
                out.overlay_opacity = Some(1.0 - p);
            }
        }

        if phase <= 2 {
            let freq = self.dial.frequency(phase, p);
            out.strip_translate_px = Some(self.dial.strip_offset(freq, dial_width));
            out.locked = FmDial::is_locked(phase, p);
        }
        if self.last_phase != Some(phase) {
            self.last_phase = Some(phase);
            out.hud = Some(HudUpdate::for_phase(phase));
        }
        out
    }

    /// Click or key during the splash. No-op once finished.
    pub fn skip(&mut self) -> LoaderFrame {
        self.finish()
    }

    fn finish(&mut self) -> LoaderFrame {
        if !self.done.finish() {
            return LoaderFrame::default();
        }
        log::info!("[loader] finished");
        LoaderFrame {
            overlay_opacity: Some(0.0),
            init_portfolio: self.start_portfolio(),
            finished: true,
            ..Default::default()
        }
    }

    fn start_portfolio(&mut self) -> bool {
        let fired = self.portfolio.finish();
        if fired {
            log::info!("[loader] starting portfolio");
        }
        fired
    }

    fn draw_noise<C: Canvas2d>(&mut self, ctx: &mut C, intensity: f64) {
        let count = (300.0 * intensity).floor() as usize;
        let (w, h) = (self.viewport.width, self.viewport.height);
        for _ in 0..count {
            let x = self.rng.gen::<f64>() * w;
            let y = self.rng.gen::<f64>() * h;
            let b = 0.15 + self.rng.gen::<f64>() * 0.25;
            let s = 1.0 + self.rng.gen::<f64>() * 1.5;
            ctx.set_fill_style(&loader_rgba(b * intensity));
            ctx.fill_rect(x, y, s, s);
        }
    }

    fn draw_carrier<C: Canvas2d>(&mut self, ctx: &mut C, time_ms: f64, cleanness: f64, amp_scale: f64) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        if w <= 0.0 {
            return;
        }
        let cy = h / 2.0;
        let amp = h * 0.22 * amp_scale;
        let t_off = time_ms * 0.002;
        let jitter = carrier_jitter(cleanness, h);
        let rng = &mut self.rng;
        crate::canvas::sample_path(ctx, 0.0, w, 2.0, |x| {
            let base = (x / w * std::f64::consts::TAU * 2.67 + t_off).sin();
            let noise = if jitter > 0.0 {
                jitter * (rng.gen::<f64>() - 0.5) * 2.0
            } else {
                0.0
            };
            cy + amp * base + noise
        });
        ctx.set_stroke_style(&loader_rgba(0.5 + cleanness * 0.4));
        ctx.set_line_width(1.5 + cleanness * 0.5);
        ctx.set_shadow(cleanness * 8.0, &loader_rgba(0.4));
        ctx.stroke();
        ctx.set_shadow(0.0, "transparent");
    }
}

/// Carrier jitter amplitude; falls off with the cube of uncleanness.
pub fn carrier_jitter(cleanness: f64, height: f64) -> f64 {
    (1.0 - cleanness.clamp(0.0, 1.0)).powi(3) * height * 0.06
}

fn loader_rgba(alpha: f64) -> String {
    let [r, g, b] = LOADER_RGB;
    format!("rgba({r},{g},{b},{alpha})")
}

fn draw_baseline<C: Canvas2d>(ctx: &mut C, w: f64, h: f64, alpha: f64) {
    let cy = h / 2.0;
    ctx.begin_path();
    ctx.move_to(0.0, cy);
    ctx.line_to(w, cy);
    ctx.set_stroke_style(&loader_rgba(alpha * 0.15));
    ctx.set_line_width(1.0);
    ctx.stroke();
}

fn draw_grid<C: Canvas2d>(ctx: &mut C, w: f64, h: f64, alpha: f64) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    ctx.set_stroke_style(&loader_rgba(alpha * 0.06));
    ctx.set_line_width(1.0);
    let (gx, gy) = (w / 10.0, h / 6.0);
    let mut x = gx;
    while x < w {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        ctx.stroke();
        x += gx;
    }
    let mut y = gy;
    while y < h {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.stroke();
        y += gy;
    }
}
