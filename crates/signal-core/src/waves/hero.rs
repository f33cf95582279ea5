//! Hero oscilloscope: message, carrier, AM and FM rows swept by a cursor.
//!
//! On every sweep wrap the finished frame is copied into a fade-out surface
//! and the whole previous sweep is redrawn (without text) into a ghost
//! surface, so the next sweep draws over a dimmed copy of the last one.

use std::f64::consts::TAU;

use crate::canvas::{resize_surface, sample_path, Canvas2d, Composite, Renderer, Viewport};
use crate::palette::{hex_to_rgba, Palette};

const LABEL_FONT: &str = "11px Chakra Petch, sans-serif";
const READOUT_FONT: &str = "13px monospace";
const TEXT_FILL: &str = "rgba(180, 210, 255, 0.7)";
const CURSOR_STROKE: &str = "rgba(140, 190, 255, 0.72)";
const CURSOR_GLOW: &str = "rgba(140, 190, 255, 0.45)";
/// Shortest sweep accepted from a config, in seconds.
pub const MIN_SWEEP_S: f64 = 0.1;

#[derive(Clone, Copy, Debug)]
pub struct HeroCarrierConfig {
    pub sweep_s: f64,
    pub fm_hz: f64,
    pub fc_hz: f64,
    pub mu: f64,
    pub beta: f64,
    pub ghost_alpha: f64,
    pub fadeout_ms: f64,
}

impl Default for HeroCarrierConfig {
    fn default() -> Self {
        Self {
            sweep_s: 15.0,
            fm_hz: 0.2,
            fc_hz: 4.0 / 1.5,
            mu: 0.7,
            beta: 5.0,
            ghost_alpha: 0.3,
            fadeout_ms: 1800.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowKind {
    Message,
    Carrier,
    Am,
    Fm,
}

struct Row {
    kind: RowKind,
    label: &'static str,
    y: f64,
    modulation_color: bool,
    alpha: f64,
    width: f64,
    amp: f64,
}

fn rows(height: f64) -> [Row; 4] {
    let band = height * 0.2;
    let row_h = height / 5.0;
    let row = |kind, label, k: f64, modulation_color, alpha, width, amp| Row {
        kind,
        label,
        y: row_h * k,
        modulation_color,
        alpha,
        width,
        amp,
    };
    [
        row(RowKind::Message, "m(t)", 1.0, true, 0.45, 2.5, band * 0.3),
        row(RowKind::Carrier, "c(t)", 2.0, false, 0.5, 1.5, band * 0.4),
        row(RowKind::Am, "AM", 3.0, false, 0.5, 2.5, band * 0.4),
        row(RowKind::Fm, "FM", 4.0, true, 0.5, 2.5, band * 0.4),
    ]
}

/// Fade-out alpha `elapsed_ms` into the crossfade; settles at half the ghost alpha.
pub fn fadeout_alpha(elapsed_ms: f64, duration_ms: f64, ghost_alpha: f64) -> (f64, bool) {
    let t = if duration_ms > 0.0 {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let eased = 1.0 - (1.0 - t) * (1.0 - t);
    (1.0 - eased * (1.0 - ghost_alpha * 0.5), t >= 1.0)
}

pub struct HeroCarrier<C> {
    main: C,
    previous: C,
    fadeout: C,
    viewport: Viewport,
    config: HeroCarrierConfig,
    carrier: String,
    modulation: String,
    scope: bool,
    last_progress: f64,
    fadeout_start: Option<f64>,
}

impl<C: Canvas2d> HeroCarrier<C> {
    /// `previous` and `fadeout` are offscreen surfaces of the same kind as `main`.
    /// A `sweep_s` below [`MIN_SWEEP_S`] (or NaN) is raised to it.
    pub fn new(
        main: C,
        previous: C,
        fadeout: C,
        mut config: HeroCarrierConfig,
        palette: &Palette,
    ) -> Self {
        config.sweep_s = config.sweep_s.max(MIN_SWEEP_S);
        Self {
            main,
            previous,
            fadeout,
            viewport: Viewport::default(),
            config,
            carrier: palette.carrier.clone(),
            modulation: palette.modulation.clone(),
            scope: false,
            last_progress: 0.0,
            fadeout_start: None,
        }
    }

    pub fn set_scope(&mut self, scope: bool) {
        self.scope = scope;
    }

    pub fn main(&self) -> &C {
        &self.main
    }

    pub fn is_fading(&self) -> bool {
        self.fadeout_start.is_some()
    }

    pub fn sweep_progress(&self, time_ms: f64) -> f64 {
        let secs = time_ms * 0.001;
        secs.rem_euclid(self.config.sweep_s) / self.config.sweep_s
    }

    fn draw_grid(ctx: &mut C, viewport: Viewport, carrier: &str, scope: bool) {
        let (w, h) = (viewport.width, viewport.height);
        ctx.save();
        ctx.set_stroke_style(&hex_to_rgba(carrier, if scope { 0.2 } else { 0.12 }));
        ctx.set_line_width(1.0);
        for i in 0..=10 {
            let gx = w * i as f64 / 10.0;
            ctx.begin_path();
            ctx.move_to(gx, 0.0);
            ctx.line_to(gx, h);
            ctx.stroke();
        }
        for i in 0..=8 {
            let gy = h * i as f64 / 8.0;
            ctx.begin_path();
            ctx.move_to(0.0, gy);
            ctx.line_to(w, gy);
            ctx.stroke();
        }
        ctx.restore();
    }

    fn draw_waveforms(
        ctx: &mut C,
        viewport: Viewport,
        cfg: &HeroCarrierConfig,
        colors: (&str, &str),
        limit_x: f64,
        show_text: bool,
    ) {
        let (w, h) = (viewport.width, viewport.height);
        let (carrier, modulation) = colors;
        let tau_at = |x: f64| x / w * cfg.sweep_s;
        let message = |tau: f64| (TAU * cfg.fm_hz * tau).sin();

        ctx.save();
        ctx.set_composite(Composite::SourceOver);
        ctx.set_font(LABEL_FONT);
        ctx.set_text_baseline_middle();
        ctx.set_shadow(0.0, "transparent");

        let rows = rows(h);
        for row in &rows {
            sample_path(ctx, 0.0, limit_x, 2.0, |x| {
                let tau = tau_at(x);
                let m = message(tau);
                let c = (TAU * cfg.fc_hz * tau).sin();
                let sample = match row.kind {
                    RowKind::Message => m,
                    RowKind::Carrier => c,
                    RowKind::Am => (1.0 + cfg.mu * m) * c * 0.5,
                    RowKind::Fm => (TAU * cfg.fc_hz * tau + cfg.beta * m).sin(),
                };
                row.y + row.amp * sample
            });
            let color = if row.modulation_color { modulation } else { carrier };
            ctx.set_stroke_style(&hex_to_rgba(color, row.alpha));
            ctx.set_line_width(row.width);
            ctx.stroke();

            if row.kind == RowKind::Am {
                ctx.set_stroke_style(&hex_to_rgba(modulation, 0.3));
                ctx.set_line_width(1.1);
                for sign in [-1.0, 1.0] {
                    sample_path(ctx, 0.0, limit_x, 3.0, |x| {
                        let env = row.amp * (1.0 + cfg.mu * message(tau_at(x))) * 0.5;
                        row.y + sign * env
                    });
                    ctx.stroke();
                }
            }

            if show_text {
                ctx.set_fill_style(TEXT_FILL);
                ctx.fill_text(row.label, 8.0, row.y - row.amp - 6.0);
            }
        }

        if show_text {
            ctx.save();
            ctx.set_font(READOUT_FONT);
            ctx.set_text_baseline_middle();
            ctx.set_fill_style(TEXT_FILL);
            ctx.fill_text(&format!("mu = {:.2}", cfg.mu), w - 140.0, rows[2].y - 12.0);
            ctx.fill_text(&format!("beta = {:.2}", cfg.beta), w - 140.0, rows[3].y - 12.0);
            ctx.restore();
        }
        ctx.restore();
    }
}

impl<C: Canvas2d> Renderer for HeroCarrier<C> {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        resize_surface(&mut self.main, viewport);
        resize_surface(&mut self.previous, viewport);
        resize_surface(&mut self.fadeout, viewport);
    }

    fn render(&mut self, time_ms: f64) {
        let vp = self.viewport;
        if vp.is_empty() {
            return;
        }
        let (w, h) = (vp.width, vp.height);
        let cfg = self.config;
        let progress = self.sweep_progress(time_ms);
        let sweep_x = progress * w;
        let wrapped = progress < self.last_progress;
        self.last_progress = progress;

        if wrapped {
            self.fadeout.clear_rect(0.0, 0.0, w, h);
            self.fadeout.draw_surface(&self.main, 0.0, 0.0, w, h);
            self.fadeout_start = Some(time_ms);

            self.previous.clear_rect(0.0, 0.0, w, h);
            Self::draw_grid(&mut self.previous, vp, &self.carrier, self.scope);
            Self::draw_waveforms(
                &mut self.previous,
                vp,
                &cfg,
                (&self.carrier, &self.modulation),
                w,
                false,
            );
        }

        self.main.clear_rect(0.0, 0.0, w, h);
        match self.fadeout_start {
            Some(start) => {
                let (alpha, done) = fadeout_alpha(time_ms - start, cfg.fadeout_ms, cfg.ghost_alpha);
                self.main.save();
                self.main.set_global_alpha(alpha);
                self.main.draw_surface(&self.fadeout, 0.0, 0.0, w, h);
                self.main.restore();
                if done {
                    self.fadeout_start = None;
                }
            }
            None => {
                self.main.save();
                self.main.set_global_alpha(cfg.ghost_alpha);
                self.main.draw_surface(&self.previous, 0.0, 0.0, w, h);
                self.main.restore();
            }
        }

        Self::draw_grid(&mut self.main, vp, &self.carrier, self.scope);
        Self::draw_waveforms(
            &mut self.main,
            vp,
            &cfg,
            (&self.carrier, &self.modulation),
            sweep_x,
            true,
        );

        let ctx = &mut self.main;
        ctx.begin_path();
        ctx.move_to(sweep_x, 0.0);
        ctx.line_to(sweep_x, h);
        ctx.set_stroke_style(CURSOR_STROKE);
        ctx.set_line_width(1.2);
        ctx.set_shadow(6.0, CURSOR_GLOW);
        ctx.stroke();
        ctx.set_shadow(0.0, "transparent");
    }

    fn update_palette(&mut self, palette: &Palette) {
        self.carrier = palette.carrier.clone();
        self.modulation = palette.modulation.clone();
    }
}
