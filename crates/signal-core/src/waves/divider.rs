use std::f64::consts::{PI, TAU};

use crate::canvas::{resize_surface, sample_path, Canvas2d, Renderer, TextAlign, Viewport};
use crate::constants::{DIVIDER_CULL_MARGIN_PX, DIVIDER_DEFAULT_STRENGTH};
use crate::palette::{hex_to_rgba, Palette};

use super::{bit_level, clock_level};

const DIVIDER_FONT: &str = "9px \"Share Tech Mono\", monospace";
const ANTENNA_FONT: &str = "10px \"Share Tech Mono\", monospace";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DividerMode {
    #[default]
    Am,
    Digital,
    TxRx,
}

impl DividerMode {
    /// Parse a `data-mode` attribute. Unknown or missing values draw AM.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("digital") => DividerMode::Digital,
            Some("txrx") => DividerMode::TxRx,
            _ => DividerMode::Am,
        }
    }
}

/// Parse a `data-strength` attribute; zero, missing and garbage fall back.
pub fn parse_strength(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s != 0.0)
        .unwrap_or(DIVIDER_DEFAULT_STRENGTH)
}

/// Where the divider sits relative to the viewport this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DividerLayout {
    pub top: f64,
    pub bottom: f64,
    pub viewport_height: f64,
}

impl DividerLayout {
    pub fn is_visible(&self) -> bool {
        !(self.bottom < -DIVIDER_CULL_MARGIN_PX
            || self.top > self.viewport_height + DIVIDER_CULL_MARGIN_PX)
    }

    /// 0 when the divider enters at the bottom edge, 1 once it has left the top.
    pub fn scroll_progress(&self) -> Option<f64> {
        let height = self.bottom - self.top;
        let range = self.viewport_height + height;
        (range > 0.0).then(|| ((self.viewport_height - self.top) / range).clamp(0.0, 1.0))
    }
}

pub struct Divider<C> {
    canvas: C,
    mode: DividerMode,
    strength: f64,
    viewport: Viewport,
    layout: DividerLayout,
    scroll_progress: f64,
    carrier: String,
    modulation: String,
}

impl<C: Canvas2d> Divider<C> {
    pub fn new(canvas: C, mode: DividerMode, strength: f64, palette: &Palette) -> Self {
        Self {
            canvas,
            mode,
            strength,
            viewport: Viewport::default(),
            layout: DividerLayout::default(),
            scroll_progress: 0.0,
            carrier: palette.carrier.clone(),
            modulation: palette.modulation.clone(),
        }
    }

    pub fn mode(&self) -> DividerMode {
        self.mode
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    pub fn set_layout(&mut self, layout: DividerLayout) {
        self.layout = layout;
        if let Some(p) = layout.scroll_progress() {
            self.scroll_progress = p;
        }
    }

    fn draw_am(&mut self, t: f64) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let mid = h / 2.0;
        let s = self.strength;
        let env_freq = 0.008 + s * 0.008;
        let env_amp = 8.0 + s * 18.0;
        let carrier_freq = 0.06 + s * 0.08;
        let envelope = |x: f64| 8.0 + env_amp * (0.5 + 0.5 * (x * env_freq + t * 0.8).sin());

        let ctx = &mut self.canvas;
        let env_style = hex_to_rgba(&self.modulation, 0.3);
        for sign in [-1.0, 1.0] {
            sample_path(ctx, 0.0, w, 3.0, |x| mid + sign * envelope(x));
            ctx.set_stroke_style(&env_style);
            ctx.set_line_width(1.1);
            ctx.stroke();
        }

        sample_path(ctx, 0.0, w, 2.0, |x| {
            let am = 1.0 + 0.58 * (x * env_freq + t * 0.8).sin();
            mid + am * envelope(x) * 0.82 * (x * carrier_freq + t * (1.2 + s * 0.8)).sin()
        });
        ctx.set_stroke_style(&hex_to_rgba(&self.carrier, 0.65));
        ctx.set_line_width(1.4);
        ctx.set_shadow(5.0, &hex_to_rgba(&self.carrier, 0.3));
        ctx.stroke();
        ctx.set_shadow(0.0, "transparent");
    }

    fn draw_digital(&mut self, t: f64) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let mid = h / 2.0;
        let amplitude = h * 0.28;
        let bit_width = 40.0 + self.strength * 20.0;
        let phase = t * 30.0;
        let ctx = &mut self.canvas;

        ctx.set_stroke_style(&hex_to_rgba(&self.carrier, 0.06));
        ctx.set_line_width(1.0);
        let mut gx = 0.0;
        while gx < w {
            let grid_x = ((gx - phase % bit_width) + w * 2.0) % w;
            ctx.begin_path();
            ctx.move_to(grid_x, mid - amplitude - 5.0);
            ctx.line_to(grid_x, mid + amplitude + 5.0);
            ctx.stroke();
            gx += bit_width;
        }

        ctx.begin_path();
        ctx.move_to(0.0, mid);
        ctx.line_to(w, mid);
        ctx.set_stroke_style(&hex_to_rgba(&self.carrier, 0.08));
        ctx.stroke();

        sample_path(ctx, 0.0, w, 1.0, |x| {
            let index = ((x + phase) / bit_width).floor() as i64;
            if bit_level(index) {
                mid - amplitude
            } else {
                mid + amplitude
            }
        });
        ctx.set_stroke_style(&hex_to_rgba(&self.carrier, 0.6));
        ctx.set_line_width(1.8);
        ctx.set_shadow(6.0, &hex_to_rgba(&self.carrier, 0.25));
        ctx.stroke();
        ctx.set_shadow(0.0, "transparent");

        let clock_amp = amplitude * 0.3;
        let clock_width = bit_width / 2.0;
        let clock_mid = mid + amplitude + 12.0;
        sample_path(ctx, 0.0, w, 1.0, |x| {
            let index = ((x + phase) / clock_width).floor() as i64;
            if clock_level(index) {
                clock_mid - clock_amp
            } else {
                clock_mid + clock_amp
            }
        });
        ctx.set_stroke_style(&hex_to_rgba(&self.modulation, 0.35));
        ctx.set_line_width(1.0);
        ctx.stroke();

        ctx.set_font(DIVIDER_FONT);
        ctx.set_fill_style(&hex_to_rgba(&self.modulation, 0.3));
        ctx.fill_text("CLK", 6.0, clock_mid + clock_amp + 12.0);
        ctx.set_fill_style(&hex_to_rgba(&self.carrier, 0.3));
        ctx.fill_text("DATA", 6.0, mid - amplitude - 6.0);
    }

    fn draw_txrx(&mut self, t: f64) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let mid = h / 2.0;
        let antenna_w = 28.0;
        let antenna_h = h * 0.7;
        let tx_x = 40.0;
        let rx_x = w - 40.0;
        let wave_left = tx_x + antenna_w + 10.0;
        let wave_right = rx_x - antenna_w - 10.0;
        let span = wave_right - wave_left;
        let carrier = self.carrier.clone();
        let ctx = &mut self.canvas;

        draw_antenna(ctx, tx_x, mid, antenna_w, antenna_h, &carrier, 0.35, true);
        draw_antenna(ctx, rx_x, mid, antenna_w, antenna_h, &carrier, 0.25, false);

        ctx.set_font(ANTENNA_FONT);
        ctx.set_text_align(TextAlign::Center);
        ctx.set_fill_style(&hex_to_rgba(&carrier, 0.4));
        ctx.fill_text("Tx", tx_x, mid + antenna_h / 2.0 + 14.0);
        ctx.fill_text("Rx", rx_x, mid + antenna_h / 2.0 + 14.0);
        ctx.set_text_align(TextAlign::Start);

        if span > 0.0 {
            let amplitude = h * 0.22;
            let freq = 4.5 / span;
            let phase_shift = t * 1.8;
            sample_path(ctx, wave_left, wave_right, 2.0, |x| {
                let n = (x - wave_left) / span;
                let fade = (n / 0.08).min(1.0) * ((1.0 - n) / 0.08).min(1.0);
                mid + ((x - wave_left) * freq * TAU - phase_shift).sin() * amplitude * fade
            });
            ctx.set_stroke_style(&hex_to_rgba(&carrier, 0.55));
            ctx.set_line_width(1.6);
            ctx.set_shadow(8.0, &hex_to_rgba(&carrier, 0.3));
            ctx.stroke();
            ctx.set_shadow(0.0, "transparent");
        }

        for ring in 0..3 {
            let ring_phase = (t * 0.8 + ring as f64 * 0.6) % 2.0;
            if ring_phase > 1.0 {
                continue;
            }
            ctx.begin_path();
            ctx.arc(
                tx_x + antenna_w / 2.0,
                mid,
                10.0 + ring_phase * 50.0,
                -PI * 0.4,
                PI * 0.4,
            );
            ctx.set_stroke_style(&hex_to_rgba(&carrier, (1.0 - ring_phase) * 0.15));
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_antenna<C: Canvas2d>(
    ctx: &mut C,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: &str,
    alpha: f64,
    is_tx: bool,
) {
    let top = y - h / 2.0;
    let bottom = y + h / 2.0;
    let feed = top + h * 0.25;

    ctx.save();
    ctx.set_stroke_style(&hex_to_rgba(color, alpha));
    ctx.set_line_width(1.5);

    ctx.begin_path();
    ctx.move_to(x, bottom);
    ctx.line_to(x, feed);
    ctx.stroke();

    ctx.begin_path();
    ctx.move_to(x - w / 2.0, top);
    ctx.line_to(x, feed);
    ctx.line_to(x + w / 2.0, top);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(x, feed, 2.5, 0.0, TAU);
    ctx.set_fill_style(&hex_to_rgba(color, alpha * 0.8));
    ctx.fill();

    if is_tx {
        ctx.begin_path();
        ctx.arc(x, feed, 5.0, 0.0, TAU);
        ctx.set_stroke_style(&hex_to_rgba(color, alpha * 0.5));
        ctx.set_line_width(1.0);
        ctx.stroke();
    }
    ctx.restore();
}

impl<C: Canvas2d> Renderer for Divider<C> {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        resize_surface(&mut self.canvas, viewport);
    }

    fn render(&mut self, time_ms: f64) {
        if self.viewport.is_empty() || !self.layout.is_visible() {
            return;
        }
        self.canvas
            .clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        let t = time_ms * 0.001;
        match self.mode {
            DividerMode::Am => self.draw_am(t),
            DividerMode::Digital => self.draw_digital(t),
            DividerMode::TxRx => self.draw_txrx(t),
        }
    }

    fn update_palette(&mut self, palette: &Palette) {
        self.carrier = palette.carrier.clone();
        self.modulation = palette.modulation.clone();
    }
}
