//! 2D drawing surface abstraction.
//!
//! Renderers draw through [`Canvas2d`]; the web frontend implements it for a
//! `CanvasRenderingContext2d` and tests implement it with a recorder. All
//! coordinates are CSS pixels; the device-pixel-ratio lives in the transform
//! set by [`resize_surface`].

use crate::palette::Palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    Lighter,
}

impl Composite {
    pub fn as_str(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
        }
    }
}

pub trait Canvas2d {
    fn set_backing_size(&mut self, width: u32, height: u32);
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);

    fn save(&mut self);
    fn restore(&mut self);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_shadow(&mut self, blur: f64, color: &str);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, op: Composite);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline_middle(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Copy another surface of the same kind onto this one, scaled to `w x h`.
    fn draw_surface(&mut self, src: &Self, x: f64, y: f64, w: f64, h: f64)
    where
        Self: Sized;
}

/// Logical (CSS) size of a drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Backing-store dimensions: `ceil(css * dpr)` per axis.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).ceil() as u32,
            (self.height * self.dpr).ceil() as u32,
        )
    }

    /// Transform that maps CSS pixels onto the backing store.
    pub fn transform(&self) -> [f64; 6] {
        [self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0]
    }
}

/// Rebind a canvas to `viewport`. The transform is replaced, never composed,
/// so repeated resizes at the same size are idempotent.
pub fn resize_surface<C: Canvas2d>(canvas: &mut C, viewport: Viewport) {
    let (w, h) = viewport.backing_size();
    canvas.set_backing_size(w, h);
    let [a, b, c, d, e, f] = viewport.transform();
    canvas.set_transform(a, b, c, d, e, f);
}

/// Capability set shared by every animated surface, 2D or 3D.
pub trait Renderer {
    fn resize(&mut self, viewport: Viewport);
    fn render(&mut self, time_ms: f64);
    fn update_palette(&mut self, palette: &Palette);
}

/// Build (but do not stroke) a polyline path through `(x, f(x))` for `x` in `[x0, x1]`.
pub fn sample_path<C: Canvas2d>(
    ctx: &mut C,
    x0: f64,
    x1: f64,
    step: f64,
    mut f: impl FnMut(f64) -> f64,
) {
    ctx.begin_path();
    let mut x = x0;
    let mut first = true;
    while x <= x1 {
        let y = f(x);
        if first {
            ctx.move_to(x, y);
            first = false;
        } else {
            ctx.line_to(x, y);
        }
        x += step;
    }
}
