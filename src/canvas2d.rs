use signal_core::canvas::{Canvas2d, Composite, TextAlign, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// A `<canvas>` and its 2D context, drawable by the core renderers.
#[derive(Clone)]
pub struct WebCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("get_context error: {:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { canvas, ctx })
    }

    pub fn by_id(document: &web::Document, id: &str) -> anyhow::Result<Self> {
        Self::new(crate::dom::element_by_id(document, id)?)
    }

    /// A detached canvas used as an offscreen buffer.
    pub fn offscreen(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Self::new(canvas)
    }

    pub fn element(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Pin the CSS box to `viewport` so the backing store maps 1:1 after DPR.
    pub fn set_css_size(&self, viewport: Viewport) {
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", viewport.width));
        _ = style.set_property("height", &format!("{}px", viewport.height));
    }
}

impl Canvas2d for WebCanvas {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        _ = self.ctx.set_transform(a, b, c, d, e, f);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(color);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_composite(&mut self, op: Composite) {
        _ = self.ctx.set_global_composite_operation(op.as_str());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        _ = self.ctx.arc(x, y, radius.max(0.0), start, end);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline_middle(&mut self) {
        self.ctx.set_text_baseline("middle");
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_surface(&mut self, src: &Self, x: f64, y: f64, w: f64, h: f64) {
        if src.canvas.width() == 0 || src.canvas.height() == 0 {
            return;
        }
        _ = self
            .ctx
            .draw_image_with_html_canvas_element_and_dw_and_dh(&src.canvas, x, y, w, h);
    }
}
