// Shared test canvas: records every call so tests can assert on drawing.

#![allow(dead_code)]

use signal_core::canvas::{Canvas2d, Composite, TextAlign};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    BackingSize(u32, u32),
    Transform([f64; 6]),
    Save,
    Restore,
    ClearRect(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    Shadow(f64, String),
    GlobalAlpha(f64),
    Composite(Composite),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc(f64, f64, f64),
    Stroke,
    Fill,
    Font(String),
    TextAlign(TextAlign),
    TextBaselineMiddle,
    Text(String, f64, f64),
    DrawSurface(usize, f64),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub id: usize,
    pub ops: Vec<Op>,
    pub backing: (u32, u32),
    pub transform: [f64; 6],
    pub alpha: f64,
}

impl RecordingCanvas {
    pub fn with_id(id: usize) -> Self {
        Self {
            id,
            alpha: 1.0,
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn strokes(&self) -> usize {
        self.count(|op| matches!(op, Op::Stroke))
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t, _, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn stroke_styles(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::StrokeStyle(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas2d for RecordingCanvas {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        self.ops.push(Op::BackingSize(width, height));
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform = [a, b, c, d, e, f];
        self.ops.push(Op::Transform(self.transform));
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::ClearRect(x, y, w, h));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ops.push(Op::FillStyle(style.to_string()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ops.push(Op::StrokeStyle(style.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }

    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.ops.push(Op::Shadow(blur, color.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
        self.ops.push(Op::GlobalAlpha(alpha));
    }

    fn set_composite(&mut self, op: Composite) {
        self.ops.push(Op::Composite(op));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
        self.ops.push(Op::Arc(x, y, radius));
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(Op::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(Op::TextAlign(align));
    }

    fn set_text_baseline_middle(&mut self) {
        self.ops.push(Op::TextBaselineMiddle);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(Op::Text(text.to_string(), x, y));
    }

    fn draw_surface(&mut self, src: &Self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.ops.push(Op::DrawSurface(src.id, self.alpha));
    }
}
