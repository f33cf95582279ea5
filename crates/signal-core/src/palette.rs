//! Color tokens shared by every drawing component.
//!
//! Themes resolve to plain CSS color strings (hex or functional notation).
//! Renderers never look colors up themselves; the frontend pushes a
//! [`Palette`] to each of them through `update_palette`.

use crate::constants::{DEFAULT_RGB, DEFAULT_RGB01, GLOW_CARRIER_ALPHA, GLOW_MOD_ALPHA};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub carrier: String,
    pub modulation: String,
    pub glow_carrier: String,
    pub glow_mod: String,
    pub dark: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            carrier: "#2a9df4".to_string(),
            modulation: "#1d6fdc".to_string(),
            glow_carrier: "rgba(42,157,244,0.35)".to_string(),
            glow_mod: "rgba(29,111,220,0.26)".to_string(),
            dark: false,
        }
    }
}

impl Palette {
    /// Build a palette from the two base tokens, deriving the glow variants.
    pub fn from_tokens(carrier: &str, modulation: &str, dark: bool) -> Self {
        Self {
            carrier: carrier.trim().to_string(),
            modulation: modulation.trim().to_string(),
            glow_carrier: hex_to_rgba(carrier, GLOW_CARRIER_ALPHA),
            glow_mod: hex_to_rgba(modulation, GLOW_MOD_ALPHA),
            dark,
        }
    }

    /// Like [`Palette::from_tokens`] but keeps theme-supplied glows when present.
    pub fn with_glows(
        carrier: &str,
        modulation: &str,
        glow_carrier: &str,
        glow_mod: &str,
        dark: bool,
    ) -> Self {
        let mut p = Self::from_tokens(carrier, modulation, dark);
        if !glow_carrier.trim().is_empty() {
            p.glow_carrier = glow_carrier.trim().to_string();
        }
        if !glow_mod.trim().is_empty() {
            p.glow_mod = glow_mod.trim().to_string();
        }
        p
    }

    #[inline]
    pub fn carrier_rgba(&self, alpha: f64) -> String {
        hex_to_rgba(&self.carrier, alpha)
    }

    #[inline]
    pub fn modulation_rgba(&self, alpha: f64) -> String {
        hex_to_rgba(&self.modulation, alpha)
    }

    pub fn carrier_rgb01(&self) -> [f32; 3] {
        parse_rgb01(&self.carrier)
    }

    pub fn modulation_rgb01(&self) -> [f32; 3] {
        parse_rgb01(&self.modulation)
    }
}

/// Convert a color token into an `rgba(r,g,b,alpha)` string.
///
/// Functional inputs keep their first three numeric tokens verbatim. Anything
/// unparseable falls back to the default carrier blue.
pub fn hex_to_rgba(color: &str, alpha: f64) -> String {
    let color = color.trim();
    if color.starts_with("rgb") {
        let nums = numeric_tokens(color);
        if nums.len() >= 3 {
            return format!("rgba({},{},{},{})", nums[0], nums[1], nums[2], alpha);
        }
        return fallback_rgba(alpha);
    }
    match parse_hex(color) {
        Some([r, g, b]) => format!("rgba({},{},{},{})", r, g, b, alpha),
        None => fallback_rgba(alpha),
    }
}

/// Parse a color token into normalized `[r, g, b]` for shader uniforms.
pub fn parse_rgb01(color: &str) -> [f32; 3] {
    let color = color.trim();
    if color.starts_with("rgb") {
        let nums = numeric_tokens(color);
        if nums.len() >= 3 {
            let mut out = [0.0f32; 3];
            for (o, n) in out.iter_mut().zip(nums.iter()) {
                match n.parse::<f32>() {
                    Ok(v) => *o = v / 255.0,
                    Err(_) => return DEFAULT_RGB01,
                }
            }
            return out;
        }
    }
    match parse_hex(color) {
        Some([r, g, b]) => [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
        None => DEFAULT_RGB01,
    }
}

#[inline]
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn fallback_rgba(alpha: f64) -> String {
    let [r, g, b] = DEFAULT_RGB;
    format!("rgba({},{},{},{})", r, g, b, alpha)
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let cleaned = color.replacen('#', "", 1);
    let cleaned = cleaned.trim();
    if cleaned.len() != 6 || !cleaned.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&cleaned[0..2], 16).ok()?;
    let g = u8::from_str_radix(&cleaned[2..4], 16).ok()?;
    let b = u8::from_str_radix(&cleaned[4..6], 16).ok()?;
    Some([r, g, b])
}

// Runs of digits and dots, e.g. "rgba(1, 2.5,3,0.4)" -> ["1", "2.5", "3", "0.4"].
fn numeric_tokens(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, ch) in s.char_indices() {
        let numeric = ch.is_ascii_digit() || ch == '.';
        match (numeric, start) {
            (true, None) => start = Some(i),
            (false, Some(st)) => {
                out.push(&s[st..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(st) = start {
        out.push(&s[st..]);
    }
    out
}
