//! Skills "FFT": one glass bar per skill, noise-floor bars between the peaks,
//! a grid floor and dB axes, with labels projected to screen space each frame.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SceneError;
use crate::palette::{lerp_rgb, parse_rgb01, Palette};
use crate::sequencer::Latch;

use super::camera::PerspectiveCamera;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    pub detail: &'static str,
    /// In `[0, 1]`; bar height is `proficiency * 5`.
    pub proficiency: f32,
}

const fn skill(name: &'static str, detail: &'static str, proficiency: f32) -> Skill {
    Skill {
        name,
        detail,
        proficiency,
    }
}

pub const SKILLS: [Skill; 6] = [
    skill("Programming", "Python, C++, Embedded C", 0.92),
    skill("Embedded Linux", "Linux, SoC, systemctl", 0.78),
    skill("Embedded Systems", "8051, STM32, ESP8266", 0.78),
    skill("Software & Tools", "Git, Linux, Claude Code", 0.62),
    skill("Electronics & PCB", "KiCAD, Circuits, Multisim", 0.92),
    skill("Web Dev", "HTML, CSS, JS, SQL", 0.48),
];

pub const TOTAL_WIDTH: f32 = 16.0;
pub const PEAK_WIDTH: f32 = 0.9;
pub const PEAK_DEPTH: f32 = 1.0;
pub const HEIGHT_PER_UNIT: f32 = 5.0;
pub const NOISE_BAR_SIZE: (f32, f32) = (0.15, 0.4);
pub const NOISE_BAR_SPACING: f32 = 0.35;
pub const MIN_BAR_SCALE: f32 = 0.001;
pub const DB_TICKS: [u32; 5] = [0, 3, 5, 7, 9];
pub const AXIS_X: f32 = 9.2;
pub const AXIS_Z: f32 = 0.6;
pub const AXIS_TOP: f32 = 5.2;
pub const GRID_SIZE: (f32, f32) = (18.0, 6.0);
pub const ENV_TOP_RGB: u32 = 0x1a2a58;
pub const ENV_LIGHT_RGB: u32 = 0x88bbff;
pub const X_AXIS_LABEL: &str = "Skill Domain \u{2192}";

const GLASS_ALPHA: f32 = 0.9;
const EDGE_ALPHA: f32 = 0.15;
const NOISE_ALPHA: f32 = 0.25;
const GRID_ALPHA: f32 = 0.06;
const AXIS_ALPHA: f32 = 0.28;

#[derive(Clone, Copy, Debug)]
pub struct EntranceConfig {
    pub stagger_ms: f64,
    pub duration_ms: f64,
    pub oscillation: f32,
    pub oscillation_rate: f32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 120.0,
            duration_ms: 600.0,
            oscillation: 0.02,
            oscillation_rate: 1.5,
        }
    }
}

/// Cubic ease-out reveal of bar `index`, `elapsed_ms` after the trigger.
/// A non-positive duration reveals each bar at once when its delay passes.
pub fn entrance_scale(index: usize, elapsed_ms: f64, config: &EntranceConfig) -> f32 {
    let delay = index as f64 * config.stagger_ms;
    if !(config.duration_ms > 0.0) {
        return if elapsed_ms >= delay { 1.0 } else { 0.0 };
    }
    let p = ((elapsed_ms - delay) / config.duration_ms).clamp(0.0, 1.0);
    (1.0 - (1.0 - p).powi(3)) as f32
}

/// Label opacity for a bar revealed to `scale`: hidden below 30 %.
pub fn label_opacity(scale: f32) -> f32 {
    if scale > 0.3 {
        ((scale - 0.3) / 0.4).min(1.0)
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillsLayout {
    pub gap: f32,
    pub start_x: f32,
}

impl SkillsLayout {
    pub fn for_count(count: usize) -> Result<Self, SceneError> {
        if count < 2 {
            return Err(SceneError::TooFewItems { min: 2, got: count });
        }
        Ok(Self {
            gap: (TOTAL_WIDTH - count as f32 * PEAK_WIDTH) / (count - 1) as f32,
            start_x: -TOTAL_WIDTH / 2.0 + PEAK_WIDTH / 2.0,
        })
    }

    pub fn peak_x(&self, index: usize) -> f32 {
        self.start_x + index as f32 * (PEAK_WIDTH + self.gap)
    }

    /// Noise-bar x positions in the gap after peak `index`.
    pub fn noise_xs(&self, index: usize) -> Vec<f32> {
        let mid = self.peak_x(index) + PEAK_WIDTH / 2.0 + self.gap / 2.0;
        let count = ((self.gap / 0.5).floor() as usize).max(1);
        (0..count)
            .map(|j| mid + (j as f32 - count as f32 / 2.0) * NOISE_BAR_SPACING)
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct Peak {
    pub skill: Skill,
    pub x: f32,
    pub max_height: f32,
    pub current_scale: f32,
    osc_phase: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct NoiseBar {
    pub x: f32,
    pub base_height: f32,
    phase: f32,
}

/// One instanced box: base-anchored at `offset`, extent `size`, y scaled.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BarInstance {
    /// xyz base center, w = vertical scale.
    pub offset: [f32; 4],
    /// xyz full extent, w unused.
    pub size: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub alpha: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SkillsUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// rgb carrier, a = edge alpha.
    pub carrier: [f32; 4],
    /// xyz toward the light, w = directional intensity.
    pub light: [f32; 4],
    /// rgb environment sky, a = ambient intensity.
    pub env_top: [f32; 4],
    /// rgb environment highlight, a = 1 in dark theme.
    pub env_light: [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct PeakLabel {
    pub name: &'static str,
    pub detail: &'static str,
    pub db_text: String,
    pub screen: Vec2,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub screen: Vec2,
}

/// Everything one skills frame needs from the CPU side.
#[derive(Clone, Debug, Default)]
pub struct SkillsFrame {
    pub peaks: Vec<BarInstance>,
    pub noise: Vec<BarInstance>,
    pub labels: Vec<PeakLabel>,
    pub ticks: Vec<AxisLabel>,
    pub x_axis: Option<AxisLabel>,
}

pub fn rgb_hex01(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    ]
}

pub struct SkillsScene {
    layout: SkillsLayout,
    peaks: Vec<Peak>,
    noise_bars: Vec<NoiseBar>,
    camera: PerspectiveCamera,
    config: EntranceConfig,
    entrance: Latch,
    entrance_start: Option<f64>,
    carrier: [f32; 3],
    modulation: [f32; 3],
    dark: bool,
    size: (f64, f64),
}

impl SkillsScene {
    pub fn new(skills: &[Skill], config: EntranceConfig, seed: u64) -> Result<Self, SceneError> {
        if let Some(bad) = skills.iter().find(|s| !(0.0..=1.0).contains(&s.proficiency)) {
            return Err(SceneError::Proficiency(bad.proficiency));
        }
        let layout = SkillsLayout::for_count(skills.len())?;
        let mut rng = StdRng::seed_from_u64(seed);
        let peaks = skills
            .iter()
            .enumerate()
            .map(|(i, s)| Peak {
                skill: *s,
                x: layout.peak_x(i),
                max_height: s.proficiency * HEIGHT_PER_UNIT,
                current_scale: 0.0,
                osc_phase: rng.gen::<f32>() * TAU,
            })
            .collect();
        let mut noise_bars = Vec::new();
        for i in 0..skills.len() - 1 {
            for x in layout.noise_xs(i) {
                noise_bars.push(NoiseBar {
                    x,
                    base_height: 0.05 + rng.gen::<f32>() * 0.15,
                    phase: rng.gen::<f32>() * TAU,
                });
            }
        }
        Ok(Self {
            layout,
            peaks,
            noise_bars,
            camera: PerspectiveCamera::new(Vec3::new(0.0, 6.0, 14.0), Vec3::new(0.0, 1.5, 0.0), 35.0),
            config,
            entrance: Latch::new(),
            entrance_start: None,
            carrier: parse_rgb01("#3b82d6"),
            modulation: parse_rgb01("#2a5fad"),
            dark: false,
            size: (0.0, 0.0),
        })
    }

    pub fn layout(&self) -> &SkillsLayout {
        &self.layout
    }

    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn noise_bars(&self) -> &[NoiseBar] {
        &self.noise_bars
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn entrance_triggered(&self) -> bool {
        self.entrance.is_active()
    }

    /// Start the staggered reveal. Only the first call has an effect.
    pub fn trigger_entrance(&mut self, now_ms: f64) -> bool {
        if !self.entrance.activate() {
            return false;
        }
        self.entrance_start = Some(now_ms);
        log::debug!("[skills] entrance at {now_ms:.0}ms");
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
        self.camera.set_viewport(width, height);
    }

    pub fn update_palette(&mut self, palette: &Palette) {
        self.carrier = parse_rgb01(&palette.carrier);
        self.modulation = parse_rgb01(&palette.modulation);
        self.dark = palette.dark;
    }

    pub fn glass_color(&self, proficiency: f32) -> [f32; 3] {
        lerp_rgb(self.carrier, self.modulation, 1.0 - proficiency)
    }

    pub fn uniforms(&self) -> SkillsUniforms {
        let [cr, cg, cb] = self.carrier;
        let [tr, tg, tb] = rgb_hex01(ENV_TOP_RGB);
        let [lr, lg, lb] = rgb_hex01(ENV_LIGHT_RGB);
        let light = Vec3::new(5.0, 10.0, 7.0).normalize();
        SkillsUniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            carrier: [cr, cg, cb, EDGE_ALPHA],
            light: [light.x, light.y, light.z, 0.8],
            env_top: [tr, tg, tb, 0.6],
            env_light: [lr, lg, lb, if self.dark { 1.0 } else { 0.0 }],
        }
    }

    /// Grid floor and axes as a line list; colored by the carrier uniform.
    pub fn static_lines(&self) -> Vec<LineVertex> {
        let mut out = Vec::new();
        let mut seg = |a: [f32; 3], b: [f32; 3], alpha: f32| {
            out.push(LineVertex { position: a, alpha });
            out.push(LineVertex { position: b, alpha });
        };
        let (gw, gd) = GRID_SIZE;
        let y = -0.01;
        for i in 0..=18 {
            let x = -gw / 2.0 + gw * i as f32 / 18.0;
            seg([x, y, -gd / 2.0], [x, y, gd / 2.0], GRID_ALPHA);
        }
        for i in 0..=6 {
            let z = -gd / 2.0 + gd * i as f32 / 6.0;
            seg([-gw / 2.0, y, z], [gw / 2.0, y, z], GRID_ALPHA);
        }
        seg([-AXIS_X, 0.0, AXIS_Z], [-AXIS_X, AXIS_TOP, AXIS_Z], AXIS_ALPHA);
        seg([-AXIS_X, 0.0, AXIS_Z], [AXIS_X, 0.0, AXIS_Z], AXIS_ALPHA);
        for db in DB_TICKS {
            let ty = db as f32 * 0.5;
            seg([-9.5, ty, AXIS_Z], [-AXIS_X, ty, AXIS_Z], AXIS_ALPHA);
        }
        out
    }

    pub fn update(&mut self, time_ms: f64) -> SkillsFrame {
        let t = (time_ms * 0.001) as f32;
        let elapsed = self.entrance_start.map(|start| time_ms - start);
        let cfg = self.config;
        let (w, h) = self.size;

        let mut frame = SkillsFrame::default();
        for i in 0..self.peaks.len() {
            if let Some(elapsed) = elapsed {
                self.peaks[i].current_scale = entrance_scale(i, elapsed, &cfg);
            }
            let peak = &self.peaks[i];
            let oscillation = if peak.current_scale >= 1.0 {
                1.0 + cfg.oscillation * (t * cfg.oscillation_rate + peak.osc_phase).sin()
            } else {
                1.0
            };
            let scale = (peak.current_scale * oscillation).max(MIN_BAR_SCALE);
            let [r, g, b] = self.glass_color(peak.skill.proficiency);
            frame.peaks.push(BarInstance {
                offset: [peak.x, 0.0, 0.0, scale],
                size: [PEAK_WIDTH, peak.max_height, PEAK_DEPTH, 0.0],
                color: [r, g, b, GLASS_ALPHA],
            });

            let anchor = Vec3::new(peak.x, peak.max_height * peak.current_scale + 0.3, 0.0);
            frame.labels.push(PeakLabel {
                name: peak.skill.name,
                detail: peak.skill.detail,
                db_text: format!("{:.1} dB", peak.skill.proficiency * 10.0),
                screen: self.camera.project(anchor, w, h),
                opacity: label_opacity(peak.current_scale),
            });
        }

        let [cr, cg, cb] = self.carrier;
        for bar in &self.noise_bars {
            let (bw, bd) = NOISE_BAR_SIZE;
            frame.noise.push(BarInstance {
                offset: [bar.x, 0.0, 0.0, 0.5 + 0.5 * (t * 2.0 + bar.phase).sin()],
                size: [bw, bar.base_height, bd, 0.0],
                color: [cr * 0.5, cg * 0.5, cb * 0.5, NOISE_ALPHA],
            });
        }

        frame.ticks = DB_TICKS
            .iter()
            .map(|&db| AxisLabel {
                text: format!("{db} dB"),
                screen: self
                    .camera
                    .project(Vec3::new(-9.5, db as f32 * 0.5, AXIS_Z), w, h),
            })
            .collect();
        frame.x_axis = Some(AxisLabel {
            text: X_AXIS_LABEL.to_string(),
            screen: self.camera.project(Vec3::new(0.0, -0.05, AXIS_Z), w, h),
        });
        frame
    }
}

/// Unit box spanning x,z in `[-0.5, 0.5]` and y in `[0, 1]`, 24 vertices
/// with face normals, plus triangle and edge index lists.
pub fn unit_box() -> (Vec<BoxVertex>, Vec<u16>, Vec<u16>) {
    const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-0.5, 0.0, 0.5], [0.5, 0.0, 0.5], [0.5, 1.0, 0.5], [-0.5, 1.0, 0.5]]),
        ([0.0, 0.0, -1.0], [[0.5, 0.0, -0.5], [-0.5, 0.0, -0.5], [-0.5, 1.0, -0.5], [0.5, 1.0, -0.5]]),
        ([1.0, 0.0, 0.0], [[0.5, 0.0, 0.5], [0.5, 0.0, -0.5], [0.5, 1.0, -0.5], [0.5, 1.0, 0.5]]),
        ([-1.0, 0.0, 0.0], [[-0.5, 0.0, -0.5], [-0.5, 0.0, 0.5], [-0.5, 1.0, 0.5], [-0.5, 1.0, -0.5]]),
        ([0.0, 1.0, 0.0], [[-0.5, 1.0, 0.5], [0.5, 1.0, 0.5], [0.5, 1.0, -0.5], [-0.5, 1.0, -0.5]]),
        ([0.0, -1.0, 0.0], [[-0.5, 0.0, -0.5], [0.5, 0.0, -0.5], [0.5, 0.0, 0.5], [-0.5, 0.0, 0.5]]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut triangles = Vec::with_capacity(36);
    let mut edges = Vec::with_capacity(48);
    for (f, (normal, corners)) in FACES.iter().enumerate() {
        let base = (f * 4) as u16;
        for c in corners {
            vertices.push(BoxVertex {
                position: *c,
                normal: *normal,
            });
        }
        triangles.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        for k in 0..4 {
            edges.extend_from_slice(&[base + k, base + (k + 1) % 4]);
        }
    }
    (vertices, triangles, edges)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BoxVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}
