//! Hero "signal topology" surface: an AM-displaced plane under an orbit camera.
//!
//! Geometry and uniforms are built here; the displacement itself runs in
//! `shaders/hero_surface.wgsl`, mirrored by [`displacement`] for host tests.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::error::SceneError;
use crate::palette::{parse_rgb01, Palette};

use super::camera::{OrbitCamera, OrbitConfig};

pub const PLANE_WIDTH: f32 = 16.0;
pub const PLANE_DEPTH: f32 = 10.0;
pub const SOLID_SEGMENTS: (u32, u32) = (280, 180);
pub const WIRE_SEGMENTS: (u32, u32) = (40, 40);
pub const SURFACE_MU: f32 = 0.55;
pub const SURFACE_BETA: f32 = 5.0;
pub const DISPLACEMENT_GAIN: f32 = 0.65;

pub const DEFAULT_CARRIER_RGB01: [f32; 3] = [0.23, 0.51, 0.84];
pub const DEFAULT_MOD_RGB01: [f32; 3] = [0.17, 0.37, 0.68];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct PlaneMesh {
    pub vertices: Vec<SurfaceVertex>,
    /// Triangle list for the solid pass.
    pub triangles: Vec<u32>,
    /// Line list of every triangle edge for the wireframe pass.
    pub lines: Vec<u32>,
}

/// Horizontal plane (y = 0) centered on the origin, `seg_x x seg_z` cells.
pub fn build_plane(width: f32, depth: f32, seg_x: u32, seg_z: u32) -> Result<PlaneMesh, SceneError> {
    if seg_x == 0 || seg_z == 0 {
        return Err(SceneError::EmptyGrid { x: seg_x, z: seg_z });
    }
    let cols = seg_x + 1;
    let mut vertices = Vec::with_capacity((cols * (seg_z + 1)) as usize);
    for iz in 0..=seg_z {
        let v = iz as f32 / seg_z as f32;
        for ix in 0..=seg_x {
            let u = ix as f32 / seg_x as f32;
            vertices.push(SurfaceVertex {
                position: [-width / 2.0 + u * width, 0.0, -depth / 2.0 + v * depth],
                uv: [u, 1.0 - v],
            });
        }
    }

    let cells = (seg_x * seg_z) as usize;
    let mut triangles = Vec::with_capacity(cells * 6);
    let mut lines = Vec::with_capacity(cells * 6 + (seg_x + seg_z) as usize * 2);
    for iz in 0..seg_z {
        for ix in 0..seg_x {
            let a = iz * cols + ix;
            let b = a + 1;
            let c = a + cols;
            let d = c + 1;
            triangles.extend_from_slice(&[a, c, b, b, c, d]);
            // top and left edges plus the shared diagonal
            lines.extend_from_slice(&[a, b, a, c, b, c]);
        }
    }
    // closing bottom row and right column
    for ix in 0..seg_x {
        let a = seg_z * cols + ix;
        lines.extend_from_slice(&[a, a + 1]);
    }
    for iz in 0..seg_z {
        let a = iz * cols + seg_x;
        lines.extend_from_slice(&[a, a + cols]);
    }
    Ok(PlaneMesh {
        vertices,
        triangles,
        lines,
    })
}

fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Edge taper so the surface settles flat at its borders.
pub fn edge_fade(uv: [f32; 2]) -> f32 {
    let [u, v] = uv;
    smoothstep(0.0, 0.12, u)
        * smoothstep(1.0, 0.88, u)
        * smoothstep(0.0, 0.1, v)
        * smoothstep(1.0, 0.9, v)
}

/// Height of the surface at `(x, z)`; must match the vertex stage.
pub fn displacement(x: f32, z: f32, uv: [f32; 2], time_s: f32, mu: f32) -> f32 {
    let tau = (x + PLANE_WIDTH / 2.0) / PLANE_WIDTH * 8.0;
    let z_phase = (z + PLANE_DEPTH / 2.0) / PLANE_DEPTH * 1.4;
    let modulator = (TAU * 0.22 * tau + time_s * 0.9).sin();
    let carrier = (TAU * 1.8 * tau + z_phase + time_s * 2.2).sin();
    (1.0 + mu * modulator) * carrier * DISPLACEMENT_GAIN * edge_fade(uv)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SurfaceUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub carrier: [f32; 4],
    pub modulation: [f32; 4],
    pub time: f32,
    pub mu: f32,
    pub beta: f32,
    pub _pad: f32,
}

/// CPU side of the hero surface: camera, colors, visibility.
#[derive(Clone, Debug)]
pub struct HeroSurfaceState {
    orbit: OrbitCamera,
    carrier: [f32; 3],
    modulation: [f32; 3],
    time_s: f32,
    visible: bool,
}

impl Default for HeroSurfaceState {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl HeroSurfaceState {
    pub fn new(orbit: OrbitConfig) -> Self {
        Self {
            orbit: OrbitCamera::new(orbit),
            carrier: DEFAULT_CARRIER_RGB01,
            modulation: DEFAULT_MOD_RGB01,
            time_s: 0.0,
            visible: true,
        }
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn update_pointer(&mut self, nx: f32, ny: f32) {
        self.orbit.update_pointer(nx, ny);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.orbit.set_viewport(width, height);
    }

    pub fn update_palette(&mut self, palette: &Palette) {
        self.carrier = parse_rgb01(&palette.carrier);
        self.modulation = parse_rgb01(&palette.modulation);
    }

    /// Advance time and camera smoothing; returns this frame's uniforms.
    pub fn update(&mut self, time_ms: f64) -> SurfaceUniforms {
        self.time_s = (time_ms * 0.001) as f32;
        self.orbit.step();
        self.uniforms()
    }

    pub fn uniforms(&self) -> SurfaceUniforms {
        let [cr, cg, cb] = self.carrier;
        let [mr, mg, mb] = self.modulation;
        SurfaceUniforms {
            view_proj: self.orbit.camera().view_proj().to_cols_array_2d(),
            carrier: [cr, cg, cb, 1.0],
            modulation: [mr, mg, mb, 1.0],
            time: self.time_s,
            mu: SURFACE_MU,
            beta: SURFACE_BETA,
            _pad: 0.0,
        }
    }
}
