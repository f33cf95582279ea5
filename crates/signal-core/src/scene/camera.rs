use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera with a 0..1 depth range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(eye: Vec3, target: Vec3, fov_y_deg: f32) -> Self {
        Self {
            eye,
            target,
            fov_y_deg,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Project a world point to CSS pixels inside a `width x height` box.
    pub fn project(&self, world: Vec3, width: f64, height: f64) -> Vec2 {
        let ndc = self.view_proj().project_point3(world);
        Vec2::new(
            ((ndc.x * 0.5 + 0.5) as f64 * width) as f32,
            ((-ndc.y * 0.5 + 0.5) as f64 * height) as f32,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OrbitConfig {
    pub distance: f32,
    pub base_phi: f32,
    pub base_theta: f32,
    pub look_at: Vec3,
    pub fov_y_deg: f32,
    pub azimuth_range: f32,
    pub elevation_range: f32,
    pub smoothing: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            distance: 9.2,
            base_phi: std::f32::consts::PI * 0.28,
            base_theta: 0.0,
            look_at: Vec3::new(0.0, -0.6, 0.8),
            fov_y_deg: 58.0,
            azimuth_range: 0.52,
            elevation_range: 0.28,
            smoothing: 0.04,
        }
    }
}

/// Pointer-steered orbit around the hero surface.
///
/// The pointer only sets targets; `step` eases toward them once per frame.
#[derive(Clone, Copy, Debug)]
pub struct OrbitCamera {
    config: OrbitConfig,
    target: Vec2,
    current: Vec2,
    camera: PerspectiveCamera,
}

impl OrbitCamera {
    pub fn new(config: OrbitConfig) -> Self {
        let mut orbit = Self {
            config,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            camera: PerspectiveCamera::new(Vec3::ZERO, config.look_at, config.fov_y_deg),
        };
        orbit.camera.eye = orbit.eye();
        orbit
    }

    /// `nx`, `ny` are viewport fractions; values outside `[0, 1]` are clamped.
    pub fn update_pointer(&mut self, nx: f32, ny: f32) {
        let nx = nx.clamp(0.0, 1.0);
        let ny = ny.clamp(0.0, 1.0);
        self.target = Vec2::new(
            (nx - 0.5) * self.config.azimuth_range,
            (ny - 0.5) * self.config.elevation_range,
        );
    }

    pub fn step(&mut self) {
        self.current += (self.target - self.current) * self.config.smoothing;
        self.camera.eye = self.eye();
    }

    /// `(azimuth, elevation)` offsets currently applied.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn eye(&self) -> Vec3 {
        let phi = self.config.base_phi + self.current.y;
        let theta = self.config.base_theta + self.current.x;
        let d = self.config.distance;
        Vec3::new(
            d * phi.sin() * theta.sin(),
            d * phi.cos(),
            d * phi.sin() * theta.cos(),
        )
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }
}
