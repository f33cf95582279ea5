//! GPU-independent half of the 3D scenes: cameras, geometry, per-frame
//! uniforms and projected label positions. The web crate owns the wgpu side.

pub mod camera;
pub mod resource;
pub mod skills;
pub mod surface;

pub use camera::{OrbitCamera, OrbitConfig, PerspectiveCamera};
pub use resource::{GpuResource, Release};
pub use skills::{EntranceConfig, SkillsFrame, SkillsScene, SKILLS};
pub use surface::{HeroSurfaceState, SurfaceUniforms};
