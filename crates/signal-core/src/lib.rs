pub mod boot;
pub mod canvas;
pub mod constants;
pub mod effects;
pub mod error;
pub mod frame;
pub mod loader;
pub mod palette;
pub mod pointer;
pub mod prefs;
pub mod scene;
pub mod scroll;
pub mod sequencer;
pub mod tilt;
pub mod waves;

pub static HERO_SURFACE_WGSL: &str = include_str!("../shaders/hero_surface.wgsl");
pub static SKILLS_WGSL: &str = include_str!("../shaders/skills.wgsl");

pub use canvas::{Canvas2d, Renderer, Viewport};
pub use constants::*;
pub use error::{SceneError, ScheduleError};
pub use palette::{hex_to_rgba, Palette, Theme};
pub use pointer::PointerTracker;
pub use sequencer::{Latch, LatchState, PhasePosition, PhaseSchedule};
