// Shared visual tuning constants used by the core components and the web frontend.
// Times are milliseconds, distances are CSS pixels unless noted otherwise.

// Palette fallbacks
pub const DEFAULT_RGB: [u8; 3] = [58, 134, 255]; // used when a color token cannot be parsed
pub const DEFAULT_RGB01: [f32; 3] = [0.23, 0.51, 0.84]; // GPU-side fallback color
pub const GLOW_CARRIER_ALPHA: f64 = 0.35;
pub const GLOW_MOD_ALPHA: f64 = 0.26;

// Pointer tracking
pub const POINTER_MIN_DT_MS: f64 = 16.0; // floor for the velocity time delta
pub const POINTER_SMOOTH_KEEP: f64 = 0.85; // smoothed = smoothed*keep + instant*(1-keep)

// Ripple pool
pub const RIPPLE_MAX: usize = 8;
pub const RIPPLE_LIFE_MS: f64 = 1100.0;
pub const RIPPLE_MIN_MOVE_PX: f64 = 8.0;
pub const RIPPLE_RING_STAGGER: f64 = 0.15; // eased-progress offset per ring
pub const RIPPLE_FADE_IN: f64 = 0.3; // fraction of life spent fading in
pub const RIPPLE_HIT_TOLERANCE_PX: f64 = 45.0;
pub const SPEED_FAST: f64 = 1.0; // px/ms
pub const SPEED_MEDIUM: f64 = 0.3; // px/ms

// Section pulses
pub const PULSE_MAX: usize = 26;
pub const PULSE_LIFE_MS: f64 = 1150.0;
pub const PULSE_RINGS: usize = 3;
pub const PULSE_RING_STAGGER: f64 = 0.18;
pub const PULSE_CULL_MARGIN_PX: f64 = 140.0;
pub const PULSE_Y_OFFSET_PX: f64 = 70.0; // pulses appear below the section top
pub const SCOPE_PULSE_BOOST: f64 = 1.15;

// Card tilt
pub const TILT_MAX_ROTATION_DEG: f64 = 8.0;
pub const TILT_MAGNETIC_RANGE_PX: f64 = 120.0;
pub const TILT_MAGNETIC_ROTATION_DEG: f64 = 2.5;
pub const TILT_MAGNETIC_LERP: f64 = 0.12;
pub const TILT_REST_EPSILON_DEG: f64 = 0.01;
pub const TILT_PERSPECTIVE_PX: f64 = 800.0;

// Scroll / sections
pub const SECTION_ACTIVATE_FRACTION: f64 = 0.78; // of viewport height
pub const SECTION_REVEAL_STAGGER_MS: u32 = 70;
pub const NAV_SCROLLED_PX: f64 = 40.0;
pub const INITIAL_SECTION: &str = "hero";
pub const SKILLS_SECTION: &str = "skills";

// Nav hover waves
pub const NAV_STABLE_SPEED: f64 = 42.0;
pub const NAV_RELEASE_MS: u32 = 250;

// Dividers
pub const DIVIDER_DEFAULT_STRENGTH: f64 = 0.2;
pub const DIVIDER_CULL_MARGIN_PX: f64 = 50.0;

// Resize coalescing
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;
