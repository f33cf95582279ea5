// DOM contract and web-only tuning.
//
// Element ids and class names the page markup provides, plus the few
// timings that only matter to the browser wiring. Visual tuning shared with
// the core lives in `signal_core::constants`.

// Page chrome
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const SCOPE_TOGGLE_ID: &str = "scopeToggle";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const PROGRESS_BAR_ID: &str = "progressBar";
pub const NAV_SELECTOR: &str = ".nav";
pub const NAV_SCROLLED_CLASS: &str = "nav--scrolled";
pub const NAV_OPEN_CLASS: &str = "nav--open";

// Body state classes
pub const DARK_CLASS: &str = "dark";
pub const LIGHT_CLASS: &str = "light";
pub const SCOPE_CLASS: &str = "oscilloscope";
pub const ACTIVE_CLASS: &str = "active";
pub const LOADING_CLASS: &str = "signal-loading";
pub const LOADED_CLASS: &str = "signal-loaded";
pub const HIDDEN_CLASS: &str = "hidden";
pub const VISIBLE_CLASS: &str = "visible";
pub const POWERED_CLASS: &str = "powered";

// Canvases
pub const SIGNAL_CANVAS_ID: &str = "signalCanvas";
pub const HERO_ID: &str = "hero";
pub const HERO_CANVAS_ID: &str = "heroCarrierCanvas";
pub const SURFACE_SECTION_ID: &str = "about";
pub const SURFACE_CANVAS_ID: &str = "aboutThreeCanvas";

// Sections and reactive elements
pub const SECTION_SELECTOR: &str = ".node-section";
pub const SECTION_ARRIVED_CLASS: &str = "signal-arrived";
pub const REVEAL_SELECTOR: &str = ".animate-on-signal";
pub const PARALLAX_SELECTOR: &str = ".hero__layer";
pub const CARD_SELECTOR: &str = ".signal-reactive";
pub const CARD_HIT_CLASS: &str = "signal-hit";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const NAV_WAVE_CLASS: &str = "nav-wave";
pub const NAV_HOVER_CLASS: &str = "signal-hover";
pub const NAV_RELEASE_CLASS: &str = "signal-release";
pub const DIVIDER_SELECTOR: &str = ".signal-divider";
pub const DIVIDER_CANVAS_SELECTOR: &str = ".divider-canvas";

// Skills spectrum
pub const FFT_CONTAINER_ID: &str = "fftContainer";
pub const FFT_CANVAS_ID: &str = "fftCanvas";
pub const FFT_LABELS_ID: &str = "fftLabels";
pub const FFT_HINT_ID: &str = "fftHint";

// Loader overlay
pub const LOADER_ID: &str = "signalLoader";
pub const LOADER_CANVAS_ID: &str = "loaderCanvas";
pub const LOADER_STATUS_ID: &str = "loaderStatus";
pub const LOADER_METER_ID: &str = "loaderMeter";
pub const FM_DIAL_ID: &str = "fmDial";
pub const FM_STRIP_ID: &str = "fmStrip";
pub const LOCKED_CLASS: &str = "locked";

// Boot page
pub const BOOT_SCREEN_ID: &str = "boot-screen";
pub const BOOT_LOG_ID: &str = "boot-log";
pub const BOOT_CURSOR_ID: &str = "boot-cursor";
pub const MAIN_CONTENT_ID: &str = "main-content";
pub const MCU_CHIP_ID: &str = "mcu-chip";
pub const TRACE_SVG_ID: &str = "trace-svg";
pub const TAGLINE_ID: &str = "tagline";
pub const STATUS_REGISTER_ID: &str = "status-register";
pub const PERIPHERAL_SELECTOR: &str = ".peripheral";
pub const TRACE_LINE_CLASS: &str = "trace-line";
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const TRACE_TRANSITION: &str = "stroke-dashoffset 0.6s ease, stroke 0.6s ease";

// Timings (ms)
pub const CARD_HIT_MS: i32 = 300;

// GPU scenes
pub const MAX_SCENE_DPR: f64 = 2.0; // 3D canvases cap their pixel ratio
pub const LOADER_SEED: u64 = 0x5eed_0002;
pub const SKILLS_SEED: u64 = 0x5eed_0003;
