use fnv::FnvHashSet;

use crate::constants::{
    INITIAL_SECTION, NAV_SCROLLED_PX, SECTION_ACTIVATE_FRACTION, SECTION_REVEAL_STAGGER_MS,
    SKILLS_SECTION,
};

/// Page scroll snapshot, recomputed on scroll and resize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub max_scroll: f64,
    pub progress: f64,
    pub nav_scrolled: bool,
}

impl ScrollState {
    pub fn update(&mut self, scroll_y: f64, document_height: f64, viewport_height: f64) {
        self.scroll_y = scroll_y;
        self.viewport_height = viewport_height;
        self.max_scroll = (document_height - viewport_height).max(1.0);
        self.progress = (scroll_y / self.max_scroll).clamp(0.0, 1.0);
        self.nav_scrolled = scroll_y > NAV_SCROLLED_PX;
    }

    /// CSS width of the top progress bar.
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress * 100.0)
    }

    pub fn parallax_transform(&self, speed: f64) -> String {
        format!("translateY({}px)", self.scroll_y * speed)
    }
}

/// What the DOM side does when a section arrives.
#[derive(Clone, Debug, PartialEq)]
pub struct Activation {
    pub id: String,
    /// Delay before revealing each `.animate-on-signal` child, in order.
    pub reveal_delays_ms: Vec<u32>,
    pub spawn_pulse: bool,
    pub trigger_skills_entrance: bool,
}

/// Tracks which sections have arrived; each arrives at most once.
#[derive(Clone, Debug)]
pub struct SectionActivator {
    activated: FnvHashSet<String>,
}

impl Default for SectionActivator {
    fn default() -> Self {
        let mut activated = FnvHashSet::default();
        activated.insert(INITIAL_SECTION.to_string());
        Self { activated }
    }
}

impl SectionActivator {
    pub fn is_active(&self, id: &str) -> bool {
        self.activated.contains(id)
    }

    pub fn len(&self) -> usize {
        self.activated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activated.is_empty()
    }

    pub fn should_activate(section_top: f64, viewport_height: f64) -> bool {
        section_top < viewport_height * SECTION_ACTIVATE_FRACTION
    }

    /// Activate `id` with `reveal_items` children. `None` if already active.
    pub fn activate(&mut self, id: &str, reveal_items: usize) -> Option<Activation> {
        if !self.activated.insert(id.to_string()) {
            return None;
        }
        log::debug!("[scroll] section '{id}' arrived");
        Some(Activation {
            id: id.to_string(),
            reveal_delays_ms: (0..reveal_items as u32)
                .map(|i| i * SECTION_REVEAL_STAGGER_MS)
                .collect(),
            spawn_pulse: true,
            trigger_skills_entrance: id == SKILLS_SECTION,
        })
    }

    /// Check a section's position and activate it if it has crossed the line.
    pub fn observe(
        &mut self,
        id: &str,
        section_top: f64,
        viewport_height: f64,
        reveal_items: usize,
    ) -> Option<Activation> {
        if self.is_active(id) || !Self::should_activate(section_top, viewport_height) {
            return None;
        }
        self.activate(id, reveal_items)
    }
}
