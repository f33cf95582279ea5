use crate::constants::{NAV_RELEASE_MS, NAV_STABLE_SPEED};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavLinkState {
    #[default]
    Idle,
    Hover,
    /// Pointer just left; the wave rings out until `until_ms`.
    Release { until_ms: u64 },
}

/// SVG `d` attribute for one nav link's wave in a `0 0 100 20` viewBox.
///
/// Idle links get an empty path.
pub fn nav_wave_path(state: NavLinkState, smooth_speed: f64, time_ms: f64) -> String {
    let release = match state {
        NavLinkState::Idle => return String::new(),
        NavLinkState::Hover => false,
        NavLinkState::Release { .. } => true,
    };
    let t = time_ms * 0.001;
    let stable = smooth_speed < NAV_STABLE_SPEED;
    let amp = if release {
        3.2
    } else if stable {
        0.9
    } else {
        2.5
    };
    let freq = if stable { 0.26 } else { 0.4 };
    let jitter = if release {
        0.24
    } else if stable {
        0.08
    } else {
        0.2
    };

    let mut d = String::from("M0 10");
    for x in (0..=100).step_by(4) {
        let x = x as f64;
        let y = 10.0 + amp * (x * freq + t * 6.0 + (t * 2.0 + x * 0.08).sin() * jitter).sin();
        d.push_str(&format!(" L{x:.2} {y:.2}"));
    }
    d
}

/// Hover state of every nav link.
#[derive(Clone, Debug, Default)]
pub struct NavWaves {
    links: Vec<NavLinkState>,
}

impl NavWaves {
    pub fn new(count: usize) -> Self {
        Self {
            links: vec![NavLinkState::Idle; count],
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn state(&self, index: usize) -> NavLinkState {
        self.links.get(index).copied().unwrap_or_default()
    }

    pub fn enter(&mut self, index: usize) {
        if let Some(link) = self.links.get_mut(index) {
            *link = NavLinkState::Hover;
        }
    }

    pub fn leave(&mut self, index: usize, now_ms: f64) {
        if let Some(link) = self.links.get_mut(index) {
            *link = NavLinkState::Release {
                until_ms: now_ms.max(0.0) as u64 + NAV_RELEASE_MS as u64,
            };
        }
    }

    /// Expire finished releases and build every link's path for this frame.
    pub fn update(&mut self, smooth_speed: f64, time_ms: f64) -> Vec<String> {
        self.links
            .iter_mut()
            .map(|link| {
                if let NavLinkState::Release { until_ms } = *link {
                    if time_ms >= until_ms as f64 {
                        *link = NavLinkState::Idle;
                    }
                }
                nav_wave_path(*link, smooth_speed, time_ms)
            })
            .collect()
    }
}
