//! Canvas waveform renderers: section dividers, the hero carrier scope and
//! the nav hover waves.

pub mod divider;
pub mod hero;
pub mod nav;

pub use divider::{Divider, DividerLayout, DividerMode};
pub use hero::{HeroCarrier, HeroCarrierConfig};
pub use nav::{nav_wave_path, NavLinkState, NavWaves};

/// Level of data bit `index` in the digital divider.
///
/// A hashed sine rather than an RNG so every frame agrees on the pattern
/// without storing it.
#[inline]
pub fn bit_level(index: i64) -> bool {
    ((index as f64) * 127.1 + 311.7).sin() > 0.0
}

/// Level of clock bit `index`: strictly alternating by parity.
#[inline]
pub fn clock_level(index: i64) -> bool {
    index.rem_euclid(2) == 0
}
