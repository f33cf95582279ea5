// Host-side checks for the DOM contract.
// The main crate is wasm-only, so the constants file is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use std::collections::HashSet;

#[test]
fn element_ids_are_unique() {
    let ids = [
        THEME_TOGGLE_ID,
        SCOPE_TOGGLE_ID,
        NAV_TOGGLE_ID,
        PROGRESS_BAR_ID,
        SIGNAL_CANVAS_ID,
        HERO_ID,
        HERO_CANVAS_ID,
        SURFACE_SECTION_ID,
        SURFACE_CANVAS_ID,
        FFT_CONTAINER_ID,
        FFT_CANVAS_ID,
        FFT_LABELS_ID,
        FFT_HINT_ID,
        LOADER_ID,
        LOADER_CANVAS_ID,
        LOADER_STATUS_ID,
        LOADER_METER_ID,
        FM_DIAL_ID,
        FM_STRIP_ID,
        BOOT_SCREEN_ID,
        BOOT_LOG_ID,
        BOOT_CURSOR_ID,
        MAIN_CONTENT_ID,
        MCU_CHIP_ID,
        TRACE_SVG_ID,
        TAGLINE_ID,
        STATUS_REGISTER_ID,
    ];
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    for id in ids {
        assert!(!id.is_empty());
        assert!(!id.starts_with('#'), "{id} should be a bare id");
    }
}

#[test]
fn selectors_are_class_selectors() {
    for sel in [
        NAV_SELECTOR,
        SECTION_SELECTOR,
        REVEAL_SELECTOR,
        PARALLAX_SELECTOR,
        CARD_SELECTOR,
        NAV_LINK_SELECTOR,
        DIVIDER_SELECTOR,
        DIVIDER_CANVAS_SELECTOR,
        PERIPHERAL_SELECTOR,
    ] {
        assert!(sel.starts_with('.'), "{sel}");
        assert!(!sel.contains(' '), "{sel}");
    }
}

#[test]
fn theme_classes_differ() {
    assert_ne!(DARK_CLASS, LIGHT_CLASS);
    assert_ne!(NAV_HOVER_CLASS, NAV_RELEASE_CLASS);
    assert_ne!(LOADING_CLASS, LOADED_CLASS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_and_limits_are_sane() {
    assert!(CARD_HIT_MS > 0);
    assert!(MAX_SCENE_DPR >= 1.0);
    assert_ne!(LOADER_SEED, SKILLS_SEED);
    assert!(SVG_NS.starts_with("http://www.w3.org/"));
    assert!(TRACE_TRANSITION.contains("stroke-dashoffset"));
}
