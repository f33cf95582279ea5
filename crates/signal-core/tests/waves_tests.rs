mod common;

use common::{Op, RecordingCanvas};
use signal_core::canvas::{Renderer, Viewport};
use signal_core::palette::Palette;
use signal_core::waves::divider::parse_strength;
use signal_core::waves::hero::{fadeout_alpha, MIN_SWEEP_S};
use signal_core::waves::{
    bit_level, clock_level, nav_wave_path, Divider, DividerLayout, DividerMode, HeroCarrier,
    HeroCarrierConfig, NavLinkState, NavWaves,
};

fn visible() -> DividerLayout {
    DividerLayout {
        top: 300.0,
        bottom: 360.0,
        viewport_height: 800.0,
    }
}

fn divider(mode: DividerMode) -> Divider<RecordingCanvas> {
    let mut d = Divider::new(RecordingCanvas::default(), mode, 0.2, &Palette::default());
    d.resize(Viewport::new(400.0, 60.0, 1.0));
    d.set_layout(visible());
    d
}

#[test]
fn bit_pattern_is_stable_and_mixed() {
    let first: Vec<bool> = (0..32).map(bit_level).collect();
    let second: Vec<bool> = (0..32).map(bit_level).collect();
    assert_eq!(first, second);
    assert!(first.iter().any(|b| *b));
    assert!(first.iter().any(|b| !*b));
}

#[test]
fn clock_alternates_including_negative_indices() {
    assert!(clock_level(0));
    assert!(!clock_level(1));
    assert!(!clock_level(-1));
    assert!(clock_level(-2));
}

#[test]
fn divider_attributes_parse_with_fallbacks() {
    assert_eq!(DividerMode::parse(Some("digital")), DividerMode::Digital);
    assert_eq!(DividerMode::parse(Some("txrx")), DividerMode::TxRx);
    assert_eq!(DividerMode::parse(Some("fm")), DividerMode::Am);
    assert_eq!(DividerMode::parse(None), DividerMode::Am);

    assert_eq!(parse_strength(Some("0.7")), 0.7);
    assert_eq!(parse_strength(Some("0")), 0.2);
    assert_eq!(parse_strength(Some("loud")), 0.2);
    assert_eq!(parse_strength(None), 0.2);
}

#[test]
fn divider_culls_outside_margin() {
    let below = DividerLayout {
        top: 851.0,
        bottom: 911.0,
        viewport_height: 800.0,
    };
    let above = DividerLayout {
        top: -120.0,
        bottom: -51.0,
        viewport_height: 800.0,
    };
    let edge = DividerLayout {
        top: 849.0,
        bottom: 909.0,
        viewport_height: 800.0,
    };
    assert!(!below.is_visible());
    assert!(!above.is_visible());
    assert!(edge.is_visible());

    let mut d = divider(DividerMode::Am);
    d.set_layout(below);
    let before = d.canvas().ops.len();
    d.render(1000.0);
    assert_eq!(d.canvas().ops.len(), before);
}

#[test]
fn divider_scroll_progress_spans_entry_to_exit() {
    let entering = DividerLayout {
        top: 800.0,
        bottom: 860.0,
        viewport_height: 800.0,
    };
    let gone = DividerLayout {
        top: -60.0,
        bottom: 0.0,
        viewport_height: 800.0,
    };
    assert_eq!(entering.scroll_progress(), Some(0.0));
    assert_eq!(gone.scroll_progress(), Some(1.0));

    let mut d = divider(DividerMode::Am);
    d.set_layout(gone);
    assert_eq!(d.scroll_progress(), 1.0);
}

#[test]
fn am_divider_strokes_envelopes_and_carrier() {
    let mut d = divider(DividerMode::Am);
    d.render(1000.0);
    let ctx = d.canvas();
    assert!(ctx.ops.contains(&Op::ClearRect(0.0, 0.0, 400.0, 60.0)));
    assert_eq!(ctx.strokes(), 3);
    assert!(ctx.texts().is_empty());
}

#[test]
fn digital_divider_labels_data_and_clock() {
    let mut d = divider(DividerMode::Digital);
    d.render(1000.0);
    let texts = d.canvas().texts();
    assert!(texts.contains(&"CLK".to_string()));
    assert!(texts.contains(&"DATA".to_string()));
}

#[test]
fn txrx_divider_draws_both_antennas() {
    let mut d = divider(DividerMode::TxRx);
    d.render(0.0);
    assert_eq!(d.canvas().texts(), vec!["Tx".to_string(), "Rx".to_string()]);
    assert_eq!(d.canvas().count(|op| *op == Op::Save), 2);
}

#[test]
fn divider_follows_palette_updates() {
    let mut d = divider(DividerMode::Am);
    d.update_palette(&Palette::from_tokens("#ff0000", "#00ff00", true));
    d.render(0.0);
    let styles = d.canvas().stroke_styles();
    assert!(styles.contains(&"rgba(255,0,0,0.65)".to_string()));
    assert!(styles.contains(&"rgba(0,255,0,0.3)".to_string()));
}

fn hero() -> HeroCarrier<RecordingCanvas> {
    let mut h = HeroCarrier::new(
        RecordingCanvas::with_id(0),
        RecordingCanvas::with_id(1),
        RecordingCanvas::with_id(2),
        HeroCarrierConfig::default(),
        &Palette::default(),
    );
    h.resize(Viewport::new(600.0, 300.0, 2.0));
    h
}

fn last_surface_draw(ctx: &RecordingCanvas) -> Option<(usize, f64)> {
    ctx.ops.iter().rev().find_map(|op| match op {
        Op::DrawSurface(id, alpha) => Some((*id, *alpha)),
        _ => None,
    })
}

#[test]
fn hero_draws_ghost_of_previous_sweep_with_labels() {
    let mut h = hero();
    h.render(1000.0);
    let main = h.main();
    assert_eq!(main.backing, (1200, 600));
    assert_eq!(last_surface_draw(main), Some((1, 0.3)));
    let texts = main.texts();
    for label in ["m(t)", "c(t)", "AM", "FM", "mu = 0.70", "beta = 5.00"] {
        assert!(texts.contains(&label.to_string()), "missing {label}");
    }
    assert!(!h.is_fading());
}

#[test]
fn hero_wrap_crossfades_then_returns_to_ghost() {
    let mut h = hero();
    h.render(14_000.0);
    h.render(15_500.0);
    assert!(h.is_fading());
    assert_eq!(last_surface_draw(h.main()), Some((2, 1.0)));

    h.render(16_400.0);
    assert!(h.is_fading());
    h.render(17_300.0);
    assert!(!h.is_fading());
    let (id, alpha) = last_surface_draw(h.main()).unwrap();
    assert_eq!(id, 2);
    assert!((alpha - 0.15).abs() < 1e-9);

    h.render(18_000.0);
    assert_eq!(last_surface_draw(h.main()), Some((1, 0.3)));
}

#[test]
fn fadeout_settles_at_half_ghost_alpha() {
    assert_eq!(fadeout_alpha(0.0, 1800.0, 0.3), (1.0, false));
    let (mid, done) = fadeout_alpha(900.0, 1800.0, 0.3);
    assert!(!done);
    assert!((mid - (1.0 - 0.75 * 0.85)).abs() < 1e-12);
    let (end, done) = fadeout_alpha(5000.0, 1800.0, 0.3);
    assert!(done);
    assert!((end - 0.15).abs() < 1e-12);
    assert!(fadeout_alpha(0.0, 0.0, 0.3).1);
}

#[test]
fn hero_sweep_progress_wraps() {
    let h = hero();
    assert_eq!(h.sweep_progress(0.0), 0.0);
    assert!((h.sweep_progress(7_500.0) - 0.5).abs() < 1e-12);
    assert!((h.sweep_progress(22_500.0) - 0.5).abs() < 1e-12);
}

#[test]
fn hero_zero_sweep_is_raised_to_minimum() {
    let mut h = HeroCarrier::new(
        RecordingCanvas::with_id(0),
        RecordingCanvas::with_id(1),
        RecordingCanvas::with_id(2),
        HeroCarrierConfig {
            sweep_s: 0.0,
            ..HeroCarrierConfig::default()
        },
        &Palette::default(),
    );
    h.resize(Viewport::new(600.0, 300.0, 1.0));
    for t in [0.0, 50.0, 1_234.0] {
        let p = h.sweep_progress(t);
        assert!(p.is_finite() && (0.0..1.0).contains(&p), "{p}");
    }
    assert!((h.sweep_progress(MIN_SWEEP_S * 500.0) - 0.5).abs() < 1e-9);
    h.render(1_234.0);
}

#[test]
fn nav_paths_are_empty_when_idle() {
    assert_eq!(nav_wave_path(NavLinkState::Idle, 0.0, 1000.0), "");
    let path = nav_wave_path(NavLinkState::Hover, 0.0, 1000.0);
    assert!(path.starts_with("M0 10 L0.00 "));
    assert_eq!(path.matches(" L").count(), 26);
    assert!(path.contains(" L100.00 "));
}

#[test]
fn nav_release_rings_out_then_idles() {
    let mut nav = NavWaves::new(2);
    nav.enter(0);
    assert_eq!(nav.state(0), NavLinkState::Hover);
    nav.leave(0, 1000.0);
    assert_eq!(nav.state(0), NavLinkState::Release { until_ms: 1250 });

    let paths = nav.update(0.0, 1249.0);
    assert!(!paths[0].is_empty());
    assert!(paths[1].is_empty());

    let paths = nav.update(0.0, 1250.0);
    assert!(paths[0].is_empty());
    assert_eq!(nav.state(0), NavLinkState::Idle);
    assert_eq!(nav.state(7), NavLinkState::Idle);
}
