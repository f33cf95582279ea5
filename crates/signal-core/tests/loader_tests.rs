mod common;

use common::{Op, RecordingCanvas};
use signal_core::canvas::Viewport;
use signal_core::loader::{
    carrier_jitter, FmDial, HudUpdate, LoaderTiming, SignalLoader, LOADER_BG,
};

fn loader() -> (SignalLoader, RecordingCanvas) {
    let mut ctx = RecordingCanvas::default();
    let mut loader =
        SignalLoader::new(LoaderTiming::default(), FmDial::default(), 0.0, 7).unwrap();
    loader.resize(&mut ctx, Viewport::new(400.0, 200.0, 1.0));
    (loader, ctx)
}

#[test]
fn hud_updates_only_on_phase_change() {
    let (mut loader, mut ctx) = loader();
    let first = loader.frame(&mut ctx, 100.0, 300.0);
    let hud = first.hud.unwrap();
    assert_eq!(hud.status, Some("SCANNING FM BAND..."));
    assert_eq!(hud.meter_lit, [true, false, false, false]);
    assert!(first.strip_translate_px.is_some());
    assert!(!first.locked);
    assert!(ctx.ops.contains(&Op::FillStyle(LOADER_BG.to_string())));

    assert_eq!(loader.frame(&mut ctx, 200.0, 300.0).hud, None);
    let lock = loader.frame(&mut ctx, 2300.0, 300.0).hud.unwrap();
    assert_eq!(lock.status, Some("CARRIER DETECTED  fc = 95.12 MHz"));
}

#[test]
fn portfolio_starts_once_during_reconstruct() {
    let (mut loader, mut ctx) = loader();
    loader.frame(&mut ctx, 100.0, 300.0);
    let reconstruct = loader.frame(&mut ctx, 4800.0, 300.0);
    assert!(reconstruct.init_portfolio);
    assert!(reconstruct.locked);
    assert!(loader.portfolio_started());
    assert!(!loader.frame(&mut ctx, 4900.0, 300.0).init_portfolio);

    let dissolve = loader.frame(&mut ctx, 6300.0, 300.0);
    assert_eq!(dissolve.overlay_opacity, Some(0.5));
    assert_eq!(dissolve.strip_translate_px, None);
    assert_eq!(
        dissolve.hud,
        Some(HudUpdate {
            status: None,
            meter_lit: [true; 4],
        })
    );

    let end = loader.frame(&mut ctx, 6700.0, 300.0);
    assert!(end.finished);
    assert!(!end.init_portfolio);
    assert_eq!(end.overlay_opacity, Some(0.0));
    assert!(loader.is_finished());
    assert_eq!(loader.frame(&mut ctx, 6800.0, 300.0), Default::default());
}

#[test]
fn skip_finishes_and_starts_portfolio_once() {
    let (mut loader, mut ctx) = loader();
    loader.frame(&mut ctx, 100.0, 300.0);
    let skipped = loader.skip();
    assert!(skipped.finished);
    assert!(skipped.init_portfolio);

    let again = loader.skip();
    assert!(!again.finished);
    assert!(!again.init_portfolio);
    assert!(!loader.frame(&mut ctx, 4800.0, 300.0).init_portfolio);
}

#[test]
fn skip_after_reconstruct_does_not_restart_portfolio() {
    let (mut loader, mut ctx) = loader();
    assert!(loader.frame(&mut ctx, 4800.0, 300.0).init_portfolio);
    let skipped = loader.skip();
    assert!(skipped.finished);
    assert!(!skipped.init_portfolio);
}

#[test]
fn dial_scans_then_eases_into_target() {
    let dial = FmDial::default();
    assert!((dial.frequency(0, 0.0) - 93.12).abs() < 1e-9);
    assert!((dial.frequency(0, 1.0) - 94.52).abs() < 1e-9);
    assert!((dial.frequency(1, 1.0) - 95.12).abs() < 1e-9);
    assert!(dial.frequency(1, 0.5) > dial.frequency(0, 1.0));
    assert_eq!(dial.frequency(2, 0.3), 95.12);
    assert_eq!(dial.strip_offset(87.5, 300.0), 150.0);

    assert!(FmDial::is_locked(1, 0.8));
    assert!(!FmDial::is_locked(1, 0.7));
    assert!(!FmDial::is_locked(0, 0.9));
    assert!(FmDial::is_locked(2, 0.0));
}

#[test]
fn dial_ticks_cover_band_with_one_target() {
    let ticks = FmDial::default().ticks();
    assert_eq!(ticks.len(), 206);
    assert_eq!(ticks.iter().filter(|t| t.major).count(), 21);
    assert_eq!(ticks.iter().filter(|t| t.target).count(), 1);
    let first_major = ticks.iter().find(|t| t.major).unwrap();
    assert_eq!(first_major.label.as_deref(), Some("88.0"));
}

#[test]
fn jitter_falls_off_cubically() {
    assert_eq!(carrier_jitter(1.0, 200.0), 0.0);
    assert!((carrier_jitter(0.0, 200.0) - 12.0).abs() < 1e-12);
    assert!((carrier_jitter(0.5, 200.0) - 1.5).abs() < 1e-12);
}

#[test]
fn zero_length_phase_is_rejected() {
    let timing = LoaderTiming {
        lock_ms: 0.0,
        ..Default::default()
    };
    assert!(SignalLoader::new(timing, FmDial::default(), 0.0, 1).is_err());
}
