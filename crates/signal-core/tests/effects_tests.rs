mod common;

use common::{Op, RecordingCanvas};
use signal_core::canvas::Composite;
use signal_core::effects::{
    ease_out_quad, fade_envelope, BoundedPool, HitTarget, IntensityTier, PulsePool, RipplePool,
    SectionPulse,
};
use signal_core::Palette;

const FAST: f64 = 2.0;

fn pulse(born: f64) -> SectionPulse {
    SectionPulse {
        x: 0.0,
        y_doc: 0.0,
        born,
        life: 1000.0,
    }
}

#[test]
fn fast_spawns_are_rate_limited() {
    let mut pool = RipplePool::default();
    let accepted: Vec<bool> = [(0.0, 0.0), (50.0, 50.0), (150.0, 100.0)]
        .iter()
        .map(|&(t, x)| pool.spawn(x, 0.0, FAST, t))
        .collect();
    assert_eq!(accepted, vec![true, false, true]);
    assert_eq!(pool.len(), 2);
}

#[test]
fn slow_pointer_waits_longer_between_spawns() {
    let mut pool = RipplePool::default();
    assert!(pool.spawn(0.0, 0.0, 0.1, 0.0));
    assert!(!pool.spawn(100.0, 0.0, 0.1, 300.0));
    assert!(pool.spawn(100.0, 0.0, 0.1, 480.0));
}

#[test]
fn near_duplicate_positions_are_rejected_once_pool_has_entities() {
    let mut pool = RipplePool::default();
    assert!(pool.spawn(10.0, 10.0, FAST, 0.0));
    assert!(!pool.spawn(14.0, 12.0, FAST, 500.0));
    assert!(pool.spawn(30.0, 10.0, FAST, 500.0));
}

#[test]
fn spawn_bakes_tier_parameters() {
    let mut pool = RipplePool::default();
    pool.spawn(0.0, 0.0, 0.5, 0.0);
    let ripple = pool.iter().next().unwrap();
    assert_eq!(ripple.rings, IntensityTier::Medium.rings());
    assert_eq!(ripple.max_radius, 130.0);
    assert_eq!(ripple.alpha_scale, 0.32);
}

#[test]
fn pool_evicts_oldest_first_at_capacity() {
    let mut pool = BoundedPool::new(4);
    let evicted: usize = (0..7).map(|i| pool.push(pulse(i as f64))).sum();
    assert_eq!(evicted, 3);
    assert_eq!(pool.len(), 4);
    let borns: Vec<f64> = pool.iter().map(|p| p.born).collect();
    assert_eq!(borns, vec![3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn ripple_lives_for_exactly_its_lifetime() {
    let palette = Palette::default();
    let mut ctx = RecordingCanvas::default();
    let mut pool = RipplePool::default();
    pool.spawn(100.0, 100.0, FAST, 1000.0);

    pool.draw(&mut ctx, 1000.0, &palette, &[]);
    assert_eq!(pool.len(), 1);
    pool.draw(&mut ctx, 2099.0, &palette, &[]);
    assert_eq!(pool.len(), 1);
    pool.draw(&mut ctx, 2100.0, &palette, &[]);
    assert!(pool.is_empty());
}

#[test]
fn leading_ring_hits_each_target_once() {
    let palette = Palette::default();
    let mut ctx = RecordingCanvas::default();
    let mut pool = RipplePool::default();
    pool.spawn(0.0, 0.0, FAST, 0.0);
    let targets = [HitTarget { x: 30.0, y: 0.0 }, HitTarget { x: 900.0, y: 0.0 }];

    assert_eq!(pool.draw(&mut ctx, 11.0, &palette, &targets), vec![0]);
    assert!(pool.draw(&mut ctx, 40.0, &palette, &targets).is_empty());
    assert_eq!(pool.iter().next().unwrap().hits(), &[0]);
}

#[test]
fn staggered_rings_are_born_late() {
    let palette = Palette::default();
    let mut ctx = RecordingCanvas::default();
    let mut pool = RipplePool::default();
    pool.spawn(0.0, 0.0, FAST, 0.0);
    // eased progress ~0.04: only ring 0 has started
    pool.draw(&mut ctx, 22.0, &palette, &[]);
    assert_eq!(ctx.count(|op| matches!(op, Op::Arc(..))), 1);

    ctx.clear();
    pool.draw(&mut ctx, 500.0, &palette, &[]);
    assert_eq!(ctx.count(|op| matches!(op, Op::Arc(..))), 3);
}

#[test]
fn easing_and_envelope_shapes() {
    assert_eq!(ease_out_quad(0.0), 0.0);
    assert_eq!(ease_out_quad(1.0), 1.0);
    assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-12);
    assert!((fade_envelope(0.15, 0.3) - 0.5).abs() < 1e-12);
    assert!((fade_envelope(0.3, 0.3) - 1.0).abs() < 1e-12);
    assert!(fade_envelope(1.0, 0.3).abs() < 1e-12);
}

#[test]
fn section_pulses_draw_additively_and_cull_off_screen() {
    let palette = Palette::default();
    let mut pulses = PulsePool::default();
    pulses.spawn_for_section(0.0, 100.0, 800.0, 0.0, 0.0);

    let mut ctx = RecordingCanvas::default();
    pulses.draw(&mut ctx, 500.0, 0.0, 800.0, &palette, false);
    assert!(ctx.ops.contains(&Op::Composite(Composite::Lighter)));
    assert_eq!(ctx.count(|op| matches!(op, Op::Arc(..))), 3);
    assert!(ctx.ops.contains(&Op::Arc(400.0, 170.0, 24.0 + 500.0 / 1150.0 * 140.0)));

    let mut far = RecordingCanvas::default();
    pulses.draw(&mut far, 500.0, 2000.0, 800.0, &palette, false);
    assert_eq!(far.count(|op| matches!(op, Op::Arc(..))), 0);
    assert_eq!(pulses.len(), 1);

    pulses.draw(&mut far, 1150.0, 0.0, 800.0, &palette, false);
    assert!(pulses.is_empty());
}
