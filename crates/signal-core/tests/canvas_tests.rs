mod common;

use common::{Op, RecordingCanvas};
use signal_core::canvas::{resize_surface, sample_path, Viewport};
use signal_core::pointer::{normalize_point, PointerTracker};

#[test]
fn backing_store_rounds_up_and_transform_is_replaced() {
    let mut canvas = RecordingCanvas::default();
    let vp = Viewport::new(100.5, 40.2, 1.5);
    resize_surface(&mut canvas, vp);
    assert_eq!(canvas.backing, (151, 61));
    assert_eq!(canvas.transform, [1.5, 0.0, 0.0, 1.5, 0.0, 0.0]);

    let first = canvas.ops.clone();
    canvas.clear();
    resize_surface(&mut canvas, vp);
    assert_eq!(canvas.ops, first);
}

#[test]
fn viewport_sanitizes_inputs() {
    let vp = Viewport::new(-10.0, 20.0, f64::NAN);
    assert_eq!(vp.dpr, 1.0);
    assert_eq!(vp.width, 0.0);
    assert!(vp.is_empty());
    assert!(!Viewport::new(1.0, 1.0, 2.0).is_empty());
}

#[test]
fn sample_path_moves_once_then_lines() {
    let mut canvas = RecordingCanvas::default();
    sample_path(&mut canvas, 0.0, 10.0, 5.0, |x| x * 2.0);
    assert_eq!(
        canvas.ops,
        vec![
            Op::BeginPath,
            Op::MoveTo(0.0, 0.0),
            Op::LineTo(5.0, 10.0),
            Op::LineTo(10.0, 20.0),
        ]
    );
}

#[test]
fn pointer_speed_uses_dt_floor() {
    let mut p = PointerTracker::new(200.0, 100.0, 0.0);
    assert_eq!((p.x, p.y), (100.0, 50.0));

    // 2ms apart still divides by 16ms
    p.on_move(132.0, 50.0, 2.0);
    assert_eq!(p.speed, 2.0);
    assert_eq!(p.vx, 2.0);
    assert!((p.smooth_speed - 0.3).abs() < 1e-12);

    p.on_move(132.0, 50.0, 100.0);
    assert_eq!(p.speed, 0.0);
    assert!((p.smooth_speed - 0.255).abs() < 1e-12);
}

#[test]
fn pointer_normalization_clamps() {
    let n = normalize_point(-5.0, 150.0, 100.0, 100.0);
    assert_eq!((n.x, n.y), (0.0, 1.0));
    let center = normalize_point(1.0, 1.0, 0.0, 0.0);
    assert_eq!((center.x, center.y), (0.5, 0.5));
}
