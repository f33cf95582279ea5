use signal_core::tilt::{
    tilt_transform, CardRect, CardTilt, TiltConfig, HOVER_TRANSITION, LEAVE_TRANSITION,
    MAGNETIC_TRANSITION,
};

fn one_card() -> CardTilt {
    CardTilt::new(
        &[CardRect::from_bounds(100.0, 100.0, 200.0, 100.0)],
        TiltConfig::default(),
    )
}

#[test]
fn hover_sets_rotation_synchronously() {
    let mut tilt = one_card();
    let enter = tilt.enter(0).unwrap();
    assert_eq!(enter.transition, Some(HOVER_TRANSITION));

    // right edge, top edge of a card centered at (200, 150)
    let update = tilt.hover_move(0, 300.0, 100.0).unwrap();
    let card = tilt.card(0).unwrap();
    assert_eq!(card.current, (8.0, 8.0));
    assert_eq!(card.current, card.target);
    assert_eq!(update.transform.as_deref(), Some(tilt_transform(8.0, 8.0).as_str()));
    assert_eq!(card.transform(), "perspective(800px) rotateX(8.00deg) rotateY(8.00deg)");
}

#[test]
fn hovered_cards_ignore_the_magnetic_pass() {
    let mut tilt = one_card();
    tilt.enter(0);
    tilt.hover_move(0, 250.0, 150.0);
    tilt.track_pointer(250.0, 150.0);
    assert!(tilt.update().is_empty());
    assert_eq!(tilt.card(0).unwrap().current, (0.0, 4.0));
}

#[test]
fn leave_zeroes_state_before_the_next_frame() {
    let mut tilt = one_card();
    tilt.enter(0);
    tilt.hover_move(0, 120.0, 190.0);
    let leave = tilt.leave(0).unwrap();
    assert_eq!(leave.transition, Some(LEAVE_TRANSITION));
    assert_eq!(leave.transform.as_deref(), Some(""));

    let card = tilt.card(0).unwrap();
    assert_eq!(card.current, (0.0, 0.0));
    assert_eq!(card.target, (0.0, 0.0));
    assert!(!card.hovering);
}

#[test]
fn magnetic_pull_eases_toward_target() {
    let mut tilt = one_card();
    // 60px right of center: half strength
    tilt.track_pointer(260.0, 150.0);
    let updates = tilt.update();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].transition, Some(MAGNETIC_TRANSITION));

    let card = tilt.card(0).unwrap();
    assert!((card.target.1 - 1.25).abs() < 1e-12);
    assert!(card.target.0.abs() < 1e-12);
    assert!((card.current.1 - 1.25 * 0.12).abs() < 1e-12);
}

#[test]
fn pointer_outside_range_pulls_nothing() {
    let mut tilt = one_card();
    tilt.track_pointer(900.0, 900.0);
    assert!(tilt.update().is_empty());
    assert_eq!(tilt.card(0).unwrap().transform(), "");
}

#[test]
fn settled_card_clears_inline_transform() {
    let mut tilt = one_card();
    tilt.track_pointer(260.0, 150.0);
    for _ in 0..10 {
        tilt.update();
    }
    assert!(!tilt.card(0).unwrap().transform().is_empty());

    tilt.track_pointer(2000.0, 2000.0);
    let mut cleared = false;
    for _ in 0..200 {
        for u in tilt.update() {
            if u.transform.as_deref() == Some("") {
                assert_eq!(u.transition, Some(""));
                cleared = true;
            }
        }
        if cleared {
            break;
        }
    }
    assert!(cleared);
    let card = tilt.card(0).unwrap();
    assert_eq!(card.current, (0.0, 0.0));
    assert_eq!(card.transform(), "");
    assert_eq!(card.transition(), "");
    // nothing left to write once at rest
    assert!(tilt.update().is_empty());
}
