use signal_core::scroll::{ScrollState, SectionActivator};

#[test]
fn hero_starts_active() {
    let mut sections = SectionActivator::default();
    assert!(sections.is_active("hero"));
    assert_eq!(sections.len(), 1);
    assert_eq!(sections.activate("hero", 3), None);
}

#[test]
fn sections_activate_once_with_staggered_reveals() {
    let mut sections = SectionActivator::default();
    let about = sections.activate("about", 3).unwrap();
    assert_eq!(about.reveal_delays_ms, vec![0, 70, 140]);
    assert!(about.spawn_pulse);
    assert!(!about.trigger_skills_entrance);
    assert_eq!(sections.activate("about", 3), None);

    let skills = sections.activate("skills", 0).unwrap();
    assert!(skills.trigger_skills_entrance);
    assert!(skills.reveal_delays_ms.is_empty());
}

#[test]
fn observe_waits_for_activation_line() {
    let mut sections = SectionActivator::default();
    // 0.78 * 800 = 624
    assert_eq!(sections.observe("projects", 700.0, 800.0, 2), None);
    assert!(!sections.is_active("projects"));
    assert!(sections.observe("projects", 600.0, 800.0, 2).is_some());
    assert_eq!(sections.observe("projects", 100.0, 800.0, 2), None);
}

#[test]
fn scroll_state_tracks_progress_and_nav() {
    let mut state = ScrollState::default();
    state.update(500.0, 2800.0, 800.0);
    assert_eq!(state.max_scroll, 2000.0);
    assert_eq!(state.progress, 0.25);
    assert_eq!(state.progress_width(), "25%");
    assert!(state.nav_scrolled);
    assert_eq!(state.parallax_transform(0.3), "translateY(150px)");

    // short page: no division by zero, never scrolled
    state.update(0.0, 500.0, 800.0);
    assert_eq!(state.max_scroll, 1.0);
    assert_eq!(state.progress_width(), "0%");
    assert!(!state.nav_scrolled);
}
