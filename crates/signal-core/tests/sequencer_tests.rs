use signal_core::boot::{
    build_trace, is_skip_key, mcu_edge, peripheral_delay_ms, trace_delay_ms, BootLine,
    BootSequence, BootStep, McuSide, TracePoint, BOOT_LINES,
};
use signal_core::error::ScheduleError;
use signal_core::sequencer::{Latch, LatchState, PhaseSchedule};

#[test]
fn phase_index_is_monotonic_and_progress_bounded() {
    let schedule = PhaseSchedule::from_durations(&[2200.0, 2500.0, 1200.0, 800.0]).unwrap();
    let mut last_index = 0;
    let mut t = -100.0;
    while t < 7000.0 {
        let pos = schedule.locate(t);
        assert!(pos.index >= last_index, "index went backwards at {t}");
        assert!((0.0..=1.0).contains(&pos.progress));
        last_index = pos.index;
        t += 37.0;
    }
}

#[test]
fn schedule_completes_exactly_at_total() {
    let schedule = PhaseSchedule::from_durations(&[100.0, 200.0, 300.0]).unwrap();
    assert_eq!(schedule.total_ms(), 600.0);

    let before = schedule.locate(599.9);
    assert!(!before.complete);
    assert_eq!(before.index, 2);

    let at = schedule.locate(600.0);
    assert!(at.complete);
    assert_eq!(at.index, 3);
    assert_eq!(at.progress, 1.0);
}

#[test]
fn phase_boundaries_start_the_next_phase() {
    let schedule = PhaseSchedule::from_durations(&[100.0, 200.0]).unwrap();
    let pos = schedule.locate(100.0);
    assert_eq!(pos.index, 1);
    assert_eq!(pos.progress, 0.0);
    assert!((schedule.locate(200.0).progress - 0.5).abs() < 1e-9);
    assert_eq!(schedule.start_of(1), 100.0);
}

#[test]
fn negative_elapsed_clamps_to_start() {
    let schedule = PhaseSchedule::from_durations(&[100.0]).unwrap();
    let pos = schedule.locate(-50.0);
    assert_eq!(pos.index, 0);
    assert_eq!(pos.progress, 0.0);
}

#[test]
fn invalid_schedules_are_rejected() {
    assert_eq!(
        PhaseSchedule::from_durations(&[]).unwrap_err(),
        ScheduleError::Empty
    );
    assert!(matches!(
        PhaseSchedule::from_durations(&[100.0, 0.0]),
        Err(ScheduleError::NonPositiveDuration { index: 1, .. })
    ));
    assert!(PhaseSchedule::from_durations(&[f64::NAN]).is_err());
}

#[test]
fn latch_finishes_exactly_once() {
    let mut latch = Latch::new();
    assert_eq!(latch.state(), LatchState::Pending);
    assert!(latch.activate());
    assert!(!latch.activate());
    assert!(latch.finish());
    assert!(!latch.finish());
    assert!(!latch.activate());
    assert_eq!(latch.state(), LatchState::Finished);
}

#[test]
fn boot_advance_prints_every_line_then_completes_once() {
    let mut boot = BootSequence::default();
    assert!(boot.start());
    let mut printed = 0;
    loop {
        match boot.advance() {
            BootStep::Line { .. } => printed += 1,
            BootStep::Complete { fired } => {
                assert!(fired);
                break;
            }
        }
    }
    assert_eq!(printed, BOOT_LINES.len());
    assert_eq!(boot.advance(), BootStep::Complete { fired: false });
    assert!(boot.is_finished());
}

#[test]
fn boot_skip_flushes_remaining_lines_and_fires_once() {
    let mut boot = BootSequence::default();
    boot.start();
    for _ in 0..5 {
        boot.advance();
    }
    let first = boot.skip();
    assert!(first.fired);
    assert_eq!(first.flushed.len(), BOOT_LINES.len() - 5);
    assert_eq!(boot.printed(), BOOT_LINES.len());

    let second = boot.skip();
    assert!(!second.fired);
    assert!(second.flushed.is_empty());
    assert_eq!(boot.advance(), BootStep::Complete { fired: false });
}

#[test]
fn boot_timer_path_after_skip_does_not_fire_again() {
    static LINES: [BootLine; 2] = [
        BootLine {
            text: "a",
            delay_ms: 10,
        },
        BootLine {
            text: "b",
            delay_ms: 10,
        },
    ];
    let mut boot = BootSequence::new(&LINES);
    boot.start();
    assert!(boot.skip().fired);
    assert_eq!(boot.advance(), BootStep::Complete { fired: false });
}

#[test]
fn visible_lines_follow_line_delays() {
    static LINES: [BootLine; 3] = [
        BootLine {
            text: "a",
            delay_ms: 100,
        },
        BootLine {
            text: "b",
            delay_ms: 50,
        },
        BootLine {
            text: "c",
            delay_ms: 10,
        },
    ];
    let boot = BootSequence::new(&LINES);
    assert_eq!(boot.visible_lines_at(0.0), 1);
    assert_eq!(boot.visible_lines_at(120.0), 2);
    assert_eq!(boot.visible_lines_at(155.0), 3);
    assert_eq!(boot.visible_lines_at(10_000.0), 3);
}

#[test]
fn traces_route_straight_or_dog_leg() {
    let mcu = mcu_edge((100.0, 100.0, 80.0, 60.0), McuSide::Top);
    assert_eq!(mcu, TracePoint { x: 140.0, y: 100.0 });
    let top = build_trace(mcu, TracePoint { x: 140.0, y: 20.0 }, McuSide::Top);
    assert_eq!(top, "M 140 100 L 140.5 20");

    let right = build_trace(
        TracePoint { x: 180.0, y: 130.0 },
        TracePoint { x: 300.0, y: 130.0 },
        McuSide::Right,
    );
    assert_eq!(right, "M 180 130 L 200 130 L 200 130 L 300 130");
}

#[test]
fn boot_staggers_and_skip_keys() {
    assert_eq!(trace_delay_ms(0), 50);
    assert_eq!(trace_delay_ms(2), 450);
    assert_eq!(peripheral_delay_ms(3), 750);
    assert!(is_skip_key("Enter"));
    assert!(is_skip_key(" "));
    assert!(is_skip_key("Escape"));
    assert!(!is_skip_key("a"));
}
