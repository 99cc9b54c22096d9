//! End-to-end node behavior against mock hardware.
//!
//! Each test wires a [`NodeService`] to the mocks, drives the scheduler
//! over a scripted timeline, and asserts on the emitted report history.

use fieldnode::app::events::Report;
use fieldnode::orientation::{Face, Vector3};

use crate::mock_hw::Rig;

#[test]
fn boot_pulses_and_polls_fast() {
    let mut rig = Rig::new();
    assert!(rig.sink.reports.is_empty());
    assert_eq!(rig.ind.pulses, vec![2_000]);
    // Two adaptive polls, the window end, the battery poll.
    assert_eq!(rig.tasks.active_count(), 4);

    rig.drive((500..=3_000).step_by(500));
    assert_eq!(rig.hw.temperature_reads, 3);
    assert_eq!(rig.hw.acceleration_reads, 3);
    assert_eq!(rig.sink.temperatures(), vec![22.5]);
    assert_eq!(rig.sink.orientations(), vec![Face::FlatUp]);
}

#[test]
fn service_window_end_demotes_poll_cadence() {
    let mut rig = Rig::new();

    // Window open: polls at 1s from t=1000 through t=5000.
    rig.drive((500..=5_000).step_by(500));
    assert_eq!(rig.hw.temperature_reads, 5);
    assert!(!rig.node.snapshot().in_service_window);

    // The fire already planned for 6000 lands, then every 4000.
    rig.drive((5_500..=13_000).step_by(500));
    assert_eq!(rig.hw.temperature_reads, 7);
    // Both adaptive polls sit at 14_000 now, battery at 20_000.
    assert_eq!(rig.tasks.next_wake(), Some(14_000));
}

#[test]
fn temperature_reports_respect_the_gate() {
    let mut rig = Rig::new();

    rig.run_at(1_000); // first sample always emits
    rig.run_at(2_000); // unchanged, fresh: silent

    rig.hw.temperature = 22.9; // moved 0.4 >= 0.2
    rig.run_at(3_000);

    rig.hw.temperature = 22.95; // moved 0.05: silent until stale
    rig.run_at(4_000);
    rig.run_at(5_000);
    rig.run_at(6_000); // 3000 ticks since last emit: stale re-emit

    assert_eq!(rig.sink.temperatures(), vec![22.5, 22.9, 22.95]);
}

#[test]
fn orientation_flip_reports_exactly_once() {
    let mut rig = Rig::new();

    rig.drive((1_000..=3_000).step_by(1_000));
    assert_eq!(rig.sink.orientations(), vec![Face::FlatUp]);

    rig.hw.acceleration = Vector3::new(0.0, 0.0, -1.0);
    rig.drive((4_000..=5_000).step_by(1_000));
    assert_eq!(rig.sink.orientations(), vec![Face::FlatUp, Face::FlatDown]);
}

#[test]
fn battery_poll_ignores_the_service_window() {
    let mut rig = Rig::new();

    // Crosses the window end at 5000; battery cadence must not change.
    rig.drive((500..=25_000).step_by(500));
    assert_eq!(rig.hw.battery_reads, 2); // at 10_000 and 20_000
    assert_eq!(rig.sink.batteries(), vec![3.1, 3.1]);
}

#[test]
fn failed_reads_skip_cycles_but_not_the_schedule() {
    let mut rig = Rig::new();
    rig.hw.fail_temperature = true;
    rig.hw.fail_battery = true;

    rig.drive((1_000..=3_000).step_by(1_000));
    // Kept being polled, nothing reported.
    assert_eq!(rig.hw.temperature_reads, 3);
    assert!(rig.sink.temperatures().is_empty());

    // Recovery: the next good sample is the first ever for the gate.
    rig.hw.fail_temperature = false;
    rig.hw.temperature = 23.0;
    rig.run_at(4_000);
    assert_eq!(rig.sink.temperatures(), vec![23.0]);

    rig.drive((4_500..=10_000).step_by(500));
    assert_eq!(rig.hw.battery_reads, 1);
    assert!(rig.sink.batteries().is_empty());

    rig.hw.fail_battery = false;
    rig.drive((10_500..=20_000).step_by(500));
    assert_eq!(rig.sink.batteries(), vec![3.1]);
}

/// Full scripted run: click, warm-up, hold, flip, across the window end.
#[test]
fn day_in_the_life() {
    let mut rig = Rig::new();

    for t in (100..=16_000).step_by(100) {
        match t {
            1_200 => rig.button(true, t),
            1_400 => rig.button(false, t),
            2_600 => rig.hw.temperature = 24.0,
            4_000 => rig.button(true, t),
            6_500 => rig.button(false, t),
            7_200 => rig.hw.acceleration = Vector3::new(0.0, 0.0, -1.0),
            _ => {}
        }
        rig.run_at(t);
    }

    assert_eq!(
        rig.sink.button_reports(),
        vec![
            Report::ButtonClick { count: 1 },
            Report::ButtonHold { count: 1 },
            Report::ButtonHoldDuration { duration: 2_500 },
        ]
    );

    // 22.5 opens, 24.0 on the step, then stale re-emits at the
    // 3000-tick staleness bound (polls at 6000, 10_000, 14_000).
    assert_eq!(
        rig.sink.temperatures(),
        vec![22.5, 24.0, 24.0, 24.0, 24.0]
    );

    assert_eq!(rig.sink.orientations(), vec![Face::FlatUp, Face::FlatDown]);
    assert_eq!(rig.sink.batteries(), vec![3.1]);

    // Boot pulse, click pulse, hold pulse.
    assert_eq!(rig.ind.pulses, vec![2_000, 100, 250]);

    let snap = rig.node.snapshot();
    assert_eq!(snap.clicks, 1);
    assert_eq!(snap.holds, 1);
    assert!(!snap.in_service_window);
    assert_eq!(snap.orientation, Face::FlatDown);
    assert_eq!(snap.last_temperature, Some(24.0));
}
