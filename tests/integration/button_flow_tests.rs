//! Button press flows through the full service: reports, pulses, and
//! interaction with the rest of the task set.

use fieldnode::app::events::Report;

use crate::mock_hw::Rig;

#[test]
fn press_alone_reports_nothing() {
    let mut rig = Rig::new();
    rig.button(true, 500);
    assert!(rig.sink.button_reports().is_empty());
}

#[test]
fn clicks_report_a_running_count() {
    let mut rig = Rig::new();
    for (down, up) in [(500, 600), (800, 900), (1_100, 1_200)] {
        rig.button(true, down);
        rig.button(false, up);
    }
    assert_eq!(
        rig.sink.button_reports(),
        vec![
            Report::ButtonClick { count: 1 },
            Report::ButtonClick { count: 2 },
            Report::ButtonClick { count: 3 },
        ]
    );
    // Boot pulse then one short pulse per click.
    assert_eq!(rig.ind.pulses, vec![2_000, 100, 100, 100]);
}

#[test]
fn hold_fires_then_duration_on_release() {
    let mut rig = Rig::new();
    rig.button(true, 1_000);
    rig.drive((1_100..=4_100).step_by(100)); // hold due at 3_000
    rig.button(false, 4_200);

    assert_eq!(
        rig.sink.button_reports(),
        vec![
            Report::ButtonHold { count: 1 },
            Report::ButtonHoldDuration { duration: 3_200 },
        ]
    );
    assert_eq!(rig.ind.pulses, vec![2_000, 250]);
}

#[test]
fn short_press_is_a_click_not_a_hold() {
    let mut rig = Rig::new();
    rig.button(true, 1_000);
    rig.drive((1_100..=2_800).step_by(100)); // released before 3_000
    rig.button(false, 2_900);

    assert_eq!(
        rig.sink.button_reports(),
        vec![Report::ButtonClick { count: 1 }]
    );
    // The armed hold timer was torn down with the release.
    assert_eq!(rig.tasks.active_count(), 4);
}

#[test]
fn press_spanning_the_window_end_still_holds() {
    let mut rig = Rig::new();
    rig.drive((500..=4_400).step_by(100));

    // Window ends at 5_000 while the button is down; the hold timer at
    // 6_500 must survive the demotion churn around it.
    rig.button(true, 4_500);
    rig.drive((4_600..=7_000).step_by(100));
    rig.button(false, 7_100);

    assert!(!rig.node.snapshot().in_service_window);
    assert_eq!(
        rig.sink.button_reports(),
        vec![
            Report::ButtonHold { count: 1 },
            Report::ButtonHoldDuration { duration: 2_600 },
        ]
    );
}

#[test]
fn hold_counts_accumulate() {
    let mut rig = Rig::new();
    for start in [1_000, 10_000] {
        rig.button(true, start);
        rig.drive((start + 100..=start + 2_500).step_by(100));
        rig.button(false, start + 2_600);
    }

    assert_eq!(
        rig.sink.button_reports(),
        vec![
            Report::ButtonHold { count: 1 },
            Report::ButtonHoldDuration { duration: 2_600 },
            Report::ButtonHold { count: 2 },
            Report::ButtonHoldDuration { duration: 2_600 },
        ]
    );
    let snap = rig.node.snapshot();
    assert_eq!(snap.clicks, 0);
    assert_eq!(snap.holds, 2);
}
