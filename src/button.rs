//! User button press classifier.
//!
//! ## Hardware
//!
//! Active-low momentary switch.  The pin adapter debounces and delivers
//! clean press/release edges; this module only classifies them.
//!
//! ## Gesture detection
//!
//! | Gesture       | Condition                         | Event          |
//! |---------------|-----------------------------------|----------------|
//! | Click         | Release before the hold threshold | `Clicked`      |
//! | Hold          | Still pressed at the threshold    | `HoldFired`    |
//! | Hold released | Release after a reported hold     | `HoldReleased` |
//!
//! The hold threshold is a scheduler one-shot armed on the press edge
//! and disarmed on release, so a hold is reported the moment the
//! threshold passes rather than at the eventual release.  Click and hold
//! counters are lifetime totals and saturate rather than wrap.

use log::{debug, warn};

use crate::app::ports::TaskKind;
use crate::scheduler::{Scheduler, TaskId, TaskSchedule, Tick};

/// Button events emitted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Press edge accepted; classification pending.
    PressStarted,
    /// Released before the hold threshold.  `count` is the lifetime
    /// click total including this one.
    Clicked { count: u16 },
    /// Hold threshold passed while still pressed.  `count` is the
    /// lifetime hold total including this one.
    HoldFired { count: u16 },
    /// Released after a reported hold.  `duration` is the full press
    /// length, always at least the hold threshold.
    HoldReleased { duration: Tick },
}

/// Internal press state.
///
/// `Pressed` vs `HeldReported` is what decides which of the two release
/// events fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    /// Pressed, hold alarm pending.  `hold_task` is `None` when the
    /// scheduler was full at press time; the press then counts clicks only.
    Pressed {
        pressed_at: Tick,
        hold_task: Option<TaskId>,
    },
    /// Hold already reported; waiting for release.
    HeldReported { pressed_at: Tick },
}

pub struct ButtonMachine {
    hold_ticks: Tick,
    state: PressState,
    click_count: u16,
    hold_count: u16,
}

impl ButtonMachine {
    /// `hold_ticks` is the press duration at which a press becomes a hold.
    pub fn new(hold_ticks: Tick) -> Self {
        Self {
            hold_ticks,
            state: PressState::Idle,
            click_count: 0,
            hold_count: 0,
        }
    }

    /// Feed a debounced edge.  `pressed` is the new level.
    ///
    /// A press arms the hold alarm; a release before the alarm fires
    /// cancels it and reports a click.  Repeated same-level edges are
    /// ignored.
    pub fn on_edge(
        &mut self,
        tasks: &mut Scheduler,
        pressed: bool,
        now: Tick,
    ) -> Option<ButtonEvent> {
        match (self.state, pressed) {
            (PressState::Idle, true) => {
                let hold_task = match tasks.register(
                    TaskKind::ButtonHold,
                    TaskSchedule::OneShot,
                    now,
                    self.hold_ticks,
                ) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!("button: hold alarm not armed ({}), press counts clicks only", e);
                        None
                    }
                };
                self.state = PressState::Pressed {
                    pressed_at: now,
                    hold_task,
                };
                debug!("button: pressed at {}", now);
                Some(ButtonEvent::PressStarted)
            }

            (PressState::Pressed { hold_task, .. }, false) => {
                if let Some(id) = hold_task {
                    tasks.unregister(id);
                }
                self.state = PressState::Idle;
                self.click_count = self.click_count.saturating_add(1);
                debug!("button: click #{} at {}", self.click_count, now);
                Some(ButtonEvent::Clicked {
                    count: self.click_count,
                })
            }

            (PressState::HeldReported { pressed_at }, false) => {
                self.state = PressState::Idle;
                let duration = now.saturating_sub(pressed_at);
                debug!("button: hold released after {} ticks", duration);
                Some(ButtonEvent::HoldReleased { duration })
            }

            // Same-level repeats from a glitchy adapter.
            _ => None,
        }
    }

    /// Called when the hold alarm fires.  The one-shot has already
    /// retired itself, so there is nothing to cancel here.
    pub fn on_hold_timeout(&mut self, now: Tick) -> Option<ButtonEvent> {
        match self.state {
            PressState::Pressed { pressed_at, .. } => {
                self.state = PressState::HeldReported { pressed_at };
                self.hold_count = self.hold_count.saturating_add(1);
                debug!("button: hold #{} at {}", self.hold_count, now);
                Some(ButtonEvent::HoldFired {
                    count: self.hold_count,
                })
            }
            // Stale alarm; the press already resolved.
            _ => None,
        }
    }

    /// Lifetime click total.
    pub fn clicks(&self) -> u16 {
        self.click_count
    }

    /// Lifetime hold total.
    pub fn holds(&self) -> u16 {
        self.hold_count
    }
}
