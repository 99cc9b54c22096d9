//! Node service: the decision core.
//!
//! [`NodeService`] owns the button classifier, the rate-adaptive poller,
//! the temperature publish gate, and the orientation tracker.  It
//! exposes a clean, hardware-agnostic API.  All I/O flows through port
//! traits injected at call sites, making the entire service testable
//! with scripted fakes.
//!
//! ```text
//!   SensorPort ──▶ ┌─────────────────────────┐ ──▶ MessageSink
//!                  │       NodeService       │
//! button edges ──▶ │ Button · Polls · Gate   │ ──▶ IndicatorPort
//!                  └─────────────────────────┘
//! ```
//!
//! The scheduler stays outside: the run loop owns it and hands it in per
//! call, so task callbacks can re-enter the scheduler without aliasing.

use log::{info, warn};

use crate::button::{ButtonEvent, ButtonMachine};
use crate::config::NodeConfig;
use crate::error::Result;
use crate::orientation::OrientationTracker;
use crate::poller::{PollPlan, RateAdaptivePoller};
use crate::publish::PublishGate;
use crate::scheduler::{Scheduler, TaskId, TaskSchedule, Tick};

use super::events::{NodeSnapshot, Report};
use super::ports::{IndicatorPort, MessageSink, SensorKind, SensorPort, TaskHandler, TaskKind};

/// Indicator pulse lengths.
const BOOT_PULSE_TICKS: Tick = 2_000;
const CLICK_PULSE_TICKS: Tick = 100;
const HOLD_PULSE_TICKS: Tick = 250;

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The node service orchestrates all decision logic.
pub struct NodeService {
    config: NodeConfig,
    button: ButtonMachine,
    poller: RateAdaptivePoller,
    temperature_gate: PublishGate,
    orientation: OrientationTracker,
}

impl NodeService {
    /// Construct the service from validated configuration.
    ///
    /// Does **not** register any tasks; call [`start`](Self::start) next.
    pub fn new(config: NodeConfig) -> Self {
        let button = ButtonMachine::new(config.button_hold_ticks);
        let temperature_gate = PublishGate::new(
            config.temperature_publish_interval_ticks,
            config.temperature_publish_delta,
        );
        let orientation = OrientationTracker::new(config.orientation_min_confidence_g);

        Self {
            config,
            button,
            poller: RateAdaptivePoller::new(),
            temperature_gate,
            orientation,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Register every scheduled task and announce the node.
    ///
    /// Polled sensors start at service cadence; the battery poll is not
    /// rate-adapted.  Fails only if the scheduler cannot hold the boot
    /// task set, which is fatal to startup.
    pub fn start(
        &mut self,
        tasks: &mut Scheduler,
        now: Tick,
        indicator: &mut impl IndicatorPort,
    ) -> Result<()> {
        self.poller.add_plan(PollPlan {
            kind: SensorKind::Temperature,
            service_interval: self.config.temperature_service_interval_ticks,
            normal_interval: self.config.temperature_normal_interval_ticks,
        })?;
        self.poller.add_plan(PollPlan {
            kind: SensorKind::Acceleration,
            service_interval: self.config.acceleration_service_interval_ticks,
            normal_interval: self.config.acceleration_normal_interval_ticks,
        })?;
        self.poller
            .start(tasks, now, self.config.service_window_ticks)?;

        tasks.register(
            TaskKind::Poll(SensorKind::Battery),
            TaskSchedule::Every(self.config.battery_poll_interval_ticks),
            now,
            self.config.battery_poll_interval_ticks,
        )?;

        indicator.pulse(BOOT_PULSE_TICKS);
        info!("node started, {} tasks registered", tasks.active_count());
        Ok(())
    }

    // ── Input events ──────────────────────────────────────────

    /// Feed a debounced button edge.  `pressed` is the new level.
    pub fn on_button_edge(
        &mut self,
        tasks: &mut Scheduler,
        pressed: bool,
        now: Tick,
        sink: &mut impl MessageSink,
        indicator: &mut impl IndicatorPort,
    ) {
        if let Some(ev) = self.button.on_edge(tasks, pressed, now) {
            self.route_button_event(ev, sink, indicator);
        }
    }

    // ── Scheduled work ────────────────────────────────────────

    /// Run every due task.  The run loop calls this once per wake.
    pub fn run_due(
        &mut self,
        tasks: &mut Scheduler,
        now: Tick,
        hw: &mut impl SensorPort,
        sink: &mut impl MessageSink,
        indicator: &mut impl IndicatorPort,
    ) {
        let mut dispatch = Dispatch {
            node: self,
            hw,
            sink,
            indicator,
        };
        tasks.run_due(now, &mut dispatch);
    }

    fn dispatch(
        &mut self,
        tasks: &mut Scheduler,
        kind: TaskKind,
        now: Tick,
        hw: &mut impl SensorPort,
        sink: &mut impl MessageSink,
        indicator: &mut impl IndicatorPort,
    ) {
        match kind {
            TaskKind::Poll(SensorKind::Temperature) => self.poll_temperature(now, hw, sink),
            TaskKind::Poll(SensorKind::Acceleration) => self.poll_acceleration(hw, sink),
            TaskKind::Poll(SensorKind::Battery) => self.poll_battery(hw, sink),
            TaskKind::ServiceWindowEnd => self.poller.end_service_window(tasks),
            TaskKind::ButtonHold => {
                if let Some(ev) = self.button.on_hold_timeout(now) {
                    self.route_button_event(ev, sink, indicator);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Point-in-time diagnostic view.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            clicks: self.button.clicks(),
            holds: self.button.holds(),
            in_service_window: self.poller.in_service_window(),
            last_temperature: self.temperature_gate.last_emitted().map(|(_, v)| v),
            orientation: self.orientation.current(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn route_button_event(
        &mut self,
        ev: ButtonEvent,
        sink: &mut impl MessageSink,
        indicator: &mut impl IndicatorPort,
    ) {
        match ev {
            // Classification pending; nothing to report yet.
            ButtonEvent::PressStarted => {}
            ButtonEvent::Clicked { count } => {
                sink.emit(&Report::ButtonClick { count });
                indicator.pulse(CLICK_PULSE_TICKS);
            }
            ButtonEvent::HoldFired { count } => {
                sink.emit(&Report::ButtonHold { count });
                indicator.pulse(HOLD_PULSE_TICKS);
            }
            ButtonEvent::HoldReleased { duration } => {
                sink.emit(&Report::ButtonHoldDuration { duration });
            }
        }
    }

    /// A failed read skips this cycle and leaves the gate baseline
    /// untouched; the next successful read is judged against it.
    fn poll_temperature(
        &mut self,
        now: Tick,
        hw: &mut impl SensorPort,
        sink: &mut impl MessageSink,
    ) {
        match hw.read_temperature() {
            Ok(celsius) => {
                if self.temperature_gate.offer(celsius, now) {
                    sink.emit(&Report::Temperature { celsius });
                }
            }
            Err(e) => warn!("temperature read failed: {}", e),
        }
    }

    fn poll_acceleration(&mut self, hw: &mut impl SensorPort, sink: &mut impl MessageSink) {
        match hw.read_acceleration() {
            Ok(v) => {
                if let Some(face) = self.orientation.update(v) {
                    sink.emit(&Report::Orientation { face });
                }
            }
            Err(e) => warn!("acceleration read failed: {}", e),
        }
    }

    /// Every successful battery reading is reported; there is no gate on
    /// a once-an-hour channel.
    fn poll_battery(&mut self, hw: &mut impl SensorPort, sink: &mut impl MessageSink) {
        match hw.read_battery_voltage() {
            Ok(volts) => sink.emit(&Report::Battery { volts }),
            Err(e) => warn!("battery read failed: {}", e),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler binding
// ───────────────────────────────────────────────────────────────

/// Borrows the service and its ports for the duration of one `run_due`
/// call, forwarding task firings into [`NodeService::dispatch`].
struct Dispatch<'a, HW: SensorPort, S: MessageSink, I: IndicatorPort> {
    node: &'a mut NodeService,
    hw: &'a mut HW,
    sink: &'a mut S,
    indicator: &'a mut I,
}

impl<HW: SensorPort, S: MessageSink, I: IndicatorPort> TaskHandler for Dispatch<'_, HW, S, I> {
    fn on_task(&mut self, tasks: &mut Scheduler, _id: TaskId, kind: TaskKind, now: Tick) {
        self.node
            .dispatch(tasks, kind, now, self.hw, self.sink, self.indicator);
    }
}
