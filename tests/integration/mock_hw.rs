//! Mock hardware for integration tests.
//!
//! Records every port interaction so tests can assert on the full
//! report and pulse history without real transducers.

use fieldnode::app::events::Report;
use fieldnode::app::ports::{IndicatorPort, MessageSink, SensorPort};
use fieldnode::app::service::NodeService;
use fieldnode::config::NodeConfig;
use fieldnode::error::SensorError;
use fieldnode::orientation::{Face, Vector3};
use fieldnode::scheduler::{Scheduler, Tick};

// ── MockSensors ──────────────────────────────────────────────

/// Sensor bank with scriptable values, injectable failures, and read
/// counters for cadence assertions.
pub struct MockSensors {
    pub temperature: f32,
    pub acceleration: Vector3,
    pub battery_volts: f32,
    pub fail_temperature: bool,
    pub fail_acceleration: bool,
    pub fail_battery: bool,
    pub temperature_reads: usize,
    pub acceleration_reads: usize,
    pub battery_reads: usize,
}

impl MockSensors {
    pub fn new() -> Self {
        Self {
            temperature: 22.5,
            acceleration: Vector3::new(0.0, 0.0, 1.0),
            battery_volts: 3.1,
            fail_temperature: false,
            fail_acceleration: false,
            fail_battery: false,
            temperature_reads: 0,
            acceleration_reads: 0,
            battery_reads: 0,
        }
    }
}

impl Default for MockSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockSensors {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.temperature_reads += 1;
        if self.fail_temperature {
            Err(SensorError::Bus)
        } else {
            Ok(self.temperature)
        }
    }

    fn read_acceleration(&mut self) -> Result<Vector3, SensorError> {
        self.acceleration_reads += 1;
        if self.fail_acceleration {
            Err(SensorError::Bus)
        } else {
            Ok(self.acceleration)
        }
    }

    fn read_battery_voltage(&mut self) -> Result<f32, SensorError> {
        self.battery_reads += 1;
        if self.fail_battery {
            Err(SensorError::NotReady)
        } else {
            Ok(self.battery_volts)
        }
    }
}

// ── RecordingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<Report>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Temperatures in emission order.
    pub fn temperatures(&self) -> Vec<f32> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                Report::Temperature { celsius } => Some(*celsius),
                _ => None,
            })
            .collect()
    }

    /// Orientation faces in emission order.
    pub fn orientations(&self) -> Vec<Face> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                Report::Orientation { face } => Some(*face),
                _ => None,
            })
            .collect()
    }

    /// Battery readings in emission order.
    pub fn batteries(&self) -> Vec<f32> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                Report::Battery { volts } => Some(*volts),
                _ => None,
            })
            .collect()
    }

    /// Button-related reports in emission order.
    pub fn button_reports(&self) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Report::ButtonClick { .. }
                        | Report::ButtonHold { .. }
                        | Report::ButtonHoldDuration { .. }
                )
            })
            .copied()
            .collect()
    }
}

impl MessageSink for RecordingSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

// ── MockIndicator ────────────────────────────────────────────

#[derive(Default)]
pub struct MockIndicator {
    pub pulses: Vec<Tick>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndicatorPort for MockIndicator {
    fn pulse(&mut self, duration: Tick) {
        self.pulses.push(duration);
    }
}

// ── Rig ──────────────────────────────────────────────────────

/// A started node wired to the mocks, ready to be driven over a
/// scripted timeline.
pub struct Rig {
    pub node: NodeService,
    pub tasks: Scheduler,
    pub hw: MockSensors,
    pub sink: RecordingSink,
    pub ind: MockIndicator,
}

#[allow(dead_code)]
impl Rig {
    /// Started node with the shared short-timing config.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: NodeConfig) -> Self {
        let mut rig = Self {
            node: NodeService::new(config),
            tasks: Scheduler::new(),
            hw: MockSensors::new(),
            sink: RecordingSink::new(),
            ind: MockIndicator::new(),
        };
        rig.node
            .start(&mut rig.tasks, 0, &mut rig.ind)
            .expect("boot task set must fit");
        rig
    }

    pub fn run_at(&mut self, now: Tick) {
        self.node.run_due(
            &mut self.tasks,
            now,
            &mut self.hw,
            &mut self.sink,
            &mut self.ind,
        );
    }

    pub fn drive(&mut self, times: impl Iterator<Item = Tick>) {
        for t in times {
            self.run_at(t);
        }
    }

    pub fn button(&mut self, pressed: bool, now: Tick) {
        self.node.on_button_edge(
            &mut self.tasks,
            pressed,
            now,
            &mut self.sink,
            &mut self.ind,
        );
    }
}

// ── Shared test configuration ────────────────────────────────

/// Short timings so scenarios stay readable: 5 s window, 1 s service
/// polls, 4 s normal polls, 10 s battery, 3 s publish staleness.
pub fn test_config() -> NodeConfig {
    NodeConfig {
        button_hold_ticks: 2_000,
        service_window_ticks: 5_000,
        temperature_service_interval_ticks: 1_000,
        temperature_normal_interval_ticks: 4_000,
        acceleration_service_interval_ticks: 1_000,
        acceleration_normal_interval_ticks: 4_000,
        battery_poll_interval_ticks: 10_000,
        temperature_publish_interval_ticks: 3_000,
        temperature_publish_delta: 0.2,
        orientation_min_confidence_g: 0.5,
    }
}
