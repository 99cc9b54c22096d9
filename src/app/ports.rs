//! Port traits: the boundary between decision logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (sensor transducers, the radio uplink, the status LED)
//! implement these traits.  The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the decision core never touches hardware
//! directly and every test can substitute a scripted fake.

use crate::error::SensorError;
use crate::orientation::Vector3;
use crate::scheduler::{Scheduler, TaskId, Tick};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to sample transducers.
///
/// Each read is a single on-demand conversion.  Implementations report
/// transducer trouble through [`SensorError`]; they never substitute
/// sentinel values for failed reads.
pub trait SensorPort {
    /// Read the ambient temperature in degrees Celsius.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Read the acceleration vector in g.
    fn read_acceleration(&mut self) -> Result<Vector3, SensorError>;

    /// Read the battery voltage in volts.
    fn read_battery_voltage(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Message sink port (driven adapter: domain → uplink)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`Report`](super::events::Report)s through
/// this port.  Adapters decide where they go (serial console, sub-GHz
/// radio, test recording).
pub trait MessageSink {
    fn emit(&mut self, report: &super::events::Report);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LED)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget status pulses.  The adapter owns the off-timer; the
/// domain only states how long the pulse should last.
pub trait IndicatorPort {
    /// Light the indicator for `duration` ticks.
    fn pulse(&mut self, duration: Tick);
}

// ───────────────────────────────────────────────────────────────
// Task handler (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback trait the scheduler invokes when a task comes due.
///
/// This decouples the [`Scheduler`](crate::scheduler::Scheduler) from the
/// service layer: the scheduler knows when things fire, the handler knows
/// what firing means.  The handler receives the scheduler back mutably so
/// it may register, cancel, or retime tasks from inside the callback.
pub trait TaskHandler {
    /// Called once per due task during [`Scheduler::run_due`].
    ///
    /// * `tasks`: the scheduler itself, already advanced past this firing.
    /// * `id`: the task that fired (already retired if one-shot).
    /// * `kind`: what the task means to the domain.
    /// * `now`: the tick passed to `run_due`.
    fn on_task(&mut self, tasks: &mut Scheduler, id: TaskId, kind: TaskKind, now: Tick);
}

/// Discriminant carried by every scheduled task.
///
/// `Copy` so the scheduler can snapshot due tasks without borrowing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Periodic sensor poll.
    Poll(SensorKind),
    /// One-shot marking the end of the fast-polling service window.
    ServiceWindowEnd,
    /// One-shot hold-threshold alarm for the user button.
    ButtonHold,
}

/// Which transducer a [`TaskKind::Poll`] task samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Acceleration,
    Battery,
}

impl SensorKind {
    /// Stable lowercase name used in log lines and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Acceleration => "acceleration",
            Self::Battery => "battery",
        }
    }
}
