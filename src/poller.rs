//! Rate-adaptive sensor polling.
//!
//! After power-up the node sits in a service window: every managed sensor
//! is polled at its fast service cadence so an installer gets immediate
//! readings.  A one-shot fires when the window closes and every poll is
//! demoted to its slow normal cadence for the rest of the uptime.  The
//! demotion is one-way; only a reset re-enters the window.
//!
//! The poller owns the scheduler registrations.  It never reads sensors
//! itself; poll firings are dispatched by the service layer.

use heapless::Vec;
use log::{info, warn};

use crate::app::ports::{SensorKind, TaskKind};
use crate::error::Result;
use crate::scheduler::{Scheduler, TaskId, TaskSchedule, Tick};

/// Maximum number of managed poll plans (stack-allocated).
pub const MAX_PLANS: usize = 4;

/// Polling cadence for one sensor.
#[derive(Debug, Clone, Copy)]
pub struct PollPlan {
    pub kind: SensorKind,
    /// Interval while the service window is open.
    pub service_interval: Tick,
    /// Interval after the window closes.
    pub normal_interval: Tick,
}

#[derive(Debug)]
struct PollEntry {
    plan: PollPlan,
    task: Option<TaskId>,
}

pub struct RateAdaptivePoller {
    entries: Vec<PollEntry, MAX_PLANS>,
    window_end: Option<TaskId>,
    in_window: bool,
}

impl RateAdaptivePoller {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            window_end: None,
            in_window: true,
        }
    }

    /// Add a sensor to manage.  Call before [`start`](Self::start).
    pub fn add_plan(&mut self, plan: PollPlan) -> Result<()> {
        self.entries
            .push(PollEntry { plan, task: None })
            .map_err(|_| crate::error::Error::CapacityExceeded)
    }

    /// Register every poll at its service cadence plus the window-end
    /// one-shot.  Call once at boot.
    pub fn start(&mut self, tasks: &mut Scheduler, now: Tick, window: Tick) -> Result<()> {
        for entry in self.entries.iter_mut() {
            let id = tasks.register(
                TaskKind::Poll(entry.plan.kind),
                TaskSchedule::Every(entry.plan.service_interval),
                now,
                entry.plan.service_interval,
            )?;
            entry.task = Some(id);
        }
        self.window_end =
            Some(tasks.register(TaskKind::ServiceWindowEnd, TaskSchedule::OneShot, now, window)?);
        info!(
            "poller: service window open, {} sensors at fast cadence for {} ticks",
            self.entries.len(),
            window
        );
        Ok(())
    }

    /// Demote every managed poll to its normal cadence.
    ///
    /// One-way and idempotent.  The already-planned next firing of each
    /// poll keeps its slot; later firings follow the slow interval.
    pub fn end_service_window(&mut self, tasks: &mut Scheduler) {
        if !self.in_window {
            return;
        }
        self.in_window = false;
        // No-op when the window alarm itself brought us here: the
        // one-shot has already retired and the handle is stale.
        if let Some(id) = self.window_end.take() {
            tasks.unregister(id);
        }

        for entry in self.entries.iter() {
            let retimed = entry
                .task
                .map_or(false, |id| tasks.set_interval(id, entry.plan.normal_interval));
            if !retimed {
                warn!("poller: {} poll missing at demotion", entry.plan.kind.name());
            }
        }
        info!("poller: service window ended, polls at normal cadence");
    }

    /// Whether the service window is still open.
    pub fn in_service_window(&self) -> bool {
        self.in_window
    }
}

impl Default for RateAdaptivePoller {
    fn default() -> Self {
        Self::new()
    }
}
