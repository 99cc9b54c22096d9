//! Cooperative task scheduler.
//!
//! Single-threaded tick-driven core of the node.  Everything that happens
//! on a timetable (sensor polls, the service-window cutoff, the button
//! hold alarm) is a registered task; the run loop asks the scheduler what
//! is due and the scheduler calls back into a [`TaskHandler`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Trigger Sources                          │
//! │                                                              │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐   │
//! │  │ Sensor    │  │ Service   │  │ Button    │  │ Battery  │   │
//! │  │ Polls     │  │ Window End│  │ Hold Alarm│  │ Poll     │   │
//! │  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └─────┬────┘   │
//! │        │              │              │              │        │
//! │        ▼              ▼              ▼              ▼        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                 Scheduler::run_due                     │  │
//! │  │        (snapshot due tasks, advance, dispatch)         │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          │                                   │
//! │                          ▼                                   │
//! │                TaskHandler::on_task                          │
//! │                (NodeService dispatch)                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tasks are identified by a generation-checked [`TaskId`], so a handle
//! kept across slot reuse can never cancel somebody else's task.

use heapless::Vec;
use log::{debug, trace};

use crate::app::ports::{TaskHandler, TaskKind};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════
//  Task types
// ═══════════════════════════════════════════════════════════════

/// Monotonic node time.  The platform decides the unit; the reference
/// platform uses milliseconds since boot.
pub type Tick = u64;

/// Maximum number of concurrent tasks (stack-allocated).
pub const MAX_TASKS: usize = 16;

/// How a registered task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSchedule {
    /// Fire once, then retire and free the slot.
    OneShot,
    /// Fire every `interval` ticks, scheduled from the previous due time
    /// so the cadence never drifts.
    Every(Tick),
}

/// Opaque handle to a registered task.
///
/// Carries the slot index plus the registration sequence number, so a
/// stale handle held after the slot was freed and reused is detected and
/// ignored rather than acting on the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId {
    index: usize,
    seq: u64,
}

/// Internal bookkeeping for a live task.
#[derive(Debug, Clone)]
struct TaskEntry {
    kind: TaskKind,
    schedule: TaskSchedule,
    /// Next absolute due time.
    next_due: Tick,
    /// Registration order, doubles as the generation check in [`TaskId`].
    seq: u64,
}

/// A due task captured before dispatch.
#[derive(Debug, Clone, Copy)]
struct DueTask {
    due_at: Tick,
    id: TaskId,
    kind: TaskKind,
    oneshot: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The scheduler engine.
///
/// Intentionally decoupled from the service layer: when tasks come due,
/// it invokes the [`TaskHandler`] callback rather than acting itself.
/// This keeps the engine independently testable and lets the handler
/// register, cancel, or retime tasks from inside the callback.
pub struct Scheduler {
    slots: [Option<TaskEntry>; MAX_TASKS],
    /// Next registration sequence number.
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            next_seq: 0,
        }
    }

    /// Register a task.  The first firing is due at `now + delay`;
    /// periodic tasks then repeat on their interval.
    ///
    /// Returns [`Error::CapacityExceeded`] when all slots are taken.
    pub fn register(
        &mut self,
        kind: TaskKind,
        schedule: TaskSchedule,
        now: Tick,
        delay: Tick,
    ) -> Result<TaskId> {
        let index = self
            .slots
            .iter()
            .position(|s| s.is_none())
            .ok_or(Error::CapacityExceeded)?;

        let seq = self.next_seq;
        self.next_seq += 1;
        let next_due = now.saturating_add(delay);

        self.slots[index] = Some(TaskEntry {
            kind,
            schedule,
            next_due,
            seq,
        });
        debug!(
            "scheduler: registered {:?} {:?} at slot {}, due {}",
            kind, schedule, index, next_due
        );
        Ok(TaskId { index, seq })
    }

    /// Cancel a task.  Idempotent: a handle that was already cancelled,
    /// already fired (one-shot), or outlived by slot reuse is a no-op.
    pub fn unregister(&mut self, id: TaskId) {
        if let Some(entry) = self.slots[id.index].as_ref() {
            if entry.seq == id.seq {
                debug!("scheduler: unregistered {:?} from slot {}", entry.kind, id.index);
                self.slots[id.index] = None;
            }
        }
    }

    /// Change the interval of a live periodic task.
    ///
    /// Applies to firings after the next one: the already-planned due
    /// time stays where it is, subsequent firings follow the new
    /// interval.  Returns `false` for stale handles and one-shot tasks.
    pub fn set_interval(&mut self, id: TaskId, interval: Tick) -> bool {
        match self.slots[id.index].as_mut() {
            Some(entry) if entry.seq == id.seq => match entry.schedule {
                TaskSchedule::Every(_) => {
                    entry.schedule = TaskSchedule::Every(interval);
                    debug!(
                        "scheduler: retimed {:?} to every {} ticks",
                        entry.kind, interval
                    );
                    true
                }
                TaskSchedule::OneShot => false,
            },
            _ => false,
        }
    }

    /// Run every task due at or before `now`.
    ///
    /// Due tasks are snapshotted and advanced first, then dispatched in
    /// deterministic order: earlier due time first, registration order
    /// breaking ties.  Because advancement happens before dispatch, the
    /// handler sees a consistent scheduler and may freely register,
    /// cancel, or retime tasks; anything it registers fires no earlier
    /// than the next `run_due` call.
    ///
    /// Each task fires at most once per call.  A node that stalls past
    /// several due times catches up one firing per call without ever
    /// shifting the underlying cadence.
    ///
    /// A periodic task cancelled by an earlier callback in the same
    /// batch is not delivered.  A one-shot that was already due is
    /// delivered exactly once regardless.
    pub fn run_due(&mut self, now: Tick, handler: &mut dyn TaskHandler) {
        let mut fired: Vec<DueTask, MAX_TASKS> = Vec::new();

        // Phase 1: snapshot and advance.  One-shots retire here so the
        // handler never observes a fired one-shot as still pending.
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let due_now = matches!(slot, Some(e) if e.next_due <= now);
            if !due_now {
                continue;
            }
            let Some(mut entry) = slot.take() else {
                continue;
            };
            let task = DueTask {
                due_at: entry.next_due,
                id: TaskId {
                    index,
                    seq: entry.seq,
                },
                kind: entry.kind,
                oneshot: matches!(entry.schedule, TaskSchedule::OneShot),
            };
            if let TaskSchedule::Every(interval) = entry.schedule {
                entry.next_due = entry.next_due.saturating_add(interval);
                *slot = Some(entry);
            }
            // Capacity matches the slot count, push cannot fail.
            let _ = fired.push(task);
        }

        fired.sort_unstable_by_key(|t| (t.due_at, t.id.seq));

        // Phase 2: dispatch.
        for task in &fired {
            if !task.oneshot && !self.is_live(task.id) {
                continue;
            }
            trace!(
                "scheduler: {:?} due {} fired at {}",
                task.kind, task.due_at, now
            );
            handler.on_task(self, task.id, task.kind, now);
        }
    }

    /// Earliest due time over all live tasks, if any.  The run loop uses
    /// this to sleep until the next deadline.
    pub fn next_wake(&self) -> Option<Tick> {
        self.slots.iter().flatten().map(|e| e.next_due).min()
    }

    /// Number of live tasks.
    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    fn is_live(&self, id: TaskId) -> bool {
        self.slots[id.index]
            .as_ref()
            .map_or(false, |e| e.seq == id.seq)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
