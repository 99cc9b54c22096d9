//! Host time adapter.
//!
//! Provides the monotonic tick source for the run loop.  Ticks are
//! milliseconds since adapter construction, which on the reference
//! platform coincides with boot.

use crate::scheduler::Tick;

/// Monotonic millisecond clock backed by [`std::time::Instant`].
pub struct HostClock {
    start: std::time::Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    /// Ticks since construction (monotonic, never decreases).
    pub fn now(&self) -> Tick {
        self.start.elapsed().as_millis() as Tick
    }
}
