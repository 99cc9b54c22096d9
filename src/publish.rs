//! Report throttling for the temperature channel.
//!
//! Radio time is the main battery cost, so a fresh sample is only worth
//! a report when it says something new: either the last report has gone
//! stale or the value moved by more than the configured delta.  The gate
//! holds the last emitted sample and answers yes or no per offer.
//!
//! "Nothing emitted yet" is represented explicitly, so the very first
//! valid sample after boot always goes out instead of waiting for the
//! staleness timer.

use log::{debug, warn};

use crate::scheduler::Tick;

pub struct PublishGate {
    min_interval: Tick,
    min_delta: f32,
    /// When and what was last emitted.  `None` until the first pass.
    last_emitted: Option<(Tick, f32)>,
}

impl PublishGate {
    /// `min_interval` bounds staleness; `min_delta` is the absolute
    /// change that forces an early report.
    pub fn new(min_interval: Tick, min_delta: f32) -> Self {
        Self {
            min_interval,
            min_delta,
            last_emitted: None,
        }
    }

    /// Offer a sample.  `true` means the caller should report it; the
    /// gate then treats it as the new baseline.
    ///
    /// Non-finite samples are discarded without touching the baseline.
    pub fn offer(&mut self, value: f32, now: Tick) -> bool {
        if !value.is_finite() {
            warn!("publish gate: discarded non-finite sample at {}", now);
            return false;
        }

        let pass = match self.last_emitted {
            None => {
                debug!("publish gate: first sample {} at {}", value, now);
                true
            }
            Some((at, baseline)) => {
                if now.saturating_sub(at) >= self.min_interval {
                    debug!("publish gate: stale since {}, emitting {} at {}", at, value, now);
                    true
                } else if (value - baseline).abs() >= self.min_delta {
                    debug!(
                        "publish gate: moved {} -> {}, emitting at {}",
                        baseline, value, now
                    );
                    true
                } else {
                    false
                }
            }
        };

        if pass {
            self.last_emitted = Some((now, value));
        }
        pass
    }

    /// Last emitted sample, if any.
    pub fn last_emitted(&self) -> Option<(Tick, f32)> {
        self.last_emitted
    }
}
