//! Debounced button pin adapter.
//!
//! Wraps any [`embedded_hal`] input pin and turns raw level samples into
//! clean press/release edges for the core.  A level change only commits
//! after it has held steady for the debounce time; contact bounce that
//! flips back beforehand restarts the wait.
//!
//! The adapter is polled by the run loop at tick rate.  It owns the
//! debounce; the core's button machine assumes edges arriving here are
//! already clean.

use embedded_hal::digital::InputPin;

use crate::scheduler::Tick;

/// Debounced edge detector over a raw input pin.
pub struct EdgeDetector<P: InputPin> {
    pin: P,
    active_low: bool,
    debounce_ticks: Tick,
    /// Committed logical level (true = pressed).
    level: bool,
    /// Pending level change and when it started.
    candidate: Option<(bool, Tick)>,
}

impl<P: InputPin> EdgeDetector<P> {
    /// `active_low` is true for the usual pulled-up momentary switch.
    pub fn new(pin: P, active_low: bool, debounce_ticks: Tick) -> Self {
        Self {
            pin,
            active_low,
            debounce_ticks,
            level: false,
            candidate: None,
        }
    }

    /// Sample the pin.  Returns `Some(pressed)` when a debounced edge
    /// committed, `None` otherwise.  Pin read errors pass through.
    pub fn sample(&mut self, now: Tick) -> Result<Option<bool>, P::Error> {
        let raw = self.pin.is_low()? == self.active_low;

        if raw == self.level {
            // Back at the committed level; any pending change was bounce.
            self.candidate = None;
            return Ok(None);
        }

        match self.candidate {
            Some((lvl, since)) if lvl == raw => {
                if now.saturating_sub(since) >= self.debounce_ticks {
                    self.level = raw;
                    self.candidate = None;
                    Ok(Some(raw))
                } else {
                    Ok(None)
                }
            }
            _ => {
                self.candidate = Some((raw, now));
                Ok(None)
            }
        }
    }

    /// Committed logical level.
    pub fn level(&self) -> bool {
        self.level
    }
}
