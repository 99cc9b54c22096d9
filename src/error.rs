//! Unified error types for the fieldnode core.
//!
//! Follows embedded practice: one `Error` enum that every subsystem can
//! convert into, keeping the outer loop's error handling uniform.  All
//! variants are `Copy` so they can be threaded through scheduler callbacks
//! without allocation.
//!
//! Every failure in this crate is local and non-fatal: a full task table
//! rejects the one registration and a flaky sensor skips its cycle.
//! Nothing here panics.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level core error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The scheduler task table is full.  Fatal to the requested
    /// registration only; existing tasks are unaffected.
    CapacityExceeded,
    /// A collaborator sensor read failed for this cycle.
    Sensor(SensorError),
    /// Configuration failed range validation.  The `&'static str` names
    /// the offending field.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "task table full"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Failure modes reported by the sensor collaborators.
///
/// The core never inspects the variant beyond logging it; whatever the
/// cause, the affected cycle is skipped and prior state is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The bus transaction (I2C/ADC) failed or timed out.
    Bus,
    /// The sensor has no fresh conversion yet.
    NotReady,
    /// The reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus transaction failed"),
            Self::NotReady => write!(f, "no fresh conversion"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
