//! Outbound node reports.
//!
//! The [`NodeService`](super::service::NodeService) emits these through
//! the [`MessageSink`](super::ports::MessageSink) port.  Adapters on the
//! other side decide what to do with them, whether that is a serial
//! console, the radio uplink, or a recording fake in a test.

use crate::orientation::Face;
use crate::scheduler::Tick;

/// Structured reports emitted by the node core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    /// Button click; `count` is the lifetime total.
    ButtonClick { count: u16 },

    /// Button hold threshold passed; `count` is the lifetime total.
    ButtonHold { count: u16 },

    /// A held button was released after `duration` ticks of press.
    ButtonHoldDuration { duration: Tick },

    /// Temperature in °C that passed the publish gate.
    Temperature { celsius: f32 },

    /// Orientation changed to a new face.
    Orientation { face: Face },

    /// Periodic battery voltage reading.
    Battery { volts: f32 },
}

/// A point-in-time diagnostic view of the node, suitable for logging or
/// a status query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSnapshot {
    pub clicks: u16,
    pub holds: u16,
    pub in_service_window: bool,
    pub last_temperature: Option<f32>,
    pub orientation: Face,
}
