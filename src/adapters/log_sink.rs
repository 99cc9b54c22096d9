//! Log-based message sink adapter.
//!
//! Implements [`MessageSink`] by writing reports to the logger, one line
//! per report in the same shapes the radio uplink uses.  A real radio
//! adapter would implement the same trait.

use log::info;

use crate::app::events::Report;
use crate::app::ports::MessageSink;

/// Adapter that logs every [`Report`] to the console.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for ConsoleSink {
    fn emit(&mut self, report: &Report) {
        match report {
            Report::ButtonClick { count } => info!("Button: {}", count),
            Report::ButtonHold { count } => info!("Button_hold: {}", count),
            Report::ButtonHoldDuration { duration } => {
                info!("Button_hold_duration: {}", duration)
            }
            Report::Temperature { celsius } => info!("Temperature: {:.2}", celsius),
            Report::Orientation { face } => info!("Orientation: {}", face.code()),
            Report::Battery { volts } => info!("Battery: {:.2}", volts),
        }
    }
}
