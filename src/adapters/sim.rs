//! Simulated hardware for host runs.
//!
//! Stand-ins for the transducers and the status LED so the whole node
//! can run on a workstation.  The simulation binary mutates the public
//! fields between steps to script a scenario; reads are infallible
//! unless a failure is injected.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use embedded_hal::digital::InputPin;
use log::debug;

use crate::app::ports::{IndicatorPort, SensorPort};
use crate::error::SensorError;
use crate::orientation::Vector3;
use crate::scheduler::Tick;

/// Scriptable sensor bank.
pub struct SimSensors {
    pub temperature: f32,
    pub acceleration: Vector3,
    pub battery_volts: f32,
    /// When set, temperature reads fail with [`SensorError::Bus`] until
    /// cleared.
    pub temperature_fault: bool,
}

impl Default for SimSensors {
    fn default() -> Self {
        Self {
            temperature: 22.5,
            acceleration: Vector3::new(0.0, 0.0, 1.0),
            battery_volts: 3.1,
            temperature_fault: false,
        }
    }
}

impl SensorPort for SimSensors {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        if self.temperature_fault {
            return Err(SensorError::Bus);
        }
        Ok(self.temperature)
    }

    fn read_acceleration(&mut self) -> Result<Vector3, SensorError> {
        Ok(self.acceleration)
    }

    fn read_battery_voltage(&mut self) -> Result<f32, SensorError> {
        Ok(self.battery_volts)
    }
}

/// LED stand-in that logs pulse requests.
pub struct SimLed;

impl IndicatorPort for SimLed {
    fn pulse(&mut self, duration: Tick) {
        debug!("led: pulse {} ticks", duration);
    }
}

/// Button pin stand-in.  Clones share one electrical level, so the
/// scenario keeps a handle while the edge detector owns another.
///
/// Models the usual pulled-up switch: idle high, pressed low.
#[derive(Clone)]
pub struct SimButtonPin {
    level_high: Arc<AtomicBool>,
}

impl SimButtonPin {
    pub fn new() -> Self {
        Self {
            level_high: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.level_high.store(!pressed, Ordering::Relaxed);
    }
}

impl Default for SimButtonPin {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::digital::ErrorType for SimButtonPin {
    type Error = core::convert::Infallible;
}

impl InputPin for SimButtonPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level_high.load(Ordering::Relaxed))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level_high.load(Ordering::Relaxed))
    }
}
