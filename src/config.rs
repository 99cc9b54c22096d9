//! Node configuration parameters.
//!
//! All tunable timing and threshold parameters for the fieldnode core.
//! Intervals are expressed in scheduler ticks; on the reference platform
//! one tick is one millisecond, but nothing in the core assumes a unit.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scheduler::Tick;

/// Core node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Button ---
    /// Press duration after which a press counts as a hold.
    pub button_hold_ticks: Tick,

    // --- Polling cadence ---
    /// Length of the fast-polling service window after startup.
    pub service_window_ticks: Tick,
    /// Temperature poll interval during the service window.
    pub temperature_service_interval_ticks: Tick,
    /// Temperature poll interval after the service window.
    pub temperature_normal_interval_ticks: Tick,
    /// Acceleration poll interval during the service window.
    pub acceleration_service_interval_ticks: Tick,
    /// Acceleration poll interval after the service window.
    pub acceleration_normal_interval_ticks: Tick,
    /// Battery voltage poll interval (not rate-adapted).
    pub battery_poll_interval_ticks: Tick,

    // --- Temperature publishing ---
    /// Maximum staleness between temperature reports.
    pub temperature_publish_interval_ticks: Tick,
    /// Minimum change (°C) that forces an early temperature report.
    pub temperature_publish_delta: f32,

    // --- Orientation ---
    /// Minimum dominant-axis magnitude (g) for a confident face fix.
    pub orientation_min_confidence_g: f32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Button
            button_hold_ticks: 2_000, // 2 s

            // Polling cadence
            service_window_ticks: 15 * 60 * 1_000, // 15 min
            temperature_service_interval_ticks: 1_000, // 1 s
            temperature_normal_interval_ticks: 10_000, // 10 s
            acceleration_service_interval_ticks: 1_000, // 1 s
            acceleration_normal_interval_ticks: 10_000, // 10 s
            battery_poll_interval_ticks: 60 * 60 * 1_000, // 1 h

            // Temperature publishing
            temperature_publish_interval_ticks: 15 * 60 * 1_000, // 15 min
            temperature_publish_delta: 0.2,

            // Orientation
            orientation_min_confidence_g: 0.5,
        }
    }
}

impl NodeConfig {
    /// Range-check every field.  Returns the first offending field.
    ///
    /// Callers loading external configuration (JSON override file, future
    /// provisioning channel) must validate before use; invalid values are
    /// rejected, never silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.button_hold_ticks == 0 {
            return Err(Error::Config("button_hold_ticks must be > 0"));
        }
        if self.service_window_ticks == 0 {
            return Err(Error::Config("service_window_ticks must be > 0"));
        }
        if self.temperature_service_interval_ticks == 0
            || self.acceleration_service_interval_ticks == 0
        {
            return Err(Error::Config("service poll intervals must be > 0"));
        }
        if self.temperature_normal_interval_ticks < self.temperature_service_interval_ticks
            || self.acceleration_normal_interval_ticks < self.acceleration_service_interval_ticks
        {
            return Err(Error::Config(
                "normal poll intervals must be >= service intervals",
            ));
        }
        if self.battery_poll_interval_ticks == 0 {
            return Err(Error::Config("battery_poll_interval_ticks must be > 0"));
        }
        if self.temperature_publish_interval_ticks == 0 {
            return Err(Error::Config(
                "temperature_publish_interval_ticks must be > 0",
            ));
        }
        if !self.temperature_publish_delta.is_finite() || self.temperature_publish_delta < 0.0 {
            return Err(Error::Config(
                "temperature_publish_delta must be finite and >= 0",
            ));
        }
        if !self.orientation_min_confidence_g.is_finite()
            || self.orientation_min_confidence_g <= 0.0
        {
            return Err(Error::Config(
                "orientation_min_confidence_g must be finite and > 0",
            ));
        }
        Ok(())
    }
}
