//! Host simulation binary.
//!
//! Runs the full node core against simulated hardware on a scripted
//! timeline, so every decision path can be watched from a workstation:
//! clicks and holds, the service-window demotion, gated temperature
//! reports, orientation flips, battery polls, and a transducer fault.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimSensors    SimButtonPin + EdgeDetector  ConsoleSink SimLed │
//! │  (SensorPort)  (debounced edges)          (MessageSink)  (LED) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              NodeService (pure logic)                  │    │
//! │  │  Button · Poller · PublishGate · Orientation           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (handler-driven) · HostClock (tick source)          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With a JSON config argument the node runs the production timings;
//! without one it uses compressed demo timings so the whole scripted
//! scenario plays out in about sixteen seconds of wall clock.
#![deny(unused_must_use)]

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use fieldnode::adapters::button_pin::EdgeDetector;
use fieldnode::adapters::clock::HostClock;
use fieldnode::adapters::log_sink::ConsoleSink;
use fieldnode::adapters::sim::{SimButtonPin, SimLed, SimSensors};
use fieldnode::app::service::NodeService;
use fieldnode::config::NodeConfig;
use fieldnode::orientation::Vector3;
use fieldnode::scheduler::{Scheduler, Tick};

/// Run-loop pacing; also the button sampling period.
const LOOP_PACE_MS: u64 = 10;
const BUTTON_DEBOUNCE_TICKS: Tick = 30;
const DEMO_END_TICKS: Tick = 16_000;

// ── Scripted scenario ─────────────────────────────────────────

enum Action {
    Press,
    Release,
    Temperature(f32),
    Acceleration(Vector3),
    TemperatureFault(bool),
}

/// The demo timeline, in ticks since start.
fn scenario() -> VecDeque<(Tick, Action)> {
    VecDeque::from([
        // A quick click.
        (1_200, Action::Press),
        (1_500, Action::Release),
        // Warm-up step large enough to pass the publish gate.
        (2_600, Action::Temperature(24.0)),
        // A hold: threshold passes at ~6s, release reports the duration.
        (4_000, Action::Press),
        (6_500, Action::Release),
        // Node gets flipped on its face.
        (7_200, Action::Acceleration(Vector3::new(0.0, 0.0, -1.0))),
        // Transducer drops off the bus for two seconds.
        (9_000, Action::TemperatureFault(true)),
        (11_100, Action::TemperatureFault(false)),
        // Small late drift; the gate decides.
        (13_300, Action::Temperature(24.5)),
    ])
}

fn apply(action: Action, pin: &SimButtonPin, sensors: &mut SimSensors) {
    match action {
        Action::Press => {
            info!("scenario: button down");
            pin.set_pressed(true);
        }
        Action::Release => {
            info!("scenario: button up");
            pin.set_pressed(false);
        }
        Action::Temperature(c) => {
            info!("scenario: ambient temperature -> {:.2}", c);
            sensors.temperature = c;
        }
        Action::Acceleration(v) => {
            info!("scenario: node reoriented");
            sensors.acceleration = v;
        }
        Action::TemperatureFault(on) => {
            info!(
                "scenario: temperature transducer {}",
                if on { "faulted" } else { "recovered" }
            );
            sensors.temperature_fault = on;
        }
    }
}

/// Compressed timings for the bundled scenario.  Production values make
/// a demo run last hours; these preserve every ratio that matters
/// (service faster than normal, hold shorter than the window).
fn demo_config() -> NodeConfig {
    NodeConfig {
        button_hold_ticks: 2_000,
        service_window_ticks: 8_000,
        temperature_service_interval_ticks: 1_000,
        temperature_normal_interval_ticks: 2_000,
        acceleration_service_interval_ticks: 1_000,
        acceleration_normal_interval_ticks: 2_000,
        battery_poll_interval_ticks: 5_000,
        temperature_publish_interval_ticks: 6_000,
        temperature_publish_delta: 0.2,
        orientation_min_confidence_g: 0.5,
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logger ─────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    info!("╔══════════════════════════════════════╗");
    info!("║  fieldnode sim v{}                ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            let cfg: NodeConfig =
                serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path))?;
            cfg.validate()?;
            info!("Config loaded from {}", path);
            cfg
        }
        None => {
            info!("No config given, using demo timings");
            demo_config()
        }
    };

    // ── 3. Adapters ───────────────────────────────────────────
    let clock = HostClock::new();
    let mut sensors = SimSensors::default();
    let mut sink = ConsoleSink::new();
    let mut led = SimLed;
    let pin = SimButtonPin::new();
    let mut button_pin = EdgeDetector::new(pin.clone(), true, BUTTON_DEBOUNCE_TICKS);

    // ── 4. Core ───────────────────────────────────────────────
    let mut tasks = Scheduler::new();
    let mut node = NodeService::new(config);
    node.start(&mut tasks, clock.now(), &mut led)?;

    // ── 5. Run loop ───────────────────────────────────────────
    let mut script = scenario();

    loop {
        let now = clock.now();

        while script.front().map_or(false, |s| s.0 <= now) {
            if let Some((_, action)) = script.pop_front() {
                apply(action, &pin, &mut sensors);
            }
        }

        if let Ok(Some(pressed)) = button_pin.sample(now) {
            node.on_button_edge(&mut tasks, pressed, now, &mut sink, &mut led);
        }

        node.run_due(&mut tasks, now, &mut sensors, &mut sink, &mut led);

        if now >= DEMO_END_TICKS && script.is_empty() {
            break;
        }
        std::thread::sleep(Duration::from_millis(LOOP_PACE_MS));
    }

    // ── 6. Wrap-up ────────────────────────────────────────────
    let snap = node.snapshot();
    info!(
        "demo done: clicks={} holds={} in_service_window={} last_temperature={:?} orientation={:?}",
        snap.clicks, snap.holds, snap.in_service_window, snap.last_temperature, snap.orientation
    );
    Ok(())
}
