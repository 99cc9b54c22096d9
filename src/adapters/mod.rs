//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter      | Implements    | Connects to               |
//! |--------------|---------------|---------------------------|
//! | `button_pin` | (edge source) | debounced GPIO input pin  |
//! | `clock`      | (tick source) | host monotonic clock      |
//! | `log_sink`   | MessageSink   | console log output        |
//! | `sim`        | SensorPort    | scripted sensor values    |
//! |              | IndicatorPort | logged LED pulses         |

pub mod button_pin;
pub mod clock;
pub mod log_sink;
pub mod sim;
