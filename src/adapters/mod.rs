//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements        | Connects to                 |
//! |---------------|-------------------|-----------------------------|
//! | `hardware`    | ActuatorPort      | heater / fan / Peltier GPIO |
//! |               | TemperatureProbe  | NTC probe on ADC1           |
//! | `serial_sink` | EventSink         | CSV telemetry on UART0      |
//! | `time`        | Clock             | ESP32 system timer          |
//!
//! The indicator port is implemented directly by
//! [`StatusLed`](crate::drivers::status_led::StatusLed).

pub mod hardware;
pub mod serial_sink;
pub mod time;
