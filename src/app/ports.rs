//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CoolerService (domain)
//! ```
//!
//! Driven adapters (clock, probe, outputs, indicator, telemetry sink)
//! implement these traits.  The [`CoolerService`](super::service::CoolerService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every port can be mocked on the host.

use crate::error::SensorError;
use crate::status::StatusCode;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait Clock {
    /// Whole seconds since boot.  Never decreases.
    fn now_secs(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// The single temperature probe inside the cabinet.
pub trait TemperatureProbe {
    /// Query the probe once and return degrees Celsius.
    fn query_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The three binary outputs of the cooler.
pub trait ActuatorPort {
    /// Resistive heater on the cold plate.
    fn set_defrost_heater(&mut self, on: bool);

    /// Circulation fan.
    fn set_fan(&mut self, on: bool);

    /// Peltier element.
    fn set_cooling(&mut self, on: bool);

    /// De-energise every output.
    fn all_off(&mut self) {
        self.set_defrost_heater(false);
        self.set_fan(false);
        self.set_cooling(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Indicator port
// ───────────────────────────────────────────────────────────────

/// Blink-code status indicator.  `show` blocks for the full pattern, which
/// paces the control loop.
pub trait IndicatorPort {
    fn show(&mut self, code: StatusCode);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
