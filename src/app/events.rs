//! Outbound application events.
//!
//! The [`CoolerService`](super::service::CoolerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (write CSV to the serial port or log).

use crate::error::SensorError;
use crate::fsm::CoolerState;
use crate::telemetry::TelemetryRecord;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial state).  Telemetry sinks
    /// write the CSV header on this event.
    Started(CoolerState),

    /// Periodic telemetry record.
    Telemetry(TelemetryRecord),

    /// The FSM transitioned between states.
    StateChanged { from: CoolerState, to: CoolerState },

    /// The probe started failing; the reader is holding the given value (°F).
    SensorFault { error: SensorError, held_f: f32 },

    /// The probe returned a good reading after a fault.
    SensorRecovered,
}
