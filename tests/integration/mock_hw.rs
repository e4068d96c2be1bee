//! Mock adapters for integration tests.
//!
//! Records every actuator call, indicator code and event so tests can
//! assert on the full history without touching real GPIO.

use std::cell::Cell;

use peltier_cooler::app::events::AppEvent;
use peltier_cooler::app::ports::{ActuatorPort, Clock, EventSink, IndicatorPort, TemperatureProbe};
use peltier_cooler::app::service::CoolerService;
use peltier_cooler::config::CoolerConfig;
use peltier_cooler::error::SensorError;
use peltier_cooler::fsm::context::ActuatorCommands;
use peltier_cooler::fsm::CoolerState;
use peltier_cooler::status::StatusCode;

// ── Clock ─────────────────────────────────────────────────────

/// Hand-driven clock.  Interior mutability because the port takes `&self`.
pub struct MockClock {
    secs: Cell<u64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self { secs: Cell::new(0) }
    }

    pub fn advance(&self, secs: u64) {
        self.secs.set(self.secs.get() + secs);
    }
}

impl Clock for MockClock {
    fn now_secs(&self) -> u64 {
        self.secs.get()
    }
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    DefrostHeater(bool),
    Fan(bool),
    Cooling(bool),
}

// ── MockHardware ──────────────────────────────────────────────

/// Probe + outputs.  The probe returns `reading` on every query.
pub struct MockHardware {
    pub reading: Result<f32, SensorError>,
    pub calls: Vec<ActuatorCall>,
    pub outputs: ActuatorCommands,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            reading: Ok(fahrenheit_to_celsius(50.0)),
            calls: Vec::new(),
            outputs: ActuatorCommands::all_off(),
        }
    }

    /// Make the probe report `f` degrees Fahrenheit.
    pub fn set_temp_f(&mut self, f: f32) {
        self.reading = Ok(fahrenheit_to_celsius(f));
    }

    pub fn fail_probe(&mut self, error: SensorError) {
        self.reading = Err(error);
    }
}

impl TemperatureProbe for MockHardware {
    fn query_celsius(&mut self) -> Result<f32, SensorError> {
        self.reading
    }
}

impl ActuatorPort for MockHardware {
    fn set_defrost_heater(&mut self, on: bool) {
        self.calls.push(ActuatorCall::DefrostHeater(on));
        self.outputs.defrost_heater = on;
    }

    fn set_fan(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Fan(on));
        self.outputs.fan = on;
    }

    fn set_cooling(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Cooling(on));
        self.outputs.cooling = on;
    }
}

pub fn fahrenheit_to_celsius(f: f32) -> f32 {
    (f - 32.0) * 5.0 / 9.0
}

// ── Indicator ─────────────────────────────────────────────────

/// Remembers every code it was asked to blink.
pub struct MockIndicator {
    pub shown: Vec<StatusCode>,
}

#[allow(dead_code)]
impl MockIndicator {
    pub fn new() -> Self {
        Self { shown: Vec::new() }
    }

    pub fn last(&self) -> Option<StatusCode> {
        self.shown.last().copied()
    }
}

impl IndicatorPort for MockIndicator {
    fn show(&mut self, code: StatusCode) {
        self.shown.push(code);
    }
}

// ── Event sink ────────────────────────────────────────────────

/// Collects all emitted events for later inspection.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn transitions(&self) -> Vec<(CoolerState, CoolerState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A started service wired to fresh mocks.
pub struct Rig {
    pub service: CoolerService,
    pub clock: MockClock,
    pub hw: MockHardware,
    pub led: MockIndicator,
    pub sink: LogSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(CoolerConfig::default())
    }

    pub fn with_config(config: CoolerConfig) -> Self {
        let mut rig = Self {
            service: CoolerService::new(config),
            clock: MockClock::new(),
            hw: MockHardware::new(),
            led: MockIndicator::new(),
            sink: LogSink::new(),
        };
        rig.service.start(&rig.clock, &mut rig.sink);
        rig
    }

    /// One control cycle at the current clock reading.
    pub fn tick(&mut self) -> StatusCode {
        self.service
            .tick(&self.clock, &mut self.hw, &mut self.led, &mut self.sink)
    }

    /// Set the probe to `f` °F and run one cycle.
    pub fn tick_at(&mut self, f: f32) -> StatusCode {
        self.hw.set_temp_f(f);
        self.tick()
    }

    /// Advance the clock by `secs`, then run one cycle at `f` °F.
    pub fn step(&mut self, secs: u64, f: f32) -> StatusCode {
        self.clock.advance(secs);
        self.tick_at(f)
    }
}
