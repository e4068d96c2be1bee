//! Application service — the hexagonal core.
//!
//! [`CoolerService`] owns the FSM, the shared context, the temperature
//! reader and the telemetry reporter.  All I/O flows through port traits
//! injected at call sites, so the whole control cycle runs on the host
//! against mock adapters.
//!
//! ```text
//!   Clock ─────────▶ ┌────────────────────────┐ ──▶ EventSink
//!   TemperatureProbe▶│     CoolerService      │ ──▶ IndicatorPort
//!   ActuatorPort ◀───│ Reader · FSM · Telemetry│
//!                    └────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::CoolerConfig;
use crate::fsm::context::{ActuatorCommands, CoolerContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{CoolerState, Fsm};
use crate::sensors::TemperatureReader;
use crate::status::StatusCode;
use crate::telemetry::TelemetryReporter;

use super::events::AppEvent;
use super::ports::{ActuatorPort, Clock, EventSink, IndicatorPort, TemperatureProbe};

// ───────────────────────────────────────────────────────────────
// CoolerService
// ───────────────────────────────────────────────────────────────

/// Runs one control cycle per [`tick`](Self::tick).
pub struct CoolerService {
    fsm: Fsm,
    ctx: CoolerContext,
    reader: TemperatureReader,
    telemetry: TelemetryReporter,
    /// Code shown on the last cycle, after fault/range overrides.
    status: StatusCode,
    cycle_count: u64,
}

impl CoolerService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: CoolerConfig) -> Self {
        let reader = TemperatureReader::new(config.sensor_min_f, config.sensor_max_f);
        let telemetry = TelemetryReporter::new(u64::from(config.telemetry_interval_secs));
        let ctx = CoolerContext::new(config);
        let status = ctx.status;
        let fsm = Fsm::new(build_state_table(), CoolerState::CoolingNoFrost);

        Self {
            fsm,
            ctx,
            reader,
            telemetry,
            status,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial state and announce it (sinks write the CSV header).
    pub fn start(&mut self, clock: &impl Clock, sink: &mut impl EventSink) {
        self.ctx.now_secs = clock.now_secs();
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "CoolerService started in {:?}, setpoint {:.2}\u{00b0}F",
            self.fsm.current_state(),
            self.ctx.config.setpoint_f
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// read → FSM → actuators → indicator → telemetry.
    ///
    /// The `hw` parameter satisfies **both** [`TemperatureProbe`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow of the board.
    /// Blocks for as long as the indicator takes to play the code.
    pub fn tick(
        &mut self,
        clock: &impl Clock,
        hw: &mut (impl TemperatureProbe + ActuatorPort),
        indicator: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) -> StatusCode {
        self.cycle_count += 1;
        self.ctx.now_secs = clock.now_secs();
        let prev_state = self.fsm.current_state();

        // 1. Read the probe
        let was_faulted = self.reader.is_faulted();
        let reading = self.reader.read(hw);
        match reading.fault {
            Some(error) if !was_faulted => sink.emit(&AppEvent::SensorFault {
                error,
                held_f: reading.fahrenheit,
            }),
            None if was_faulted => {
                info!("Temperature probe recovered");
                sink.emit(&AppEvent::SensorRecovered);
            }
            _ => {}
        }
        self.ctx.temperature_f = reading.fahrenheit;

        // 2. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);

        // 3. Reader overrides win over the state-derived code
        self.status = reading.status.unwrap_or(self.ctx.status);

        // 4. Apply actuator commands via ActuatorPort
        self.apply_actuators(hw);

        // 5. Emit state change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        debug!(
            "cycle {} | t={}s | {:.2}\u{00b0}F | {:?} | code {} | {:?}",
            self.cycle_count,
            self.ctx.now_secs,
            self.ctx.temperature_f,
            new_state,
            self.status,
            self.ctx.commands
        );

        // 6. Blink the code (blocking)
        indicator.show(self.status);

        // 7. Periodic telemetry
        if let Some(record) = self.telemetry.poll(&mut self.ctx, new_state) {
            sink.emit(&AppEvent::Telemetry(record));
        }

        self.status
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> CoolerState {
        self.fsm.current_state()
    }

    /// Code shown on the most recent cycle.
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn frost_minutes(&self) -> u32 {
        self.ctx.frost_minutes
    }

    pub fn post_defrost_minutes(&self) -> u32 {
        self.ctx.post_defrost_minutes
    }

    /// Control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Output levels requested on the most recent cycle.
    pub fn commands(&self) -> ActuatorCommands {
        self.ctx.commands
    }

    /// Temperature used on the most recent cycle (°F, clamped or held).
    pub fn temperature_f(&self) -> f32 {
        self.ctx.temperature_f
    }

    pub fn config(&self) -> &CoolerConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate FSM actuator commands into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let cmds = &self.ctx.commands;
        hw.set_defrost_heater(cmds.defrost_heater);
        hw.set_fan(cmds.fan);
        hw.set_cooling(cmds.cooling);
    }
}
