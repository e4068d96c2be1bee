//! Shared mutable context threaded through every FSM handler.
//!
//! `CoolerContext` is the single struct that state handlers read from and
//! write to: the latest temperature, the clock reading for this cycle, the
//! minute ticker, frost and recovery accumulators, the hysteresis controller,
//! actuator command outputs and the display code.  It replaces what would
//! otherwise be a pile of free-standing globals, and lives for the whole
//! process inside [`CoolerService`](crate::app::service::CoolerService).

use crate::config::CoolerConfig;
use crate::control::hysteresis::HysteresisController;
use crate::status::StatusCode;
use crate::ticker::MinuteTicker;

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Output levels that state handlers request.
/// The service applies these to the hardware after each FSM tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Resistive heater on the cold plate.
    pub defrost_heater: bool,
    /// Circulation fan.
    pub fan: bool,
    /// Peltier element.
    pub cooling: bool,
}

impl ActuatorCommands {
    /// All outputs de-energised.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// CoolerContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct CoolerContext {
    // -- Timing --
    /// Seconds since boot, sampled once at the start of the cycle.
    pub now_secs: u64,
    /// Minute pulse shared by the frost and recovery accumulators.
    pub ticker: MinuteTicker,

    // -- Inputs --
    /// Latest clamped temperature (°F).
    pub temperature_f: f32,

    // -- Accumulators --
    /// Minutes spent continuously in the frost-forming state.
    pub frost_minutes: u32,
    /// Minutes spent in post-defrost recovery.
    pub post_defrost_minutes: u32,

    // -- Control --
    pub hysteresis: HysteresisController,
    /// Outputs to apply after the FSM tick.
    pub commands: ActuatorCommands,
    /// Display code derived by the active state.
    pub status: StatusCode,

    // -- Configuration --
    pub config: CoolerConfig,
}

impl CoolerContext {
    /// Create a new context with the given configuration.
    pub fn new(config: CoolerConfig) -> Self {
        Self {
            now_secs: 0,
            ticker: MinuteTicker::new(),
            temperature_f: config.setpoint_f,
            frost_minutes: 0,
            post_defrost_minutes: 0,
            hysteresis: HysteresisController::new(config.setpoint_f, config.hysteresis_f),
            commands: ActuatorCommands::all_off(),
            status: StatusCode::from_temperature(config.setpoint_f),
            config,
        }
    }

    /// Restart the minute window at the current cycle's time.
    pub fn reset_ticker(&mut self) {
        self.ticker.reset(self.now_secs);
    }

    /// Minute pulse for this cycle: 1 if a boundary passed, else 0.
    pub fn poll_ticker(&mut self) -> u32 {
        self.ticker.poll(self.now_secs)
    }

    /// Feed the current temperature through the hysteresis controller and
    /// apply any new cooling command.  Holds the previous level in the band.
    pub fn run_hysteresis(&mut self) {
        if let Some(on) = self.hysteresis.update(self.temperature_f) {
            self.commands.cooling = on;
        }
    }

    /// Display code for the normal cooling states.
    pub fn temperature_code(&self) -> StatusCode {
        StatusCode::from_temperature(self.temperature_f)
    }
}
