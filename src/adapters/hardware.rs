//! Hardware adapter — bridges the board's outputs and probe to port traits.
//!
//! Owns the three power-output pins and the temperature probe, exposing them
//! through [`ActuatorPort`] and [`TemperatureProbe`].  Generic over
//! `embedded-hal` output pins so the firmware passes `esp-idf-hal`
//! `PinDriver`s and host tests pass mock pins.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ActuatorPort, TemperatureProbe};
use crate::error::{ActuatorError, Error, SensorError};
use crate::fsm::context::ActuatorCommands;

/// Concrete adapter that combines all cooler hardware behind port traits.
pub struct HardwareAdapter<H, F, C, T> {
    heater: H,
    fan: F,
    cooling: C,
    probe: T,
    /// Levels last written to the pins.
    levels: ActuatorCommands,
}

impl<H, F, C, T> HardwareAdapter<H, F, C, T>
where
    H: OutputPin,
    F: OutputPin,
    C: OutputPin,
    T: TemperatureProbe,
{
    pub fn new(heater: H, fan: F, cooling: C, probe: T) -> Self {
        Self {
            heater,
            fan,
            cooling,
            probe,
            levels: ActuatorCommands::all_off(),
        }
    }

    /// Levels most recently commanded on each output.
    pub fn levels(&self) -> ActuatorCommands {
        self.levels
    }
}

/// Drive `pin` to `on`, naming the output on failure.
fn drive<P: OutputPin>(pin: &mut P, on: bool, which: ActuatorError) -> Result<(), Error> {
    let res = if on { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| Error::Actuator(which))
}

/// A failed write is logged and otherwise ignored; the loop keeps running.
fn switch<P: OutputPin>(pin: &mut P, on: bool, which: ActuatorError) {
    if let Err(e) = drive(pin, on, which) {
        warn!("{} (wanted {})", e, if on { "on" } else { "off" });
    }
}

// ── TemperatureProbe implementation ───────────────────────────

impl<H, F, C, T: TemperatureProbe> TemperatureProbe for HardwareAdapter<H, F, C, T> {
    fn query_celsius(&mut self) -> Result<f32, SensorError> {
        self.probe.query_celsius()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<H, F, C, T> ActuatorPort for HardwareAdapter<H, F, C, T>
where
    H: OutputPin,
    F: OutputPin,
    C: OutputPin,
{
    fn set_defrost_heater(&mut self, on: bool) {
        switch(&mut self.heater, on, ActuatorError::DefrostHeater);
        self.levels.defrost_heater = on;
    }

    fn set_fan(&mut self, on: bool) {
        switch(&mut self.fan, on, ActuatorError::Fan);
        self.levels.fan = on;
    }

    fn set_cooling(&mut self, on: bool) {
        switch(&mut self.cooling, on, ActuatorError::Cooling);
        self.levels.cooling = on;
    }
}
