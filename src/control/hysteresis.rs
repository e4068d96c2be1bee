//! On/off hysteresis controller for the Peltier element
//!
//! Switches cooling on above `setpoint + band` and off below
//! `setpoint - band`.  Inside the band no command is issued, so the element
//! keeps whatever state it was last driven to.  Also keeps the duty-cycle
//! counters the telemetry reporter turns into a cooling percentage.

/// Observed/active period counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutyCycle {
    /// Control periods in which the controller ran.
    pub observed: u32,
    /// Periods in which the controller commanded cooling on.
    pub active: u32,
}

impl DutyCycle {
    /// Integer cooling percentage, 0 when nothing has been observed.
    pub fn percentage(&self) -> u8 {
        if self.observed == 0 {
            return 0;
        }
        let pct = u64::from(self.active) * 100 / u64::from(self.observed);
        pct.min(100) as u8
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Hysteresis controller
#[derive(Debug, Clone)]
pub struct HysteresisController {
    setpoint: f32,
    band: f32,
    duty: DutyCycle,
}

impl HysteresisController {
    pub fn new(setpoint: f32, band: f32) -> Self {
        Self {
            setpoint,
            band: band.abs(),
            duty: DutyCycle::default(),
        }
    }

    /// Evaluate one control period.
    ///
    /// Returns `Some(true)` / `Some(false)` for a new cooling command, or
    /// `None` while the temperature sits inside the dead-band.
    pub fn update(&mut self, temp: f32) -> Option<bool> {
        self.duty.observed = self.duty.observed.saturating_add(1);

        if temp > self.setpoint + self.band {
            self.duty.active = self.duty.active.saturating_add(1);
            Some(true)
        } else if temp < self.setpoint - self.band {
            Some(false)
        } else {
            None
        }
    }

    pub fn duty(&self) -> DutyCycle {
        self.duty
    }

    /// Clear the duty counters (after each telemetry emission).
    pub fn reset_duty(&mut self) {
        self.duty.reset();
    }
}
