//! Single-LED status indicator driver.
//!
//! Plays a [`BlinkSequence`](super::led_patterns::BlinkSequence) on one
//! GPIO with blocking delays.  A full code takes several seconds; that wait
//! is what paces the control loop.
//!
//! Generic over `embedded-hal` 1.0 traits so the same driver runs on an
//! `esp-idf-hal` `PinDriver` + `Delay` and on host mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use super::led_patterns::{encode, BlinkStep};
use crate::app::ports::IndicatorPort;
use crate::error::{ActuatorError, Error};
use crate::status::StatusCode;

/// Blink timing (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTiming {
    pub short_on_ms: u32,
    pub long_on_ms: u32,
    /// Dark time after every pulse.
    pub gap_ms: u32,
    pub digit_pause_ms: u32,
    pub code_pause_ms: u32,
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self {
            short_on_ms: 150,
            long_on_ms: 500,
            gap_ms: 350,
            digit_pause_ms: 1200,
            code_pause_ms: 3000,
        }
    }
}

impl BlinkTiming {
    /// Wall time one code takes to play.
    fn duration_ms(&self, code: StatusCode) -> u32 {
        encode(code)
            .iter()
            .map(|step| match step {
                BlinkStep::ShortPulse => self.short_on_ms + self.gap_ms,
                BlinkStep::LongPulse => self.long_on_ms + self.gap_ms,
                BlinkStep::DigitPause => self.digit_pause_ms,
                BlinkStep::CodePause => self.code_pause_ms,
            })
            .sum()
    }
}

pub struct StatusLed<P, D> {
    pin: P,
    delay: D,
    timing: BlinkTiming,
}

impl<P: OutputPin, D: DelayNs> StatusLed<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self::with_timing(pin, delay, BlinkTiming::default())
    }

    pub fn with_timing(pin: P, delay: D, timing: BlinkTiming) -> Self {
        Self {
            pin,
            delay,
            timing,
        }
    }

    fn pulse(&mut self, on_ms: u32) {
        self.set(true);
        self.delay.delay_ms(on_ms);
        self.set(false);
        self.delay.delay_ms(self.timing.gap_ms);
    }

    fn set(&mut self, on: bool) {
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        if res.is_err() {
            warn!("{}", Error::Actuator(ActuatorError::Indicator));
        }
    }
}

impl<P: OutputPin, D: DelayNs> IndicatorPort for StatusLed<P, D> {
    fn show(&mut self, code: StatusCode) {
        debug!("LED: code {} ({} ms)", code, self.timing.duration_ms(code));
        for step in encode(code) {
            match step {
                BlinkStep::ShortPulse => self.pulse(self.timing.short_on_ms),
                BlinkStep::LongPulse => self.pulse(self.timing.long_on_ms),
                BlinkStep::DigitPause => self.delay.delay_ms(self.timing.digit_pause_ms),
                BlinkStep::CodePause => self.delay.delay_ms(self.timing.code_pause_ms),
            }
        }
    }
}
