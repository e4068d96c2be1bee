//! Temperature acquisition — the probe driver and the bounding
//! [`TemperatureReader`].
//!
//! The reader queries the probe once per control cycle, converts to
//! Fahrenheit and clamps into the displayable range.  Out-of-range values
//! are still usable (clamped) but carry status code 18 or 19.
//!
//! A failed read must not crash the control loop: the previous good value
//! is retained and the cycle is flagged with status code 17.  Before any
//! good reading exists the upper bound is held, which keeps the element
//! cooling and keeps the machine out of frost accounting.

pub mod temperature;

use log::warn;

use crate::app::ports::TemperatureProbe;
use crate::error::{Error, SensorError};
use crate::status::StatusCode;

/// Value reported by probes that have lost their device (°C).
pub const DISCONNECTED_SENTINEL_C: f32 = -127.0;

pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

/// One bounded reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    /// Clamped (or held) temperature in °F.
    pub fahrenheit: f32,
    /// Status override for the indicator; `None` means "derive from state".
    pub status: Option<StatusCode>,
    /// Set when the probe failed this cycle and `fahrenheit` is a held value.
    pub fault: Option<SensorError>,
}

/// Bounds, converts and fault-filters probe readings.
pub struct TemperatureReader {
    min_f: f32,
    max_f: f32,
    last_good_f: Option<f32>,
    faulted: bool,
}

impl TemperatureReader {
    pub fn new(min_f: f32, max_f: f32) -> Self {
        Self {
            min_f,
            max_f,
            last_good_f: None,
            faulted: false,
        }
    }

    /// Query `probe` once and produce a bounded reading.
    pub fn read(&mut self, probe: &mut impl TemperatureProbe) -> TemperatureReading {
        match probe.query_celsius().and_then(Self::validate) {
            Ok(celsius) => {
                self.faulted = false;
                let reading = self.bound(celsius_to_fahrenheit(celsius));
                self.last_good_f = Some(reading.fahrenheit);
                reading
            }
            Err(e) => {
                let held = self.last_good_f.unwrap_or(self.max_f);
                if !self.faulted {
                    warn!("{}, holding {:.1}\u{00b0}F", Error::from(e), held);
                }
                self.faulted = true;
                TemperatureReading {
                    fahrenheit: held,
                    status: Some(StatusCode::SENSOR_FAULT),
                    fault: Some(e),
                }
            }
        }
    }

    /// Whether the most recent read failed.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    fn validate(celsius: f32) -> Result<f32, SensorError> {
        if !celsius.is_finite() {
            return Err(SensorError::NotFinite);
        }
        if celsius <= DISCONNECTED_SENTINEL_C {
            return Err(SensorError::Disconnected);
        }
        Ok(celsius)
    }

    fn bound(&self, fahrenheit: f32) -> TemperatureReading {
        let (fahrenheit, status) = if fahrenheit > self.max_f {
            (self.max_f, Some(StatusCode::OVER_RANGE))
        } else if fahrenheit < self.min_f {
            (self.min_f, Some(StatusCode::UNDER_RANGE))
        } else {
            (fahrenheit, None)
        };
        TemperatureReading {
            fahrenheit,
            status,
            fault: None,
        }
    }
}
