//! Two-digit status codes shown on the indicator LED.
//!
//! In the normal cooling states the code is simply the current temperature
//! rounded to the nearest degree.  A handful of values below the sensor's
//! lower bound (20 °F) can never be a temperature, so they are reserved:
//!
//! | Code | Meaning                         |
//! |------|---------------------------------|
//! | 11   | Defrost in progress             |
//! | 12   | Post-defrost recovery           |
//! | 17   | Temperature probe fault         |
//! | 18   | Reading below sensor bounds     |
//! | 19   | Reading above sensor bounds     |

use core::fmt;

/// A displayable status code, always in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u8);

impl StatusCode {
    pub const DEFROSTING: Self = Self(11);
    pub const POST_DEFROST: Self = Self(12);
    pub const SENSOR_FAULT: Self = Self(17);
    pub const UNDER_RANGE: Self = Self(18);
    pub const OVER_RANGE: Self = Self(19);

    /// Build a code from a raw value.  Values above 99 saturate to 99.
    pub const fn new(value: u8) -> Self {
        if value > 99 { Self(99) } else { Self(value) }
    }

    /// Round a temperature to the nearest degree (half away from zero) and
    /// use it as the code.  The reader clamps temperatures to [20, 99] first,
    /// so saturation here only guards against misuse.
    pub fn from_temperature(fahrenheit: f32) -> Self {
        let rounded = fahrenheit.round();
        if rounded.is_nan() || rounded <= 0.0 {
            Self(0)
        } else if rounded >= 99.0 {
            Self(99)
        } else {
            Self(rounded as u8)
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// `(tens, ones)` digit split.
    pub const fn digits(self) -> (u8, u8) {
        (self.0 / 10, self.0 % 10)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
