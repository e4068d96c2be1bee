//! GPIO / peripheral pin assignments for the cooler controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Power outputs (logic-level MOSFET gates, active HIGH)
// ---------------------------------------------------------------------------

/// Cold-plate defrost heater.
pub const DEFROST_HEATER_GPIO: i32 = 4;
/// Cabinet circulation fan.
pub const FAN_GPIO: i32 = 5;
/// Peltier element supply.
pub const COOLING_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------

/// Single status LED that blinks the two-digit status code.
pub const INDICATOR_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor — 10 kΩ @ 25 °C, voltage-divider to ADC.
pub const TEMP_ADC_GPIO: i32 = 9;

/// ADC1 channel sampled for the NTC.
pub const TEMP_ADC1_CHANNEL: u32 = match adc1_channel(TEMP_ADC_GPIO) {
    Some(channel) => channel,
    None => panic!("TEMP_ADC_GPIO is not an ADC1 pin"),
};

/// ESP32-S3 ADC1 mapping: GPIO 1..=10 are channels 0..=9.
pub const fn adc1_channel(gpio: i32) -> Option<u32> {
    if matches!(gpio, 1..=10) {
        Some((gpio - 1).unsigned_abs())
    } else {
        None
    }
}
