//! Indicator driver, blink-code encoding, and peripheral bring-up.

pub mod hw_init;
pub mod led_patterns;
pub mod status_led;
