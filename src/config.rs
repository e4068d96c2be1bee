//! Cooler configuration parameters
//!
//! Every tunable of the control loop lives here.  The values are fixed at
//! build time: [`CoolerConfig::default()`] is the single source of truth and
//! nothing loads or persists a configuration at runtime.

use serde::{Deserialize, Serialize};

/// Core cooler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolerConfig {
    // --- Hysteresis control ---
    /// Target cabinet temperature (°F)
    pub setpoint_f: f32,
    /// Half-width of the dead-band around the setpoint (°F)
    pub hysteresis_f: f32,

    // --- Frost management ---
    /// Below this temperature frost starts forming on the cold plate (°F)
    pub frost_forming_f: f32,
    /// Above this temperature any frost is considered melted (°F)
    pub frost_melted_f: f32,
    /// Minutes of frost-forming operation before a defrost is forced
    pub frost_buildup_limit_min: u32,
    /// Minutes of recovery after a defrost before normal cooling resumes
    pub defrost_recovery_min: u32,

    // --- Sensor bounds ---
    /// Lowest reportable temperature (°F); lower readings are clamped
    pub sensor_min_f: f32,
    /// Highest reportable temperature (°F); higher readings are clamped
    pub sensor_max_f: f32,

    // --- Timing ---
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for CoolerConfig {
    fn default() -> Self {
        Self {
            // Hysteresis
            setpoint_f: 32.5,
            hysteresis_f: 0.125,

            // Frost
            frost_forming_f: 40.0,
            frost_melted_f: 43.0,
            frost_buildup_limit_min: 1440, // 24 h
            defrost_recovery_min: 10,

            // Sensor
            sensor_min_f: 20.0,
            sensor_max_f: 99.0,

            // Timing
            telemetry_interval_secs: 60, // 1/min
        }
    }
}

impl CoolerConfig {
    /// Lower edge of the hysteresis dead-band.
    pub fn cut_out_f(&self) -> f32 {
        self.setpoint_f - self.hysteresis_f
    }

    /// Upper edge of the hysteresis dead-band.
    pub fn cut_in_f(&self) -> f32 {
        self.setpoint_f + self.hysteresis_f
    }

    /// Check the relations the control logic depends on.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.hysteresis_f <= 0.0 {
            return Err("hysteresis must be positive");
        }
        if self.frost_melted_f <= self.frost_forming_f {
            return Err("frost-melted threshold must be above frost-forming threshold");
        }
        if self.sensor_min_f >= self.sensor_max_f {
            return Err("sensor bounds are empty");
        }
        if self.telemetry_interval_secs == 0 {
            return Err("telemetry interval must be non-zero");
        }
        if self.sensor_max_f >= 100.0 || self.sensor_min_f < 0.0 {
            return Err("sensor bounds must fit a two-digit status code");
        }
        Ok(())
    }
}
