//! Peltier cooler controller library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod status;
pub mod telemetry;
pub mod ticker;

// Hardware-facing modules; the ESP-IDF paths are cfg-gated inside.
pub mod adapters;
pub mod control;
pub mod drivers;
pub mod sensors;
