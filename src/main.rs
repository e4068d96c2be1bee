//! Peltier Cooler Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      StatusLed       SerialTelemetrySink      │
//! │  (Actuator + Probe)   (Indicator)     (EventSink)              │
//! │  MonotonicClock (Clock)                                        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            CoolerService (pure logic)                  │    │
//! │  │  TemperatureReader · FSM · Hysteresis · Telemetry      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop has no sleep of its own: each cycle blocks while the status LED
//! plays the code, which sets the control rate.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info};

use peltier_cooler::adapters::hardware::HardwareAdapter;
use peltier_cooler::adapters::serial_sink::{SerialTelemetrySink, CONSOLE_LOG_LEVEL};
use peltier_cooler::adapters::time::MonotonicClock;
use peltier_cooler::app::ports::ActuatorPort;
use peltier_cooler::app::service::CoolerService;
use peltier_cooler::config::CoolerConfig;
use peltier_cooler::drivers::hw_init;
use peltier_cooler::drivers::status_led::StatusLed;
use peltier_cooler::error::Error;
use peltier_cooler::pins;
use peltier_cooler::sensors::temperature::NtcProbe;

// `Peripherals` hands out typed pin fields; these tie the ones taken below
// to `pins.rs`.
const _: () = {
    assert!(pins::DEFROST_HEATER_GPIO == 4);
    assert!(pins::FAN_GPIO == 5);
    assert!(pins::COOLING_GPIO == 6);
    assert!(pins::INDICATOR_LED_GPIO == 2);
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Peltier cooler v{}               ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = CoolerConfig::default();
    config.validate().map_err(Error::Init)?;

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the probe the reader would hold 99 °F forever; keep
        // going so the LED shows code 17 instead of a dark board.
        error!("HAL init failed: {}, probe reads will fault", e);
    }
    let peripherals = Peripherals::take()?;

    let heater = PinDriver::output(peripherals.pins.gpio4)?;
    let fan = PinDriver::output(peripherals.pins.gpio5)?;
    let cooling = PinDriver::output(peripherals.pins.gpio6)?;
    let led_pin = PinDriver::output(peripherals.pins.gpio2)?;
    info!(
        "Outputs: heater=GPIO{} fan=GPIO{} cooling=GPIO{} led=GPIO{}, NTC on GPIO{} (ADC1 CH{})",
        pins::DEFROST_HEATER_GPIO,
        pins::FAN_GPIO,
        pins::COOLING_GPIO,
        pins::INDICATOR_LED_GPIO,
        pins::TEMP_ADC_GPIO,
        pins::TEMP_ADC1_CHANNEL
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(heater, fan, cooling, NtcProbe);
    hw.all_off();
    let mut led = StatusLed::new(led_pin, Delay::new_default());
    let mut sink = SerialTelemetrySink::new(std::io::stdout());
    let clock = MonotonicClock::new();

    // ── 5. Control loop ───────────────────────────────────────
    let mut service = CoolerService::new(config);
    info!("Console log level now {}, CSV follows", CONSOLE_LOG_LEVEL);
    log::set_max_level(CONSOLE_LOG_LEVEL);
    service.start(&clock, &mut sink);

    loop {
        service.tick(&clock, &mut hw, &mut led, &mut sink);
    }
}
