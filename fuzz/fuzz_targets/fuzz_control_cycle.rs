//! Fuzz target: control cycle
//!
//! Feeds arbitrary (elapsed seconds, probe reading) traces through
//! `CoolerService::tick` and verifies:
//! - No panics for any reading, including NaN, infinities and the
//!   disconnected sentinel
//! - The status code always fits two digits
//! - Heater and fan are never on together
//!
//! cargo fuzz run fuzz_control_cycle

#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use peltier_cooler::app::events::AppEvent;
use peltier_cooler::app::ports::{ActuatorPort, Clock, EventSink, IndicatorPort, TemperatureProbe};
use peltier_cooler::app::service::CoolerService;
use peltier_cooler::config::CoolerConfig;
use peltier_cooler::error::SensorError;
use peltier_cooler::fsm::context::ActuatorCommands;
use peltier_cooler::status::StatusCode;

struct FuzzClock(Cell<u64>);

impl Clock for FuzzClock {
    fn now_secs(&self) -> u64 {
        self.0.get()
    }
}

struct FuzzBoard {
    reading: Result<f32, SensorError>,
    outputs: ActuatorCommands,
}

impl TemperatureProbe for FuzzBoard {
    fn query_celsius(&mut self) -> Result<f32, SensorError> {
        self.reading
    }
}

impl ActuatorPort for FuzzBoard {
    fn set_defrost_heater(&mut self, on: bool) {
        self.outputs.defrost_heater = on;
    }
    fn set_fan(&mut self, on: bool) {
        self.outputs.fan = on;
    }
    fn set_cooling(&mut self, on: bool) {
        self.outputs.cooling = on;
    }
}

struct NullLed;

impl IndicatorPort for NullLed {
    fn show(&mut self, _code: StatusCode) {}
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Telemetry(record) = event {
            let _ = record.to_csv_line();
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let config = CoolerConfig {
        frost_buildup_limit_min: 5,
        defrost_recovery_min: 2,
        ..CoolerConfig::default()
    };
    let clock = FuzzClock(Cell::new(0));
    let mut board = FuzzBoard {
        reading: Ok(0.0),
        outputs: ActuatorCommands::all_off(),
    };
    let mut svc = CoolerService::new(config);
    svc.start(&clock, &mut NullSink);

    // 5 bytes per cycle: 1 byte elapsed seconds + 4 bytes f32 (LE).
    for chunk in data.chunks_exact(5) {
        clock.0.set(clock.0.get() + u64::from(chunk[0]));
        let raw = f32::from_le_bytes([chunk[1], chunk[2], chunk[3], chunk[4]]);
        // Every 16th elapsed value simulates a failed ADC read.
        board.reading = if chunk[0] % 16 == 15 {
            Err(SensorError::AdcReadFailed)
        } else {
            Ok(raw)
        };

        let code = svc.tick(&clock, &mut board, &mut NullLed, &mut NullSink);
        assert!(code.value() <= 99);
        assert!(!(board.outputs.defrost_heater && board.outputs.fan));
    }
});
