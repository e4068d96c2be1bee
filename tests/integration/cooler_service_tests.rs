//! Integration tests for the CoolerService → FSM → actuators pipeline.
//!
//! Drive the service through mock adapters and check what reaches the
//! outputs, the indicator and the event sink.

use super::mock_hw::{ActuatorCall, Rig};

use peltier_cooler::app::events::AppEvent;
use peltier_cooler::error::SensorError;
use peltier_cooler::fsm::CoolerState;
use peltier_cooler::status::StatusCode;

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_emits_started_in_no_frost() {
    let rig = Rig::new();
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
    assert!(matches!(
        rig.sink.events.as_slice(),
        [AppEvent::Started(CoolerState::CoolingNoFrost)]
    ));
    assert_eq!(rig.service.cycle_count(), 0);
}

#[test]
fn every_cycle_drives_all_three_outputs_and_the_led() {
    let mut rig = Rig::new();
    rig.tick_at(50.0);
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall::DefrostHeater(false),
            ActuatorCall::Fan(true),
            ActuatorCall::Cooling(true),
        ]
    );
    assert_eq!(rig.led.shown, vec![StatusCode::new(50)]);
    assert_eq!(rig.service.cycle_count(), 1);
}

// ── Hysteresis through the service ────────────────────────────

#[test]
fn cooling_follows_hysteresis_band() {
    let mut rig = Rig::new();
    rig.tick_at(45.0);
    assert!(rig.hw.outputs.cooling);

    // 41 °F keeps the machine in NoFrost; still above the band.
    rig.tick_at(41.0);
    assert!(rig.hw.outputs.cooling);
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
}

#[test]
fn dead_band_holds_previous_command() {
    let mut rig = Rig::new();
    // Enter frost forming, then pull below the band.
    rig.tick_at(35.0);
    rig.tick_at(32.0);
    assert!(!rig.hw.outputs.cooling);
    rig.tick_at(32.5);
    assert!(!rig.hw.outputs.cooling, "in-band reading must not switch on");
    rig.tick_at(33.0);
    assert!(rig.hw.outputs.cooling);
    rig.tick_at(32.5);
    assert!(rig.hw.outputs.cooling, "in-band reading must not switch off");
}

// ── Frost entry ───────────────────────────────────────────────

#[test]
fn frost_forming_entered_on_third_reading() {
    let mut rig = Rig::new();
    rig.tick_at(45.0);
    rig.tick_at(45.0);
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
    let code = rig.tick_at(39.0);
    assert_eq!(rig.service.state(), CoolerState::CoolingFrostForming);
    assert_eq!(rig.service.frost_minutes(), 0);
    assert_eq!(code, StatusCode::new(39));
    assert_eq!(
        rig.sink.transitions(),
        vec![(CoolerState::CoolingNoFrost, CoolerState::CoolingFrostForming)]
    );
}

#[test]
fn warming_past_frost_melted_returns_to_no_frost() {
    let mut rig = Rig::new();
    rig.tick_at(35.0);
    rig.step(60, 35.0);
    rig.step(60, 35.0);
    assert_eq!(rig.service.frost_minutes(), 2);
    rig.step(60, 44.0);
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
}

#[test]
fn reading_between_thresholds_keeps_frost_forming() {
    let mut rig = Rig::new();
    rig.tick_at(35.0);
    rig.tick_at(42.0);
    assert_eq!(rig.service.state(), CoolerState::CoolingFrostForming);
}

// ── Sensor range and faults ───────────────────────────────────

#[test]
fn over_range_clamps_and_shows_19() {
    let mut rig = Rig::new();
    let code = rig.tick_at(120.0);
    assert_eq!(code, StatusCode::OVER_RANGE);
    assert!((rig.service.temperature_f() - 99.0).abs() < f32::EPSILON);
    assert!(rig.hw.outputs.cooling);
}

#[test]
fn under_range_clamps_and_shows_18() {
    let mut rig = Rig::new();
    let code = rig.tick_at(5.0);
    assert_eq!(code, StatusCode::UNDER_RANGE);
    assert!((rig.service.temperature_f() - 20.0).abs() < f32::EPSILON);
    // 20 °F is below the frost-forming threshold.
    assert_eq!(rig.service.state(), CoolerState::CoolingFrostForming);
    assert!(!rig.hw.outputs.cooling);
}

#[test]
fn probe_fault_holds_last_value_and_reports_17() {
    let mut rig = Rig::new();
    rig.tick_at(45.0);
    rig.hw.fail_probe(SensorError::Disconnected);
    for _ in 0..3 {
        assert_eq!(rig.tick(), StatusCode::SENSOR_FAULT);
    }
    assert!((rig.service.temperature_f() - 45.0).abs() < 0.01);
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::SensorFault { error: SensorError::Disconnected, .. })),
        1
    );

    let code = rig.tick_at(44.0);
    assert_eq!(code, StatusCode::new(44));
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SensorRecovered)), 1);
}

#[test]
fn fault_before_any_reading_keeps_cooling() {
    let mut rig = Rig::new();
    rig.hw.fail_probe(SensorError::AdcReadFailed);
    assert_eq!(rig.tick(), StatusCode::SENSOR_FAULT);
    assert!(rig.hw.outputs.cooling);
    assert!(rig.hw.outputs.fan);
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
}

#[test]
fn nan_reading_is_a_fault() {
    let mut rig = Rig::new();
    rig.hw.reading = Ok(f32::NAN);
    assert_eq!(rig.tick(), StatusCode::SENSOR_FAULT);
}
