//! Full frost → defrost → recovery cycles through the service.
//!
//! The clock advances one minute per cycle so every tick of the frost and
//! recovery accumulators is visible.

use super::mock_hw::Rig;

use peltier_cooler::app::events::AppEvent;
use peltier_cooler::config::CoolerConfig;
use peltier_cooler::error::SensorError;
use peltier_cooler::fsm::CoolerState;
use peltier_cooler::status::StatusCode;

const MINUTE: u64 = 60;

/// Bring a fresh rig into Defrosting by accumulating frost at 35 °F.
fn drive_to_defrost(rig: &mut Rig) {
    rig.tick_at(35.0);
    assert_eq!(rig.service.state(), CoolerState::CoolingFrostForming);
    let limit = rig.service.config().frost_buildup_limit_min;
    for _ in 0..limit {
        rig.step(MINUTE, 35.0);
    }
    assert_eq!(rig.service.state(), CoolerState::CoolingFrostForming);
    assert_eq!(rig.service.frost_minutes(), limit);
    rig.step(MINUTE, 35.0);
    assert_eq!(rig.service.state(), CoolerState::Defrosting);
}

#[test]
fn frost_limit_triggers_defrost_on_crossing_minute() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    assert_eq!(rig.service.frost_minutes(), 0);
    assert_eq!(
        rig.sink.transitions(),
        vec![
            (CoolerState::CoolingNoFrost, CoolerState::CoolingFrostForming),
            (CoolerState::CoolingFrostForming, CoolerState::Defrosting),
        ]
    );
}

#[test]
fn defrosting_heats_with_fan_stopped() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    let code = rig.step(MINUTE, 38.0);
    assert_eq!(code, StatusCode::DEFROSTING);
    assert!(rig.hw.outputs.defrost_heater);
    assert!(!rig.hw.outputs.fan);
    assert!(rig.hw.outputs.cooling);
}

#[test]
fn sensor_fault_during_defrost_shows_17() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    rig.hw.fail_probe(SensorError::Disconnected);
    rig.clock.advance(MINUTE);
    let code = rig.tick();
    assert_eq!(code, StatusCode::SENSOR_FAULT);
    assert_eq!(rig.led.last(), Some(StatusCode::SENSOR_FAULT));
    // Held at the last good 35 °F, so the heater keeps running.
    assert_eq!(rig.service.state(), CoolerState::Defrosting);
    assert!(rig.hw.outputs.defrost_heater);

    let code = rig.step(MINUTE, 38.0);
    assert_eq!(code, StatusCode::DEFROSTING);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SensorRecovered)), 1);
}

#[test]
fn under_range_during_defrost_shows_18() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    let code = rig.step(MINUTE, 10.0);
    assert_eq!(code, StatusCode::UNDER_RANGE);
    assert_eq!(rig.led.last(), Some(StatusCode::UNDER_RANGE));
    assert_eq!(rig.service.state(), CoolerState::Defrosting);
}

#[test]
fn over_range_during_defrost_shows_19() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    // Clamped to 99 °F, which also ends the defrost on this cycle.
    let code = rig.step(MINUTE, 120.0);
    assert_eq!(code, StatusCode::OVER_RANGE);
    assert_eq!(rig.led.last(), Some(StatusCode::OVER_RANGE));
    assert_eq!(rig.service.state(), CoolerState::PostDefrostRecovery);
}

#[test]
fn defrosting_ignores_frost_limit_until_melted() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    for _ in 0..2000 {
        rig.step(MINUTE, 42.0);
    }
    assert_eq!(rig.service.state(), CoolerState::Defrosting);
    assert_eq!(rig.service.frost_minutes(), 0);

    rig.step(MINUTE, 44.0);
    assert_eq!(rig.service.state(), CoolerState::PostDefrostRecovery);
    assert_eq!(rig.service.post_defrost_minutes(), 0);
}

#[test]
fn recovery_lasts_just_over_ten_minutes() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    rig.step(MINUTE, 44.0);
    assert_eq!(rig.service.state(), CoolerState::PostDefrostRecovery);

    for minute in 1..=10 {
        let code = rig.step(MINUTE, 35.0);
        assert_eq!(code, StatusCode::POST_DEFROST);
        assert_eq!(rig.service.post_defrost_minutes(), minute);
        assert!(!rig.hw.outputs.defrost_heater);
        assert!(rig.hw.outputs.fan);
    }
    rig.step(MINUTE, 35.0);
    assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
    assert_eq!(rig.service.post_defrost_minutes(), 0);
}

#[test]
fn cycle_repeats_after_recovery() {
    let config = CoolerConfig {
        frost_buildup_limit_min: 3,
        defrost_recovery_min: 2,
        ..CoolerConfig::default()
    };
    let mut rig = Rig::with_config(config);
    for _ in 0..2 {
        drive_to_defrost(&mut rig);
        rig.step(MINUTE, 44.0);
        for _ in 0..3 {
            rig.step(MINUTE, 35.0);
        }
        assert_eq!(rig.service.state(), CoolerState::CoolingNoFrost);
    }
    let to_defrost = rig
        .sink
        .transitions()
        .iter()
        .filter(|(_, to)| *to == CoolerState::Defrosting)
        .count();
    assert_eq!(to_defrost, 2);
}

#[test]
fn accumulators_never_held_by_two_states() {
    let mut rig = Rig::new();
    drive_to_defrost(&mut rig);
    rig.step(MINUTE, 44.0);
    for _ in 0..5 {
        rig.step(MINUTE, 35.0);
        assert_eq!(rig.service.frost_minutes(), 0);
    }
}
