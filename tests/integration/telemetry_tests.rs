//! Telemetry cadence and CSV output through the full service.

use super::mock_hw::{MockClock, MockHardware, MockIndicator, Rig};

use peltier_cooler::adapters::serial_sink::SerialTelemetrySink;
use peltier_cooler::app::events::AppEvent;
use peltier_cooler::app::service::CoolerService;
use peltier_cooler::config::CoolerConfig;
use peltier_cooler::telemetry::{TelemetryRecord, HEADER};

fn records(rig: &Rig) -> Vec<TelemetryRecord> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(r) => Some(r.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn fast_cycle_reports_once_a_minute() {
    let mut rig = Rig::new();
    for _ in 0..60 {
        rig.step(10, 50.0);
    }
    let recs = records(&rig);
    assert_eq!(recs.len(), 10);
    let minutes: Vec<u64> = recs.iter().map(|r| r.minutes).collect();
    assert_eq!(minutes, (1..=10).collect::<Vec<_>>());
}

#[test]
fn slow_cycle_never_emits_twice_in_one_cycle() {
    let mut rig = Rig::new();
    for _ in 0..8 {
        let before = records(&rig).len();
        rig.step(150, 50.0);
        assert!(records(&rig).len() - before <= 1);
    }
}

#[test]
fn cooling_percentage_restarts_after_each_record() {
    let mut rig = Rig::new();
    for _ in 0..6 {
        rig.step(10, 45.0);
    }
    for _ in 0..6 {
        rig.step(10, 32.0);
    }
    let recs = records(&rig);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].cooling_percentage, 100);
    assert_eq!(recs[0].state_code, 1);
    assert_eq!(recs[1].cooling_percentage, 0);
    assert_eq!(recs[1].state_code, 2);
}

#[test]
fn mixed_minute_reports_partial_duty() {
    let mut rig = Rig::new();
    for i in 0..6 {
        let temp = if i % 2 == 0 { 45.0 } else { 32.0 };
        rig.step(10, temp);
    }
    let recs = records(&rig);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].cooling_percentage, 50);
}

#[test]
fn serial_sink_writes_header_then_csv_rows() {
    let clock = MockClock::new();
    let mut hw = MockHardware::new();
    let mut led = MockIndicator::new();
    let mut sink = SerialTelemetrySink::new(Vec::new());
    let mut service = CoolerService::new(CoolerConfig::default());

    service.start(&clock, &mut sink);
    hw.set_temp_f(50.0);
    for _ in 0..3 {
        clock.advance(60);
        service.tick(&clock, &mut hw, &mut led, &mut sink);
    }

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], "1,50.00,100,1,0,0");
    assert!(lines[3].starts_with("3,"));
    assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 6));
}
