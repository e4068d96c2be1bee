//! Periodic CSV telemetry.
//!
//! Once per interval the reporter snapshots the control state into a
//! [`TelemetryRecord`] and clears the duty-cycle counters, so each record's
//! cooling percentage covers exactly one interval.  The due time advances by
//! whole intervals from where it was, not from "now", so a slow cycle does
//! not push later records back.

use core::fmt::Write;

use heapless::String;
use serde::Serialize;

use crate::fsm::context::CoolerContext;
use crate::fsm::CoolerState;

/// Column header, written once at startup.
pub const HEADER: &str = "Minutes,TempF,CoolingPercentage,CoolerState,FrostBuildup,PostDefrostTime";

/// Longest record line: 20-digit minutes plus the other five columns.
pub const LINE_CAPACITY: usize = 64;

/// One telemetry row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    /// Whole minutes since boot.
    pub minutes: u64,
    /// Temperature as read this cycle (°F).
    pub temperature_f: f32,
    /// Share of control periods with the element on, `0..=100`.
    pub cooling_percentage: u8,
    /// `CoolerState::telemetry_code()`, `1..=4`.
    pub state_code: u8,
    pub frost_minutes: u32,
    pub post_defrost_minutes: u32,
}

impl TelemetryRecord {
    /// Snapshot the context.  Does not touch the duty counters.
    pub fn capture(ctx: &CoolerContext, state: CoolerState) -> Self {
        Self {
            minutes: ctx.now_secs / 60,
            temperature_f: ctx.temperature_f,
            cooling_percentage: ctx.hysteresis.duty().percentage(),
            state_code: state.telemetry_code(),
            frost_minutes: ctx.frost_minutes,
            post_defrost_minutes: ctx.post_defrost_minutes,
        }
    }

    /// Render as one CSV line without the line terminator.
    pub fn to_csv_line(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        // Every column is bounded, so the buffer cannot overflow.
        let _ = write!(
            line,
            "{},{:.2},{},{},{},{}",
            self.minutes,
            self.temperature_f,
            self.cooling_percentage,
            self.state_code,
            self.frost_minutes,
            self.post_defrost_minutes
        );
        line
    }
}

/// Decides when a record is due.
pub struct TelemetryReporter {
    interval_secs: u64,
    next_due_secs: u64,
}

impl TelemetryReporter {
    /// The first record is due one interval after boot.
    pub fn new(interval_secs: u64) -> Self {
        let interval_secs = interval_secs.max(1);
        Self {
            interval_secs,
            next_due_secs: interval_secs,
        }
    }

    pub fn next_due_secs(&self) -> u64 {
        self.next_due_secs
    }

    /// Emit a record if one is due at `ctx.now_secs`, then clear the duty
    /// counters.  At most one record per call.
    pub fn poll(&mut self, ctx: &mut CoolerContext, state: CoolerState) -> Option<TelemetryRecord> {
        if ctx.now_secs < self.next_due_secs {
            return None;
        }
        self.next_due_secs += self.interval_secs;
        let record = TelemetryRecord::capture(ctx, state);
        ctx.hysteresis.reset_duty();
        Some(record)
    }
}
