//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers, without closures or
//! dynamic dispatch.
//!
//! ```text
//!   COOLING_NO_FROST ──[T < frost-forming]──▶ COOLING_FROST_FORMING
//!      ▲        ▲                                   │        │
//!      │        └─────────[T > frost-melted]────────┘        │
//!      │                                     [frost > limit] │
//!      │                                                     ▼
//!   POST_DEFROST_RECOVERY ◀──[T > frost-melted]──────── DEFROSTING
//!      │
//!      └──[recovery > limit]──▶ COOLING_NO_FROST
//! ```
//!
//! The frost-forming state tests temperature recovery *before* the frost
//! limit, so a cycle that satisfies both returns to normal cooling.

use super::context::CoolerContext;
use super::{CoolerState, StateDescriptor};
use crate::status::StatusCode;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; CoolerState::COUNT] {
    [
        // Index 0 — CoolingNoFrost
        StateDescriptor {
            id: CoolerState::CoolingNoFrost,
            name: "CoolingNoFrost",
            on_enter: None,
            on_exit: None,
            on_update: no_frost_update,
        },
        // Index 1 — CoolingFrostForming
        StateDescriptor {
            id: CoolerState::CoolingFrostForming,
            name: "CoolingFrostForming",
            on_enter: Some(frost_forming_enter),
            on_exit: None,
            on_update: frost_forming_update,
        },
        // Index 2 — Defrosting
        StateDescriptor {
            id: CoolerState::Defrosting,
            name: "Defrosting",
            on_enter: Some(defrosting_enter),
            on_exit: Some(defrosting_exit),
            on_update: defrosting_update,
        },
        // Index 3 — PostDefrostRecovery
        StateDescriptor {
            id: CoolerState::PostDefrostRecovery,
            name: "PostDefrostRecovery",
            on_enter: Some(recovery_enter),
            on_exit: Some(recovery_exit),
            on_update: recovery_update,
        },
    ]
}

/// Fan on, heater off, Peltier under hysteresis control.
fn run_normal_cooling(ctx: &mut CoolerContext) {
    ctx.commands.defrost_heater = false;
    ctx.commands.fan = true;
    ctx.run_hysteresis();
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLING_NO_FROST — cold plate above the frost band
// ═══════════════════════════════════════════════════════════════════════════

fn no_frost_update(ctx: &mut CoolerContext) -> Option<CoolerState> {
    run_normal_cooling(ctx);
    ctx.status = ctx.temperature_code();

    if ctx.temperature_f < ctx.config.frost_forming_f {
        return Some(CoolerState::CoolingFrostForming);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLING_FROST_FORMING — accumulating frost minutes
// ═══════════════════════════════════════════════════════════════════════════

fn frost_forming_enter(ctx: &mut CoolerContext) {
    ctx.frost_minutes = 0;
    ctx.reset_ticker();
    info!(
        "FROST_FORMING: {:.1}\u{00b0}F, defrost after {} min",
        ctx.temperature_f, ctx.config.frost_buildup_limit_min
    );
}

fn frost_forming_update(ctx: &mut CoolerContext) -> Option<CoolerState> {
    run_normal_cooling(ctx);
    let pulse = ctx.poll_ticker();
    ctx.frost_minutes = ctx.frost_minutes.saturating_add(pulse);
    ctx.status = ctx.temperature_code();

    // Temperature recovery takes precedence over the frost limit.
    if ctx.temperature_f > ctx.config.frost_melted_f {
        return Some(CoolerState::CoolingNoFrost);
    }

    if ctx.frost_minutes > ctx.config.frost_buildup_limit_min {
        info!(
            "FROST_FORMING: {} min of frost buildup, starting defrost",
            ctx.frost_minutes
        );
        return Some(CoolerState::Defrosting);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DEFROSTING — heater melting the cold plate, fan stopped
// ═══════════════════════════════════════════════════════════════════════════

fn defrosting_enter(ctx: &mut CoolerContext) {
    ctx.frost_minutes = 0;
    info!("DEFROSTING: fan off, heater on");
}

fn defrosting_exit(ctx: &mut CoolerContext) {
    ctx.frost_minutes = 0;
    ctx.reset_ticker();
    info!("DEFROSTING: frost melted at {:.1}\u{00b0}F", ctx.temperature_f);
}

fn defrosting_update(ctx: &mut CoolerContext) -> Option<CoolerState> {
    ctx.commands.fan = false;
    ctx.commands.defrost_heater = true;
    ctx.commands.cooling = true;
    ctx.status = StatusCode::DEFROSTING;

    // No frost limit here; only melting ends a defrost.
    if ctx.temperature_f > ctx.config.frost_melted_f {
        return Some(CoolerState::PostDefrostRecovery);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  POST_DEFROST_RECOVERY — pulling the cabinet back down
// ═══════════════════════════════════════════════════════════════════════════

fn recovery_enter(ctx: &mut CoolerContext) {
    ctx.post_defrost_minutes = 0;
    info!(
        "RECOVERY: resuming cooling for {} min",
        ctx.config.defrost_recovery_min
    );
}

fn recovery_exit(ctx: &mut CoolerContext) {
    ctx.post_defrost_minutes = 0;
}

fn recovery_update(ctx: &mut CoolerContext) -> Option<CoolerState> {
    run_normal_cooling(ctx);
    let pulse = ctx.poll_ticker();
    ctx.post_defrost_minutes = ctx.post_defrost_minutes.saturating_add(pulse);
    ctx.status = StatusCode::POST_DEFROST;

    if ctx.post_defrost_minutes > ctx.config.defrost_recovery_min {
        return Some(CoolerState::CoolingNoFrost);
    }

    None
}
