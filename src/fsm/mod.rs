//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌─────────────────────┬──────────┬──────────┬──────────────┐ │
//! │  │ CoolerState         │ on_enter │ on_exit  │ on_update    │ │
//! │  ├─────────────────────┼──────────┼──────────┼──────────────┤ │
//! │  │ CoolingNoFrost      │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt │ │
//! │  │ CoolingFrostForming │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt │ │
//! │  │ Defrosting          │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt │ │
//! │  │ PostDefrostRecovery │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt │ │
//! │  └─────────────────────┴──────────┴──────────┴──────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  All functions receive `&mut CoolerContext`.

pub mod context;
pub mod states;

use context::CoolerContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The four operating states of the cooler.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CoolerState {
    CoolingNoFrost = 0,
    CoolingFrostForming = 1,
    Defrosting = 2,
    PostDefrostRecovery = 3,
}

impl CoolerState {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 4;

    /// The 1-based code reported in the telemetry `CoolerState` column.
    pub const fn telemetry_code(self) -> u8 {
        self as u8 + 1
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut CoolerContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut CoolerContext) -> Option<CoolerState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array with no heap and no `dyn`.
pub struct StateDescriptor {
    pub id: CoolerState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]); the mutable
/// [`CoolerContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `CoolerState as usize`.
    table: [StateDescriptor; CoolerState::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    /// Row `i` must describe the state whose discriminant is `i`.
    pub fn new(table: [StateDescriptor; CoolerState::COUNT], initial: CoolerState) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, row)| row.id as usize == i),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut CoolerContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one control cycle.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut CoolerContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition, running exit and entry actions.
    #[cfg(test)]
    pub(crate) fn force_transition(&mut self, next: CoolerState, ctx: &mut CoolerContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> CoolerState {
        self.table[self.current].id
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: CoolerState, ctx: &mut CoolerContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
