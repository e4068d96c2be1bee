//! Free-running minute pulse.
//!
//! [`MinuteTicker::poll`] answers "has another minute boundary passed?" and
//! re-arms itself 60 s further on each time it fires.  When the caller falls
//! behind by several minutes, successive polls fire once each until the
//! boundary catches up; elapsed minutes are never folded into a single tick.
//!
//! ```text
//!  reset(t0)         poll      poll      poll
//!     │               │ 1       │ 0       │ 1
//!  ───┼───────────────┼─────────┼─────────┼────▶ time
//!     t0           t0+60     t0+90     t0+120
//! ```

/// Seconds in one tick.
pub const MINUTE_SECS: u64 = 60;

/// Minute boundary tracker.  Time is passed in explicitly so the ticker stays
/// pure and testable; callers feed it [`Clock::now_secs`](crate::app::ports::Clock::now_secs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteTicker {
    next_boundary_secs: u64,
}

impl Default for MinuteTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MinuteTicker {
    /// A ticker armed for the first minute after boot.
    pub const fn new() -> Self {
        Self {
            next_boundary_secs: MINUTE_SECS,
        }
    }

    /// Arm the next boundary one minute after `now_secs`.
    pub fn reset(&mut self, now_secs: u64) {
        self.next_boundary_secs = now_secs.saturating_add(MINUTE_SECS);
    }

    /// Returns 1 if a boundary has passed (and advances it), else 0.
    pub fn poll(&mut self, now_secs: u64) -> u32 {
        if now_secs >= self.next_boundary_secs {
            self.next_boundary_secs = self.next_boundary_secs.saturating_add(MINUTE_SECS);
            1
        } else {
            0
        }
    }

    /// The instant at which the next poll will fire.
    pub fn next_boundary_secs(&self) -> u64 {
        self.next_boundary_secs
    }
}
