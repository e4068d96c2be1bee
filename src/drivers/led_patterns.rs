//! Blink-code pattern generator for the single status LED.
//!
//! A two-digit [`StatusCode`] is shown as two pulse groups, tens digit
//! first.  A zero digit is a single short pulse so it stays visible; any
//! other digit `N` is `N` long pulses.  A pause separates the groups and a
//! longer pause closes the code so the next repetition is distinguishable.
//!
//! ```text
//!  code 12:  ▀▀▀ ________ ▀▀▀ _ ▀▀▀ ________ ______________
//!            1  digit gap   2      digit gap    code gap
//!
//!  code 05:  ▀ ________ ▀▀▀ _ ▀▀▀ _ ▀▀▀ _ ▀▀▀ _ ▀▀▀ ________ ______________
//!            0                  5
//! ```
//!
//! This module only produces the step sequence; timing lives in
//! [`StatusLed`](super::status_led::StatusLed).

use heapless::Vec;

use crate::status::StatusCode;

/// Worst case: 9 + 9 pulses plus two digit pauses and one code pause.
pub const MAX_STEPS: usize = 21;

/// One element of a blink sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStep {
    /// Marks a zero digit.
    ShortPulse,
    /// One count of a non-zero digit.
    LongPulse,
    /// Follows each digit group.
    DigitPause,
    /// Follows the whole code.
    CodePause,
}

pub type BlinkSequence = Vec<BlinkStep, MAX_STEPS>;

/// Expand a status code into its blink sequence.
pub fn encode(code: StatusCode) -> BlinkSequence {
    let (tens, ones) = code.digits();
    let mut seq = BlinkSequence::new();
    push_digit(&mut seq, tens);
    push_digit(&mut seq, ones);
    push(&mut seq, BlinkStep::CodePause);
    seq
}

fn push_digit(seq: &mut BlinkSequence, digit: u8) {
    if digit == 0 {
        push(seq, BlinkStep::ShortPulse);
    } else {
        for _ in 0..digit {
            push(seq, BlinkStep::LongPulse);
        }
    }
    push(seq, BlinkStep::DigitPause);
}

fn push(seq: &mut BlinkSequence, step: BlinkStep) {
    // Capacity covers the longest code (99); digits never exceed 9.
    let pushed = seq.push(step);
    debug_assert!(pushed.is_ok(), "blink sequence overflow");
}

/// Pulse counts per group, `0` meaning the short zero marker.
/// Useful for logging and tests.
pub fn group_counts(seq: &[BlinkStep]) -> heapless::Vec<u8, 2> {
    let mut groups = heapless::Vec::new();
    let mut count = 0u8;
    let mut zero = false;
    for step in seq {
        match step {
            BlinkStep::LongPulse => count += 1,
            BlinkStep::ShortPulse => zero = true,
            BlinkStep::DigitPause => {
                let _ = groups.push(if zero { 0 } else { count });
                count = 0;
                zero = false;
            }
            BlinkStep::CodePause => {}
        }
    }
    groups
}
