//! Four-digit seven-segment display
//!
//! The digits are multiplexed: each loop iteration lights one digit, and
//! new content is staged in a pending buffer that only becomes visible
//! after a debounce interval.

pub mod multiplexer;
pub mod segments;

pub use multiplexer::{DigitBuffer, DisplayMultiplexer, DEBOUNCE_TICKS, DIGITS};
