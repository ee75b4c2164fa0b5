//! Two-point linear calibration
//!
//! Every conversion in the instrument, ADC counts to engineering units and
//! setpoints to PWM counts, is the same transform:
//!
//! ```text
//! out = round((in × a − b) / 2^16), clamped to 0..=65535
//! ```
//!
//! Raising `a` raises sensitivity; `b` is subtracted before rounding.

use super::types::CalibrationPair;

/// Fraction bits of calibration values
pub const FIXED_SHIFT: u32 = b3603_protocol::number::FIXED_SHIFT;

/// 16.16 fixed-point value from thousandths (`1500` → 1.5)
pub const fn fixed_milli(milli: i32) -> i32 {
    (((milli as i64) << FIXED_SHIFT) / 1000) as i32
}

impl CalibrationPair {
    /// Create a pair from raw 16.16 values
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Apply the transform to a raw value
    pub fn apply(&self, value: u16) -> u16 {
        let scaled = value as i64 * self.a as i64 - self.b as i64;
        if scaled <= 0 {
            return 0;
        }

        let rounded = (scaled + (1 << (FIXED_SHIFT - 1))) >> FIXED_SHIFT;
        rounded.min(u16::MAX as i64) as u16
    }
}
