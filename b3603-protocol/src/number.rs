//! Fixed-point numbers on the wire.
//!
//! Setpoints travel as decimal volts/amps with up to three fraction digits
//! and are held internally in millivolts/milliamps. Calibration values are
//! 16.16 fixed point and are printed with three decimals.

use core::fmt;

/// Fraction bits of calibration values
pub const FIXED_SHIFT: u32 = 16;

/// Errors from parsing numeric arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// No digits at all
    Empty,
    /// A character other than a digit or a single '.'
    InvalidDigit,
    /// More than three digits after the decimal point
    TooPrecise,
    /// Value does not fit the target integer
    Overflow,
}

/// Parse an unsigned decimal integer
///
/// Only ASCII digits are accepted; no sign, no whitespace.
pub fn parse_uint(s: &str) -> Result<u32, ParseError> {
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    s.bytes().try_fold(0u32, |acc, ch| {
        if !ch.is_ascii_digit() {
            return Err(ParseError::InvalidDigit);
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add((ch - b'0') as u32))
            .ok_or(ParseError::Overflow)
    })
}

/// Parse a decimal quantity into thousandths
///
/// `"5"` → 5000, `"1.25"` → 1250, `".5"` → 500. The result is left wide so
/// callers can range-check values that would not fit a setpoint.
pub fn parse_milli(s: &str) -> Result<u32, ParseError> {
    let mut whole: u32 = 0;
    let mut frac: u32 = 0;
    let mut frac_digits = 0u32;
    let mut digits = 0u32;
    let mut seen_dot = false;

    for ch in s.bytes() {
        match ch {
            b'.' if !seen_dot => seen_dot = true,
            b'0'..=b'9' if seen_dot => {
                if frac_digits == 3 {
                    return Err(ParseError::TooPrecise);
                }
                frac = frac * 10 + (ch - b'0') as u32;
                frac_digits += 1;
                digits += 1;
            }
            b'0'..=b'9' => {
                whole = whole
                    .checked_mul(10)
                    .and_then(|v| v.checked_add((ch - b'0') as u32))
                    .ok_or(ParseError::Overflow)?;
                digits += 1;
            }
            _ => return Err(ParseError::InvalidDigit),
        }
    }

    if digits == 0 {
        return Err(ParseError::Empty);
    }

    let frac = frac * 10u32.pow(3 - frac_digits);
    whole
        .checked_mul(1000)
        .and_then(|v| v.checked_add(frac))
        .ok_or(ParseError::Overflow)
}

/// Millivolts or milliamps printed as `x.yyy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milli(pub u16);

impl fmt::Display for Milli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.0 / 1000, self.0 % 1000)
    }
}

/// 16.16 fixed-point value printed with three rounded decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed16(pub i32);

impl fmt::Display for Fixed16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = (self.0 as i64).abs();
        let mut whole = magnitude >> FIXED_SHIFT;
        let mut thousandths =
            ((magnitude & 0xFFFF) * 1000 + (1 << (FIXED_SHIFT - 1))) >> FIXED_SHIFT;
        if thousandths == 1000 {
            whole += 1;
            thousandths = 0;
        }
        write!(f, "{}{}.{:03}", sign, whole, thousandths)
    }
}

/// Boolean printed as `ON`/`OFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnOff(pub bool);

impl fmt::Display for OnOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "ON" } else { "OFF" })
    }
}

/// Boolean printed as `YES`/`NO`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YesNo(pub bool);

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "YES" } else { "NO" })
    }
}
