//! Seven-segment encoding
//!
//! Segment order, most significant bit first: a b c d e f g dp.

/// Patterns for '0'..='9'
pub const DIGIT_PATTERNS: [u8; 10] = [0xFC, 0x60, 0xDA, 0xF2, 0x66, 0xB6, 0xBE, 0xE0, 0xFE, 0xF6];

/// Decimal point bit
pub const DOT: u8 = 0x01;

/// Encode a character
///
/// Characters outside '0'..='9' render blank, keeping only the dot.
pub fn encode(ch: u8, dot: bool) -> u8 {
    let dot = if dot { DOT } else { 0 };
    match ch {
        b'0'..=b'9' => DIGIT_PATTERNS[(ch - b'0') as usize] | dot,
        _ => dot,
    }
}

/// Encode a decimal digit value (taken modulo 10)
pub fn encode_value(value: u16, dot: bool) -> u8 {
    encode(b'0' + (value % 10) as u8, dot)
}
