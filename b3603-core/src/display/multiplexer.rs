//! Display multiplexer
//!
//! One [`DisplayMultiplexer::refresh`] call lights one digit. Updates are
//! staged in the pending buffer and promoted to the live buffer only when
//! the debounce timer has run out, so the reading does not flicker at the
//! sampling rate.

use super::segments::{encode, encode_value};
use crate::traits::SegmentBus;

/// Number of digits
pub const DIGITS: usize = 4;

/// Refresh calls between two visible updates
pub const DEBOUNCE_TICKS: u16 = 1500;

/// Live and pending segment data
///
/// Position 0 is the rightmost digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitBuffer {
    /// Patterns currently shown
    pub live: [u8; DIGITS],
    /// Patterns waiting for the debounce timer
    pub pending: [u8; DIGITS],
    /// A pending update exists
    pub pending_flag: bool,
    /// Refresh calls left before the next promotion
    pub debounce_ticks: u16,
}

/// Digit multiplexer state
#[derive(Debug, Clone, Default)]
pub struct DisplayMultiplexer {
    buffer: DigitBuffer,
    index: usize,
}

/// Digit-select byte for a position, placed in the high byte
pub const fn digit_select(index: usize) -> u16 {
    0xFF00 ^ (3 << (8 + 2 * index))
}

impl DisplayMultiplexer {
    /// Blank display, no pending update
    pub const fn new() -> Self {
        Self {
            buffer: DigitBuffer {
                live: [0; DIGITS],
                pending: [0; DIGITS],
                pending_flag: false,
                debounce_ticks: 0,
            },
            index: 0,
        }
    }

    /// Emit the next digit on the bus
    pub fn refresh<B: SegmentBus>(&mut self, bus: &mut B) {
        let buf = &mut self.buffer;

        if buf.debounce_ticks > 0 {
            buf.debounce_ticks -= 1;
        }
        if buf.debounce_ticks == 0 && buf.pending_flag {
            buf.live = buf.pending;
            buf.pending_flag = false;
            buf.debounce_ticks = DEBOUNCE_TICKS;
        }

        bus.shift_out(digit_select(self.index) | buf.live[self.index] as u16);
        self.index = (self.index + 1) % DIGITS;
    }

    /// Stage raw patterns, leftmost digit first
    pub fn set_digits(&mut self, patterns: [u8; DIGITS]) {
        let buf = &mut self.buffer;
        for (slot, pattern) in buf.pending.iter_mut().rev().zip(patterns) {
            *slot = pattern;
        }
        buf.pending_flag = true;
    }

    /// Stage characters with per-digit dots, leftmost first
    pub fn set(&mut self, chars: [u8; DIGITS], dots: [bool; DIGITS]) {
        let mut patterns = [0u8; DIGITS];
        for (i, pattern) in patterns.iter_mut().enumerate() {
            *pattern = encode(chars[i], dots[i]);
        }
        self.set_digits(patterns);
    }

    /// Stage a mV/mA value as `dd.dd`
    ///
    /// Shows tens, units, tenths and hundredths; the thousandths are
    /// dropped.
    pub fn show_millis(&mut self, value: u16) {
        self.set_digits([
            encode_value(value / 10_000, false),
            encode_value(value / 1_000, true),
            encode_value(value / 100, false),
            encode_value(value / 10, false),
        ]);
    }

    /// Current buffers
    pub fn buffer(&self) -> &DigitBuffer {
        &self.buffer
    }

    /// Position the next refresh will emit
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::segments::{DIGIT_PATTERNS, DOT};
    use crate::testing::RecordingBus;
    use proptest::prelude::*;

    fn selected(word: u16) -> usize {
        (0..DIGITS)
            .find(|&i| word & 0xFF00 == digit_select(i))
            .unwrap()
    }

    #[test]
    fn test_digit_select_words() {
        assert_eq!(digit_select(0), 0xFC00);
        assert_eq!(digit_select(1), 0xF300);
        assert_eq!(digit_select(2), 0xCF00);
        assert_eq!(digit_select(3), 0x3F00);
    }

    #[test]
    fn test_four_refreshes_show_each_digit_once() {
        let mut mux = DisplayMultiplexer::new();
        let mut bus = RecordingBus::default();
        for _ in 0..DIGITS {
            mux.refresh(&mut bus);
        }
        let order: Vec<usize> = bus.words.iter().map(|&w| selected(w)).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_leftmost_digit_stored_last() {
        let mut mux = DisplayMultiplexer::new();
        mux.set_digits([1, 2, 3, 4]);
        assert_eq!(mux.buffer().pending, [4, 3, 2, 1]);
        assert!(mux.buffer().pending_flag);
    }

    #[test]
    fn test_first_update_is_immediate() {
        let mut mux = DisplayMultiplexer::new();
        let mut bus = RecordingBus::default();
        mux.set_digits([0x11, 0x22, 0x33, 0x44]);
        mux.refresh(&mut bus);
        assert_eq!(bus.words[0], digit_select(0) | 0x44);
        assert_eq!(mux.buffer().debounce_ticks, DEBOUNCE_TICKS);
    }

    #[test]
    fn test_pending_waits_for_debounce() {
        let mut mux = DisplayMultiplexer::new();
        let mut bus = RecordingBus::default();
        mux.set_digits([0, 0, 0, 0x10]);
        mux.refresh(&mut bus);

        mux.set_digits([0, 0, 0, 0x20]);
        for _ in 0..DEBOUNCE_TICKS - 1 {
            mux.refresh(&mut bus);
            assert_eq!(mux.buffer().live[0], 0x10);
        }
        mux.refresh(&mut bus);
        assert_eq!(mux.buffer().live[0], 0x20);
    }

    #[test]
    fn test_only_last_update_inside_window_shown() {
        let mut mux = DisplayMultiplexer::new();
        let mut bus = RecordingBus::default();
        mux.set_digits([0, 0, 0, 0x10]);
        mux.refresh(&mut bus);

        mux.set_digits([0, 0, 0, 0x20]);
        mux.refresh(&mut bus);
        mux.set_digits([0, 0, 0, 0x30]);
        for _ in 0..DEBOUNCE_TICKS {
            mux.refresh(&mut bus);
            assert_ne!(mux.buffer().live[0], 0x20);
        }
        assert_eq!(mux.buffer().live[0], 0x30);
    }

    #[test]
    fn test_show_millis() {
        let mut mux = DisplayMultiplexer::new();
        mux.show_millis(12_345);
        assert_eq!(
            mux.buffer().pending,
            [
                DIGIT_PATTERNS[4],
                DIGIT_PATTERNS[3],
                DIGIT_PATTERNS[2] | DOT,
                DIGIT_PATTERNS[1],
            ]
        );
    }

    #[test]
    fn test_set_degrades_unknown_chars() {
        let mut mux = DisplayMultiplexer::new();
        mux.set(*b"1-2 ", [false, true, false, false]);
        assert_eq!(
            mux.buffer().pending,
            [0, DIGIT_PATTERNS[2], DOT, DIGIT_PATTERNS[1]]
        );
    }

    proptest! {
        #[test]
        fn prop_refresh_order_is_round_robin(n in 1usize..64) {
            let mut mux = DisplayMultiplexer::new();
            let mut bus = RecordingBus::default();
            for _ in 0..n {
                mux.refresh(&mut bus);
            }
            for (i, &word) in bus.words.iter().enumerate() {
                prop_assert_eq!(selected(word), i % DIGITS);
            }
        }

        #[test]
        fn prop_show_millis_digits(value in any::<u16>()) {
            let mut mux = DisplayMultiplexer::new();
            mux.show_millis(value);
            let pending = mux.buffer().pending;
            prop_assert_eq!(pending[0], DIGIT_PATTERNS[(value / 10 % 10) as usize]);
            prop_assert_eq!(pending[2] & DOT, DOT);
            prop_assert_eq!(pending[3], DIGIT_PATTERNS[(value / 10_000 % 10) as usize]);
        }
    }
}
