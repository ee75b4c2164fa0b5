//! 74HC595 segment bus
//!
//! Two cascaded shift registers carry the digit-select byte and the
//! segment byte. Bits go out least significant first, one clock pulse per
//! bit, then a latch pulse copies the shifted word to the outputs.

use b3603_core::traits::SegmentBus;
use b3603_hal::OutputPin;

/// Bit-banged shift register chain
pub struct ShiftRegister<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D: OutputPin, C: OutputPin, L: OutputPin> ShiftRegister<D, C, L> {
    /// Create the bus, with clock idle low and latch idle high
    pub fn new(data: D, clock: C, latch: L) -> Self {
        let mut bus = Self { data, clock, latch };
        bus.clock.set_low();
        bus.latch.set_high();
        bus
    }
}

impl<D: OutputPin, C: OutputPin, L: OutputPin> SegmentBus for ShiftRegister<D, C, L> {
    fn shift_out(&mut self, bits: u16) {
        let mut word = bits;
        for _ in 0..16 {
            self.data.set_state(word & 1 != 0);
            self.clock.set_high();
            self.clock.set_low();
            word >>= 1;
        }

        self.latch.set_low();
        self.latch.set_high();
    }
}
