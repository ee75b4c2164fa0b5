//! Segment display bus trait

/// Serial bus feeding the digit-select and segment shift registers
pub trait SegmentBus {
    /// Shift out one 16-bit word and latch it
    ///
    /// The high byte selects the digit (active low), the low byte carries
    /// the segment pattern.
    fn shift_out(&mut self, bits: u16);
}
