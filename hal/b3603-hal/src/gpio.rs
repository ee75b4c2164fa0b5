//! Digital pin traits
//!
//! The board uses plain pins for the 74HC595 bus and the regulator enable,
//! one input for the CC/CV comparator and one tri-state line for the
//! mode indicator LEDs.

/// Push-pull output
pub trait OutputPin {
    fn set_high(&mut self);

    fn set_low(&mut self);

    /// Drive high when `high`, low otherwise
    fn set_state(&mut self, high: bool) {
        match high {
            true => self.set_high(),
            false => self.set_low(),
        }
    }

    /// Last level written (not the pad level)
    fn is_set_high(&self) -> bool;

    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Sampled digital input
pub trait InputPin {
    fn is_high(&self) -> bool;
}

/// Output pin that can also be released to high impedance
///
/// The CC/CV indicator LEDs share one line: driven high lights one LED,
/// driven low lights the other, floating turns both off.
pub trait TriStatePin: OutputPin {
    /// Release the line (input, no pull)
    fn set_floating(&mut self);

    fn is_floating(&self) -> bool;
}
