//! CC/CV sense line
//!
//! The regulator pulls the line high while it limits current.

use b3603_core::traits::ModeSense;
use b3603_hal::InputPin;

/// Regulation mode read from a digital input
pub struct ModePin<P> {
    pin: P,
}

impl<P: InputPin> ModePin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ModeSense for ModePin<P> {
    fn is_constant_current(&mut self) -> bool {
        self.pin.is_high()
    }
}
