//! GPIO wrappers

use b3603_hal::{InputPin, OutputPin, TriStatePin};
use embassy_stm32::gpio::{Flex, Input, Output, Pull, Speed};

/// Push-pull output
pub struct Stm32Output<'d>(Output<'d>);

impl<'d> Stm32Output<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for Stm32Output<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input
pub struct Stm32Input<'d>(Input<'d>);

impl<'d> Stm32Input<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for Stm32Input<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Pin switched between push-pull output and floating input
pub struct Stm32TriState<'d> {
    pin: Flex<'d>,
    floating: bool,
}

impl<'d> Stm32TriState<'d> {
    /// Wrap a pin, starting floating
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input(Pull::None);
        Self {
            pin,
            floating: true,
        }
    }

    fn drive(&mut self) {
        if self.floating {
            self.pin.set_as_output(Speed::Low);
            self.floating = false;
        }
    }
}

impl OutputPin for Stm32TriState<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
        self.drive();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
        self.drive();
    }

    fn is_set_high(&self) -> bool {
        !self.floating && self.pin.is_set_high()
    }
}

impl TriStatePin for Stm32TriState<'_> {
    fn set_floating(&mut self) {
        self.pin.set_as_input(Pull::None);
        self.floating = true;
    }

    fn is_floating(&self) -> bool {
        self.floating
    }
}
