//! Start-then-poll ADC on the B3603 sense inputs
//!
//! embassy's ADC driver owns power-up and self-calibration; conversions are
//! then issued directly through the register block so the control loop can
//! start one and poll for completion without awaiting.

use b3603_core::traits::{AdcChannel, AdcDriver};
use embassy_stm32::adc::{Adc, Resolution, SampleTime};
use embassy_stm32::gpio::Flex;
use embassy_stm32::pac;
use embassy_stm32::peripherals::ADC1;

/// ADC1 driving the current, vout and vin inputs
pub struct Stm32Adc<'d> {
    _adc: Adc<'d, ADC1>,
    _inputs: [Flex<'d>; 3],
    channel: u8,
}

impl<'d> Stm32Adc<'d> {
    /// Take over a powered ADC and the three analog inputs (PA2, PA3, PA4)
    pub fn new(mut adc: Adc<'d, ADC1>, mut inputs: [Flex<'d>; 3]) -> Self {
        adc.set_resolution(Resolution::BITS10);
        adc.set_sample_time(SampleTime::CYCLES239_5);
        for pin in inputs.iter_mut() {
            pin.set_as_analog();
        }

        Self {
            _adc: adc,
            _inputs: inputs,
            channel: 0,
        }
    }
}

impl AdcDriver for Stm32Adc<'_> {
    fn start(&mut self, channel: AdcChannel) {
        let regs = pac::ADC1;
        self.channel = channel.id();

        regs.isr().write(|w| w.set_eoc(true));
        regs.chselr()
            .write(|w| w.set_chselx(channel.id() as usize, true));
        regs.cr().modify(|w| w.set_adstart(true));
    }

    fn is_ready(&mut self) -> bool {
        pac::ADC1.isr().read().eoc()
    }

    fn read(&mut self) -> u16 {
        // Reading DR clears EOC
        pac::ADC1.dr().read().data() & 0x03FF
    }

    fn converted_channel(&mut self) -> u8 {
        // F0 has no channel tag on DR; report the channel that was started
        self.channel
    }
}
