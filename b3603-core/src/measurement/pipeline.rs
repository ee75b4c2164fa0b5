//! Round-robin sampling
//!
//! The pipeline keeps exactly one conversion in flight. Each completed
//! conversion is calibrated, stored in [`RuntimeState`] and followed by a
//! conversion on the next channel of the fixed rotation
//! current → output voltage → input voltage → current.

use crate::config::{CalibrationSlot, SystemConfig};
use crate::display::DisplayMultiplexer;
use crate::state::RuntimeState;
use crate::traits::{AdcChannel, AdcDriver, ModeSense, OutputActuator};

/// One calibrated reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub channel: AdcChannel,
    pub raw: u16,
    pub value: u16,
}

/// Sampling state machine
#[derive(Debug, Clone)]
pub struct MeasurementPipeline {
    active: AdcChannel,
}

impl Default for MeasurementPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementPipeline {
    /// Pipeline that will start on the input voltage
    pub const fn new() -> Self {
        Self {
            active: AdcChannel::VoltageIn,
        }
    }

    /// Channel of the conversion in flight
    pub fn active(&self) -> AdcChannel {
        self.active
    }

    /// Kick off the first conversion
    pub fn start<A: AdcDriver>(&mut self, adc: &mut A) {
        adc.start(self.active);
    }

    /// Run one pipeline step
    ///
    /// Returns the sample taken in this step, if a conversion completed.
    pub fn poll<A, M, O>(
        &mut self,
        adc: &mut A,
        sense: &mut M,
        actuator: &mut O,
        system: &SystemConfig,
        runtime: &mut RuntimeState,
        display: &mut DisplayMultiplexer,
    ) -> Option<Sample>
    where
        A: AdcDriver,
        M: ModeSense,
        O: OutputActuator,
    {
        let cc = sense.is_constant_current();
        if cc != runtime.constant_current {
            runtime.constant_current = cc;
            debug!("regulation mode: {}", if cc { "CC" } else { "CV" });
            actuator.check_state(system, cc);
        }

        if !adc.is_ready() {
            return None;
        }

        let raw = adc.read();
        let id = adc.converted_channel();
        let Some(channel) = AdcChannel::from_id(id) else {
            warn!("ADC reported unknown channel {}", id);
            adc.start(self.active);
            return None;
        };

        let value = match channel {
            AdcChannel::Current => {
                let value = system.calibration(CalibrationSlot::CoutAdc).apply(raw);
                runtime.cout_raw = raw;
                runtime.cout = value;
                value
            }
            AdcChannel::VoltageOut => {
                let value = system.calibration(CalibrationSlot::VoutAdc).apply(raw);
                runtime.vout_raw = raw;
                runtime.vout = value;
                value
            }
            AdcChannel::VoltageIn => {
                let value = system.calibration(CalibrationSlot::VinAdc).apply(raw);
                runtime.vin_raw = raw;
                runtime.vin = value;
                display.show_millis(value);
                value
            }
        };

        self.active = channel.next();
        adc.start(self.active);

        Some(Sample { channel, raw, value })
    }
}
