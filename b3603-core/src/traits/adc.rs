//! Analog sampling traits

/// Sampled analog channels, identified by their ADC input number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcChannel {
    /// Output current sense
    Current = 2,
    /// Output voltage sense
    VoltageOut = 3,
    /// Input voltage divider
    VoltageIn = 4,
}

impl AdcChannel {
    /// ADC input number
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Channel for an ADC input number
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            2 => Some(AdcChannel::Current),
            3 => Some(AdcChannel::VoltageOut),
            4 => Some(AdcChannel::VoltageIn),
            _ => None,
        }
    }

    /// Next channel in the sampling rotation (2 → 3 → 4 → 2)
    pub const fn next(self) -> Self {
        match self {
            AdcChannel::Current => AdcChannel::VoltageOut,
            AdcChannel::VoltageOut => AdcChannel::VoltageIn,
            AdcChannel::VoltageIn => AdcChannel::Current,
        }
    }
}

/// Start-then-poll ADC
///
/// One conversion is in flight at a time. The driver never blocks; the
/// pipeline polls [`AdcDriver::is_ready`] once per loop iteration.
pub trait AdcDriver {
    /// Begin a conversion on a channel
    fn start(&mut self, channel: AdcChannel);

    /// Whether the last started conversion has completed
    fn is_ready(&mut self) -> bool;

    /// Raw result of the completed conversion (10-bit)
    fn read(&mut self) -> u16;

    /// ADC input number the completed conversion was taken on
    fn converted_channel(&mut self) -> u8;
}
