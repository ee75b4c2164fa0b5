//! Runtime measurements
//!
//! Volatile values produced by the measurement pipeline. Never persisted.

/// Latest measurements and regulation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeState {
    /// Input voltage (mV)
    pub vin: u16,
    /// Output voltage (mV)
    pub vout: u16,
    /// Output current (mA)
    pub cout: u16,
    /// Raw ADC counts behind `vin`
    pub vin_raw: u16,
    /// Raw ADC counts behind `vout`
    pub vout_raw: u16,
    /// Raw ADC counts behind `cout`
    pub cout_raw: u16,
    /// Regulator is limiting current
    pub constant_current: bool,
}
