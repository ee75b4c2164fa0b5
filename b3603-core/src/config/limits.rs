//! Instrument capability limits
//!
//! Voltage in mV, current in mA. Setpoints outside `min..=max` are rejected
//! by the command layer; steps are reported only.

/// Fixed capability envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Limits {
    pub vmin: u16,
    pub vmax: u16,
    pub vstep: u16,
    pub cmin: u16,
    pub cmax: u16,
    pub cstep: u16,
}

/// Limits of the B3603 board
pub const LIMITS: Limits = Limits {
    vmin: 10,
    vmax: 35_000,
    vstep: 10,
    cmin: 1,
    cmax: 3_000,
    cstep: 1,
};

/// Setpoint outside the capability envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    TooLow,
    TooHigh,
}

impl RangeError {
    /// Suffix used in the rejection message
    pub const fn as_str(self) -> &'static str {
        match self {
            RangeError::TooLow => "TOO LOW",
            RangeError::TooHigh => "TOO HIGH",
        }
    }
}

impl Limits {
    /// Validate a voltage setpoint in mV
    pub fn check_voltage(&self, mv: u32) -> Result<u16, RangeError> {
        check(mv, self.vmin, self.vmax)
    }

    /// Validate a current setpoint in mA
    pub fn check_current(&self, ma: u32) -> Result<u16, RangeError> {
        check(ma, self.cmin, self.cmax)
    }
}

fn check(value: u32, min: u16, max: u16) -> Result<u16, RangeError> {
    if value > max as u32 {
        Err(RangeError::TooHigh)
    } else if value < min as u32 {
        Err(RangeError::TooLow)
    } else {
        Ok(value as u16)
    }
}
