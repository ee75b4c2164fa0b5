//! Configuration type definitions
//!
//! These types represent the persisted instrument configuration. Both
//! records are stored in flash as postcard-serialized binary data (see
//! [`super::record`]).

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::fixed_milli;

/// Maximum instrument name length in characters
pub const NAME_LEN: usize = 15;

/// Number of calibrated channels
pub const CALIBRATION_SLOTS: usize = 5;

/// Instrument name as set by SNAME
pub type Name = String<NAME_LEN>;

/// Two-point linear calibration in 16.16 fixed point
///
/// `a` is the slope, `b` a subtractive offset in the same domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationPair {
    /// Slope (16.16)
    pub a: i32,
    /// Offset (16.16)
    pub b: i32,
}

/// Calibrated channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CalibrationSlot {
    /// Input voltage ADC reading → mV
    VinAdc = 0,
    /// Output voltage ADC reading → mV
    VoutAdc = 1,
    /// Output current ADC reading → mA
    CoutAdc = 2,
    /// Voltage setpoint mV → PWM counts
    VoutPwm = 3,
    /// Current setpoint mA → PWM counts
    CoutPwm = 4,
}

impl CalibrationSlot {
    /// All slots, in report order
    pub const ALL: [CalibrationSlot; CALIBRATION_SLOTS] = [
        CalibrationSlot::VinAdc,
        CalibrationSlot::VoutAdc,
        CalibrationSlot::CoutAdc,
        CalibrationSlot::VoutPwm,
        CalibrationSlot::CoutPwm,
    ];

    /// Index into [`SystemConfig::calibrations`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label used in calibration reports
    pub const fn label(self) -> &'static str {
        match self {
            CalibrationSlot::VinAdc => "VIN ADC",
            CalibrationSlot::VoutAdc => "VOUT ADC",
            CalibrationSlot::CoutAdc => "COUT ADC",
            CalibrationSlot::VoutPwm => "VOUT PWM",
            CalibrationSlot::CoutPwm => "COUT PWM",
        }
    }
}

/// Which half of a calibration pair a command writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationField {
    /// Slope
    A,
    /// Offset
    B,
}

/// Factory calibration, one pair per [`CalibrationSlot`]
///
/// ADC pairs map 10-bit counts to mV/mA, PWM pairs map mV/mA to counts of
/// the 8192-count reference timers.
pub const FACTORY_CALIBRATION: [CalibrationPair; CALIBRATION_SLOTS] = [
    CalibrationPair::new(fixed_milli(39_100), 0),
    CalibrationPair::new(fixed_milli(35_500), 0),
    CalibrationPair::new(fixed_milli(3_300), 0),
    CalibrationPair::new(fixed_milli(228), 0),
    CalibrationPair::new(fixed_milli(2_482), 0),
];

/// System record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemConfig {
    /// User-assigned instrument name
    pub name: Name,
    /// Enable the output at power-on
    pub default_on: bool,
    /// Push setpoint changes to the output immediately
    pub autocommit: bool,
    /// Output enabled
    pub output: bool,
    /// Calibration pairs indexed by [`CalibrationSlot`]
    pub calibrations: [CalibrationPair; CALIBRATION_SLOTS],
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::factory()
    }
}

impl SystemConfig {
    /// Compiled-in factory defaults
    pub fn factory() -> Self {
        let mut name = Name::new();
        let _ = name.push_str("Unnamed");

        Self {
            name,
            default_on: false,
            autocommit: true,
            output: false,
            calibrations: FACTORY_CALIBRATION,
        }
    }

    /// Calibration pair for a slot
    pub fn calibration(&self, slot: CalibrationSlot) -> &CalibrationPair {
        &self.calibrations[slot.index()]
    }

    /// Mutable calibration pair for a slot
    pub fn calibration_mut(&mut self, slot: CalibrationSlot) -> &mut CalibrationPair {
        &mut self.calibrations[slot.index()]
    }

    /// Replace the name
    ///
    /// Non-printable characters become '.', and the name is cut to
    /// [`NAME_LEN`] characters.
    pub fn set_name(&mut self, raw: &str) {
        self.name.clear();
        for ch in raw.chars().take(NAME_LEN) {
            let ch = if ch == ' ' || ch.is_ascii_graphic() { ch } else { '.' };
            let _ = self.name.push(ch);
        }
    }
}

/// Output record
///
/// Setpoints are staged here and only reach the regulator on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConfig {
    /// Voltage setpoint (mV)
    pub vset: u16,
    /// Current limit (mA)
    pub cset: u16,
    /// Voltage shutdown threshold (mV)
    pub vshutdown: u16,
    /// Current shutdown threshold (mA)
    pub cshutdown: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::factory()
    }
}

impl OutputConfig {
    /// Compiled-in factory defaults
    pub const fn factory() -> Self {
        Self {
            vset: 5000,
            cset: 500,
            vshutdown: 0,
            cshutdown: 0,
        }
    }
}
