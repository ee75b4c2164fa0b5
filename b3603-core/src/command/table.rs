//! Command table
//!
//! Every primary-protocol command is a static [`CommandEntry`]. Lookup is
//! a linear, case-sensitive scan.

use crate::config::{CalibrationField, CalibrationSlot};

/// Operation behind a command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Op {
    Model,
    Version,
    System,
    Calibration,
    RawCalibration,
    Limits,
    Config,
    Status,
    RawStatus,
    Commit,
    Save,
    Load,
    Restore,
    Help,
    Stuck,
    SetName,
    SetEcho,
    SetOutput,
    SetVoltage,
    SetCurrent,
    SetAutocommit,
    SetOnStartup,
    SetCalibration(CalibrationSlot, CalibrationField),
}

/// One command descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandEntry {
    /// Exact command name
    pub name: &'static str,
    /// Required number of arguments (0 or 1)
    pub arity: u8,
    /// Operation to run
    pub op: Op,
}

impl CommandEntry {
    const fn new(name: &'static str, arity: u8, op: Op) -> Self {
        Self { name, arity, op }
    }

    const fn cal(name: &'static str, slot: CalibrationSlot, field: CalibrationField) -> Self {
        Self::new(name, 1, Op::SetCalibration(slot, field))
    }
}

use CalibrationField::{A, B};
use CalibrationSlot::{CoutAdc, CoutPwm, VinAdc, VoutAdc, VoutPwm};

/// Primary-protocol commands, in HELP order
pub static COMMANDS: &[CommandEntry] = &[
    CommandEntry::new("MODEL", 0, Op::Model),
    CommandEntry::new("VERSION", 0, Op::Version),
    CommandEntry::new("SYSTEM", 0, Op::System),
    CommandEntry::new("CALIBRATION", 0, Op::Calibration),
    CommandEntry::new("RCALIBRATION", 0, Op::RawCalibration),
    CommandEntry::new("LIMITS", 0, Op::Limits),
    CommandEntry::new("CONFIG", 0, Op::Config),
    CommandEntry::new("STATUS", 0, Op::Status),
    CommandEntry::new("RSTATUS", 0, Op::RawStatus),
    CommandEntry::new("COMMIT", 0, Op::Commit),
    CommandEntry::new("SAVE", 0, Op::Save),
    CommandEntry::new("LOAD", 0, Op::Load),
    CommandEntry::new("RESTORE", 0, Op::Restore),
    CommandEntry::new("HELP", 0, Op::Help),
    CommandEntry::new("SNAME", 1, Op::SetName),
    CommandEntry::new("ECHO", 1, Op::SetEcho),
    CommandEntry::new("OUTPUT", 1, Op::SetOutput),
    CommandEntry::new("VOLTAGE", 1, Op::SetVoltage),
    CommandEntry::new("CURRENT", 1, Op::SetCurrent),
    CommandEntry::new("AUTOCOMMIT", 1, Op::SetAutocommit),
    CommandEntry::new("ONSTARTUP", 1, Op::SetOnStartup),
    CommandEntry::cal("CALVINADCA", VinAdc, A),
    CommandEntry::cal("CALVINADCB", VinAdc, B),
    CommandEntry::cal("CALVOUTADCA", VoutAdc, A),
    CommandEntry::cal("CALVOUTADCB", VoutAdc, B),
    CommandEntry::cal("CALVOUTPWMA", VoutPwm, A),
    CommandEntry::cal("CALVOUTPWMB", VoutPwm, B),
    CommandEntry::cal("CALCOUTADCA", CoutAdc, A),
    CommandEntry::cal("CALCOUTADCB", CoutAdc, B),
    CommandEntry::cal("CALCOUTPWMA", CoutPwm, A),
    CommandEntry::cal("CALCOUTPWMB", CoutPwm, B),
];

/// Commands that exist only in debug builds
#[cfg(feature = "debug-commands")]
pub static DEBUG_COMMANDS: &[CommandEntry] = &[CommandEntry::new("STUCK", 0, Op::Stuck)];

/// Commands that exist only in debug builds
#[cfg(not(feature = "debug-commands"))]
pub static DEBUG_COMMANDS: &[CommandEntry] = &[];

/// All commands, debug commands last
pub fn entries() -> impl Iterator<Item = &'static CommandEntry> {
    COMMANDS.iter().chain(DEBUG_COMMANDS.iter())
}

/// Find a command by exact name
pub fn lookup(name: &str) -> Option<&'static CommandEntry> {
    entries().find(|entry| entry.name == name)
}

/// Command name that writes one calibration field
pub fn calibration_name(slot: CalibrationSlot, field: CalibrationField) -> &'static str {
    match (slot, field) {
        (VinAdc, A) => "CALVINADCA",
        (VinAdc, B) => "CALVINADCB",
        (VoutAdc, A) => "CALVOUTADCA",
        (VoutAdc, B) => "CALVOUTADCB",
        (VoutPwm, A) => "CALVOUTPWMA",
        (VoutPwm, B) => "CALVOUTPWMB",
        (CoutAdc, A) => "CALCOUTADCA",
        (CoutAdc, B) => "CALCOUTADCB",
        (CoutPwm, A) => "CALCOUTPWMA",
        (CoutPwm, B) => "CALCOUTPWMB",
    }
}
