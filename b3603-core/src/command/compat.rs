//! Compatibility protocol
//!
//! A small SCPI-like vocabulary understood by common bench-supply client
//! software. It is matched against the whole line before the primary
//! protocol and never reports errors of its own.

/// Compatibility request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompatQuery {
    /// `*IDN?`
    Identify,
    /// `VSET1?`
    VoltageSetpoint,
    /// `ISET1?`
    CurrentSetpoint,
    /// `VOUT1?`
    VoltageOut,
    /// `IOUT1?`
    CurrentOut,
    /// `OUT1` / `OUT0`
    Output(bool),
}

/// Line → request table
pub static COMPAT_COMMANDS: &[(&str, CompatQuery)] = &[
    ("*IDN?", CompatQuery::Identify),
    ("VSET1?", CompatQuery::VoltageSetpoint),
    ("ISET1?", CompatQuery::CurrentSetpoint),
    ("VOUT1?", CompatQuery::VoltageOut),
    ("IOUT1?", CompatQuery::CurrentOut),
    ("OUT1", CompatQuery::Output(true)),
    ("OUT0", CompatQuery::Output(false)),
];

/// Match a whole line
pub fn lookup(line: &str) -> Option<CompatQuery> {
    COMPAT_COMMANDS
        .iter()
        .find(|(token, _)| *token == line)
        .map(|&(_, query)| query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_line_match() {
        assert_eq!(lookup("*IDN?"), Some(CompatQuery::Identify));
        assert_eq!(lookup("OUT0"), Some(CompatQuery::Output(false)));
        assert_eq!(lookup("OUT1 "), None);
        assert_eq!(lookup("VSET1"), None);
        assert_eq!(lookup("STATUS"), None);
    }
}
