//! Output stage trait

use crate::config::{OutputConfig, SystemConfig};

/// Regulator control
///
/// Setpoints reach the hardware only through [`OutputActuator::commit`].
pub trait OutputActuator {
    /// Push setpoints and the enable state to the regulator
    fn commit(&mut self, output: &OutputConfig, system: &SystemConfig, constant_current: bool);

    /// Re-evaluate indicators after a CC/CV transition
    fn check_state(&mut self, system: &SystemConfig, constant_current: bool);
}
