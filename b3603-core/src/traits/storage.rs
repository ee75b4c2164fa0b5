//! Configuration persistence trait

use crate::config::{OutputConfig, SystemConfig};

/// Non-volatile configuration store
///
/// Failures stay inside the implementation: loads fall back to the
/// defaults and saves log and carry on.
pub trait ConfigStore {
    /// Load the system record
    fn load_system(&mut self) -> SystemConfig;

    /// Persist the system record
    fn save_system(&mut self, config: &SystemConfig);

    /// Load the output record
    fn load_output(&mut self) -> OutputConfig;

    /// Persist the output record
    fn save_output(&mut self, config: &OutputConfig);

    /// Factory system record
    fn default_system(&self) -> SystemConfig {
        SystemConfig::factory()
    }

    /// Factory output record
    fn default_output(&self) -> OutputConfig {
        OutputConfig::factory()
    }
}
