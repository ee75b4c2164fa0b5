//! Shared instrument state
//!
//! Everything the command handlers and the pipeline read or write, owned
//! by one value and passed around as `&mut`.

use crate::config::{OutputConfig, SystemConfig};
use crate::state::RuntimeState;

/// Mutable instrument context
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    /// Persisted system record
    pub system: SystemConfig,
    /// Persisted output record
    pub output: OutputConfig,
    /// Latest measurements
    pub runtime: RuntimeState,
    /// Echo received bytes (not persisted)
    pub echo: bool,
}

impl Context {
    /// Context with the given records and no measurements yet
    pub fn new(system: SystemConfig, output: OutputConfig) -> Self {
        Self {
            system,
            output,
            runtime: RuntimeState::default(),
            echo: false,
        }
    }
}
