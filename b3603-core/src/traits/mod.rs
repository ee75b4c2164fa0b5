//! Collaborator traits
//!
//! These traits define the interface between the control core and the
//! board-specific drivers. Every method is non-blocking.

pub mod adc;
pub mod display;
pub mod link;
pub mod output;
pub mod sense;
pub mod storage;
pub mod watchdog;

pub use adc::{AdcChannel, AdcDriver};
pub use display::SegmentBus;
pub use link::SerialLink;
pub use output::OutputActuator;
pub use sense::ModeSense;
pub use storage::ConfigStore;
pub use watchdog::Watchdog;
