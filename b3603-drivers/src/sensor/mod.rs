//! Sense inputs

pub mod mode_pin;

pub use mode_pin::ModePin;
