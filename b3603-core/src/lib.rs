//! Board-agnostic control core for the B3603 power supply firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration and calibration types, factory defaults, limits
//! - Collaborator traits (ADC, segment bus, output stage, storage, serial)
//! - Measurement pipeline (round-robin sampling and calibration)
//! - Display multiplexer with debounced updates
//! - Command dispatcher and compatibility protocol
//! - The polling loop tying them together
//!
//! # Concurrency
//!
//! The firmware is a single cooperative polling loop. All mutable state
//! lives in one [`controller::Instrument`] and is reached only through
//! `&mut` borrows taken by that loop, so there are no statics, no interior
//! mutability and no locks. Moving any part of this crate onto an
//! interrupt handler or a second task would break that single-writer
//! assumption.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod context;
pub mod controller;
pub mod display;
pub mod measurement;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

/// Instrument model reported by MODEL, SYSTEM and `*IDN?`
pub const MODEL: &str = "B3603";

/// Firmware version reported by VERSION and SYSTEM
pub const FW_VERSION: &str = env!("CARGO_PKG_VERSION");
