//! Hardware driver implementations
//!
//! This crate connects the peripheral traits of `b3603-hal` to the
//! collaborator traits defined in `b3603-core`:
//!
//! - Segment display shift registers (74HC595 pair)
//! - PWM output stage with enable line and CC/CV indicator
//! - CC/CV sense input
//! - Flash-backed configuration store
//! - Line-oriented UART link

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod display;
pub mod output;
pub mod sensor;
pub mod serial;
pub mod storage;

pub use display::ShiftRegister;
pub use output::PwmOutputStage;
pub use sensor::ModePin;
pub use serial::UartLink;
pub use storage::{FlashConfigStore, StoreError};
