//! B3603 Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the power supply firmware is
//! written against. Chip-specific crates (currently STM32F0) implement them,
//! and `b3603-drivers` builds the instrument-level collaborators on top.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  b3603-firmware (polling loop)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  b3603-drivers (595 bus, PWM stage, …)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  b3603-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  b3603-hal-   │
//!             │    stm32f0    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::TriStatePin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`pwm::PwmChannel`] - Duty-cycle outputs for the regulator setpoints
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{InputPin, OutputPin, TriStatePin};
pub use pwm::{PwmChannel, PWM_PERIOD_COUNTS};
pub use uart::{Uart, UartConfig, UartRx, UartTx};
