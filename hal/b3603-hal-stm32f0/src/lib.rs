//! STM32F0-specific HAL for the B3603 firmware
//!
//! This crate wraps embassy-stm32 peripherals in the `b3603-hal` and
//! `b3603-core` traits for an STM32F030 replacement controller:
//!
//! - GPIO output, input and tri-state wrappers
//! - Buffered USART with polled receive
//! - Timer PWM channels for the regulator references
//! - Start-then-poll ADC on channels 2, 3 and 4
//! - Page-per-key flash storage
//! - Independent watchdog
//!
//! # Features
//!
//! - `stm32f030c8` - STM32F030C8T6 (64KB flash)
//! - `stm32f072cb` - STM32F072CBT6 (128KB flash)
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod uart;
pub mod watchdog;

pub use adc::Stm32Adc;
pub use flash::PageFlash;
pub use gpio::{Stm32Input, Stm32Output, Stm32TriState};
pub use pwm::{set_period, Stm32Pwm};
pub use uart::{usart_config, Stm32Uart, UartBusError};
pub use watchdog::Stm32Watchdog;

// Re-export shared types from b3603-hal
pub use b3603_hal::{FlashError, StorageKey};
