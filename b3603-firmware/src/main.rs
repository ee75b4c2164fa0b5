//! B3603 - Bench Power Supply Firmware
//!
//! Replacement control firmware for the B3603 buck converter module on an
//! STM32F030 controller. Everything runs in one cooperative polling loop:
//! the embassy executor only hosts the main task, which calls
//! [`Instrument::tick`] and yields between iterations.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use b3603_core::controller::Instrument;
use b3603_core::FW_VERSION;

mod board;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("B3603 firmware {} starting...", FW_VERSION);

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let mut board = board::init(p);

    let mut instrument = unwrap!(Instrument::boot(&mut board).ok());
    info!("Boot complete, entering control loop");

    loop {
        match instrument.tick(&mut board) {
            Ok(Some(outcome)) => trace!("command handled: {:?}", outcome),
            Ok(None) => {}
            Err(_) => warn!("Response write failed"),
        }
        embassy_futures::yield_now().await;
    }
}
