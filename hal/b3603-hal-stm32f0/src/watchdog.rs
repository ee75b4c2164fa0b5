//! Independent watchdog

use b3603_core::traits::Watchdog;
use embassy_stm32::wdg::IndependentWatchdog;

/// Reset timeout in microseconds
pub const WATCHDOG_TIMEOUT_US: u32 = 250_000;

/// Running IWDG
pub struct Stm32Watchdog<'d> {
    wdg: IndependentWatchdog<'d, embassy_stm32::peripherals::IWDG>,
}

impl<'d> Stm32Watchdog<'d> {
    /// Start the watchdog; it cannot be stopped again
    pub fn start(mut wdg: IndependentWatchdog<'d, embassy_stm32::peripherals::IWDG>) -> Self {
        wdg.unleash();
        Self { wdg }
    }
}

impl Watchdog for Stm32Watchdog<'_> {
    fn feed(&mut self) {
        self.wdg.pet();
    }
}
