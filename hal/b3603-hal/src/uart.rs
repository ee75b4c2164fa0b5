//! Serial port traits
//!
//! The control loop never waits on the serial port: receive is polled one
//! byte at a time and transmit only hands over what the implementation's
//! buffer can take.

/// Transmit half
pub trait UartTx {
    type Error;

    /// Queue as much of `data` as fits right now, returning the count taken
    ///
    /// Never waits: a full transmit buffer yields `Ok(0)`.
    fn try_write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Wait until everything queued has left the shift register
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Receive half
pub trait UartRx {
    type Error;

    /// Next received byte, or `Ok(None)` immediately when nothing is queued
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Both halves on one peripheral
pub trait Uart: UartTx + UartRx {}

impl<T: UartTx + UartRx> Uart for T {}

/// Line settings for the command port (always 8 data bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub baudrate: u32,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    /// 9600 8N1, as on the stock B3603 serial header
    fn default() -> Self {
        Self {
            baudrate: 9600,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}
