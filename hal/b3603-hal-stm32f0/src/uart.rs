//! USART driver for STM32F0
//!
//! Wraps an interrupt-driven `BufferedUart`. Neither direction blocks: a
//! byte is only read when the ring buffer reports one ready, and writes
//! take only what fits in the transmit ring.

use core::task::Poll;

use b3603_hal::uart::{Parity, StopBits};
use b3603_hal::{UartConfig, UartRx, UartTx};
use embassy_futures::poll_once;
use embassy_stm32::usart::{self, BufferedUart, Error as UsartError};
use embedded_io::{Read, ReadReady, Write};
use embedded_io_async::Write as AsyncWrite;

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too small
    BufferTooSmall,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooSmall,
            _ => UartBusError::Other,
        }
    }
}

/// Translate a board-agnostic line configuration for embassy
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = usart::DataBits::DataBits8;
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

/// Buffered USART
pub struct Stm32Uart<'d> {
    inner: BufferedUart<'d>,
}

impl<'d> Stm32Uart<'d> {
    pub fn new(inner: BufferedUart<'d>) -> Self {
        Self { inner }
    }
}

impl UartTx for Stm32Uart<'_> {
    type Error = UartBusError;

    fn try_write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if data.is_empty() {
            return Ok(0);
        }

        // The async write completes at once while the ring has room and
        // stays pending when it is full
        match poll_once(AsyncWrite::write(&mut self.inner, data)) {
            Poll::Ready(written) => Ok(written?),
            Poll::Pending => Ok(0),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.inner).map_err(UartBusError::from)
    }
}

impl UartRx for Stm32Uart<'_> {
    type Error = UartBusError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.inner.read_ready()? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match Read::read(&mut self.inner, &mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
