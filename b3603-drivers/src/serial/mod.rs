//! Serial transport

pub mod uart_link;

pub use uart_link::{UartLink, MAX_BYTES_PER_DRIVE};
