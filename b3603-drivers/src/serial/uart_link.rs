//! UART line link
//!
//! Polls the UART for received bytes, assembles them into lines and
//! queues responses. Output goes through a bounded queue that `drive`
//! hands to the UART only as fast as its transmit buffer accepts, so a
//! long reply never stalls the control loop.
//!
//! Reading pauses while a completed line waits to be taken, and a line is
//! only handed out once the previous reply has left the queue. Unread
//! bytes stay in the UART until the dispatcher is ready for them.

use core::fmt;

use b3603_core::traits::SerialLink;
use b3603_hal::Uart;
use b3603_protocol::{Line, LineBuffer, LineError, EOL};
use heapless::Deque;

/// Upper bound on bytes consumed by one `drive` call
pub const MAX_BYTES_PER_DRIVE: usize = 16;

/// Output queue size; holds the longest reply (HELP) with room to spare
pub const TX_QUEUE_LEN: usize = 512;

/// Line-oriented link over a polled UART
pub struct UartLink<U> {
    uart: U,
    lines: LineBuffer,
    ready: Option<Line>,
    tx: Deque<u8, TX_QUEUE_LEN>,
}

impl<U: Uart> UartLink<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            lines: LineBuffer::new(),
            ready: None,
            tx: Deque::new(),
        }
    }

    /// Access the underlying UART
    pub fn uart(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Bytes queued but not yet accepted by the UART
    pub fn pending_output(&self) -> usize {
        self.tx.len()
    }

    fn queue(&mut self, bytes: &[u8]) {
        let mut dropped = 0usize;
        for &byte in bytes {
            if self.tx.push_back(byte).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!("output queue full, dropped {} bytes", dropped);
        }
    }

    /// Hand queued output to the UART until it stops accepting
    ///
    /// Returns `false` on a transmit error.
    fn pump(&mut self) -> bool {
        while !self.tx.is_empty() {
            let (front, _) = self.tx.as_slices();
            match self.uart.try_write(front) {
                Ok(0) => break,
                Ok(sent) => {
                    for _ in 0..sent {
                        self.tx.pop_front();
                    }
                }
                Err(_) => {
                    warn!("UART transmit error");
                    return false;
                }
            }
        }
        true
    }
}

impl<U: Uart> fmt::Write for UartLink<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.queue(s.as_bytes());
        Ok(())
    }
}

impl<U: Uart> SerialLink for UartLink<U> {
    fn drive(&mut self, echo: bool) {
        self.pump();

        for _ in 0..MAX_BYTES_PER_DRIVE {
            if self.ready.is_some() {
                break;
            }

            let byte = match self.uart.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    warn!("UART receive error");
                    break;
                }
            };

            if echo {
                self.queue(&[byte]);
            }

            match self.lines.feed(byte) {
                Ok(Some(line)) => self.ready = Some(line),
                Ok(None) => {}
                Err(LineError::Overflow) => {
                    warn!("input line too long, discarding");
                    self.queue(b"LINE TOO LONG");
                    self.queue(EOL.as_bytes());
                }
            }
        }

        self.pump();
    }

    fn take_line(&mut self) -> Option<Line> {
        if !self.tx.is_empty() {
            return None;
        }
        self.ready.take()
    }

    fn flush(&mut self) {
        while !self.tx.is_empty() {
            if !self.pump() {
                break;
            }
        }
        if self.uart.flush().is_err() {
            warn!("UART flush error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b3603_core::command::table;
    use b3603_hal::{UartRx, UartTx};
    use core::fmt::Write;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// UART with a transmit ring of `space` free bytes
    struct MockUart {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
        space: usize,
        writes: usize,
    }

    impl Default for MockUart {
        fn default() -> Self {
            Self {
                rx: VecDeque::new(),
                tx: Vec::new(),
                space: usize::MAX,
                writes: 0,
            }
        }
    }

    impl MockUart {
        fn receive(&mut self, bytes: &[u8]) {
            self.rx.extend(bytes.iter().copied());
        }
    }

    impl UartTx for MockUart {
        type Error = ();

        fn try_write(&mut self, data: &[u8]) -> Result<usize, ()> {
            self.writes += 1;
            let taken = data.len().min(self.space);
            self.tx.extend_from_slice(&data[..taken]);
            self.space -= taken;
            Ok(taken)
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    impl UartRx for MockUart {
        type Error = ();

        fn try_read_byte(&mut self) -> Result<Option<u8>, ()> {
            Ok(self.rx.pop_front())
        }
    }

    fn link() -> UartLink<MockUart> {
        UartLink::new(MockUart::default())
    }

    fn help_reply(link: &mut UartLink<MockUart>) -> Vec<u8> {
        let mut expected = Vec::new();
        write!(link, "COMMANDS:{}", EOL).unwrap();
        expected.extend_from_slice(b"COMMANDS:\r\n");
        for entry in table::entries() {
            if entry.arity == 0 {
                write!(link, "{}{}", entry.name, EOL).unwrap();
                expected.extend_from_slice(format!("{}\r\n", entry.name).as_bytes());
            } else {
                write!(link, "{} <ARG>{}", entry.name, EOL).unwrap();
                expected.extend_from_slice(format!("{} <ARG>\r\n", entry.name).as_bytes());
            }
        }
        write!(link, "DONE{}", EOL).unwrap();
        expected.extend_from_slice(b"DONE\r\n");
        expected
    }

    #[test]
    fn test_assembles_line() {
        let mut link = link();
        link.uart().receive(b"STATUS\r\n");
        link.drive(false);
        assert_eq!(link.take_line().as_deref(), Some("STATUS"));
        assert_eq!(link.take_line(), None);
    }

    #[test]
    fn test_line_split_across_drives() {
        let mut link = link();
        link.uart().receive(b"VOLT");
        link.drive(false);
        assert_eq!(link.take_line(), None);

        link.uart().receive(b"AGE 5\n");
        link.drive(false);
        assert_eq!(link.take_line().as_deref(), Some("VOLTAGE 5"));
    }

    #[test]
    fn test_waits_while_line_pending() {
        let mut link = link();
        link.uart().receive(b"MODEL\nVERSION\n");
        link.drive(false);
        link.drive(false);
        assert_eq!(link.take_line().as_deref(), Some("MODEL"));
        assert_eq!(link.uart().rx.len(), b"VERSION\n".len());

        link.drive(false);
        assert_eq!(link.take_line().as_deref(), Some("VERSION"));
    }

    #[test]
    fn test_drive_is_bounded() {
        let mut link = link();
        link.uart().receive(&[b'A'; 40]);
        link.drive(false);
        assert_eq!(link.uart().rx.len(), 40 - MAX_BYTES_PER_DRIVE);
    }

    #[test]
    fn test_echo() {
        let mut link = link();
        link.uart().receive(b"HELP\r");
        link.drive(true);
        assert_eq!(link.uart().tx, b"HELP\r");

        let mut quiet = self::link();
        quiet.uart().receive(b"HELP\r");
        quiet.drive(false);
        assert!(quiet.uart().tx.is_empty());
    }

    #[test]
    fn test_overflow_reported_and_discarded() {
        let mut link = link();
        let long = [b'X'; 70];
        for chunk in long.chunks(MAX_BYTES_PER_DRIVE) {
            link.uart().receive(chunk);
            link.drive(false);
        }
        link.uart().receive(b"\nMODEL\n");
        for _ in 0..4 {
            link.drive(false);
        }

        assert_eq!(link.uart().tx, b"LINE TOO LONG\r\n");
        assert_eq!(link.take_line().as_deref(), Some("MODEL"));
    }

    #[test]
    fn test_write_is_queued_until_drive() {
        let mut link = link();
        write!(link, "DONE{}", EOL).unwrap();
        assert!(link.uart().tx.is_empty());
        assert_eq!(link.pending_output(), 6);

        link.drive(false);
        assert_eq!(link.uart().tx, b"DONE\r\n");
        assert_eq!(link.pending_output(), 0);
    }

    #[test]
    fn test_help_reply_never_touches_uart_while_writing() {
        let mut link = link();
        link.uart().space = 64;

        let expected = help_reply(&mut link);
        assert!(expected.len() > 64 * 4);
        assert_eq!(link.uart().writes, 0);
        assert_eq!(link.pending_output(), expected.len());

        // Each drive sends only what the ring takes and returns
        link.drive(false);
        assert_eq!(link.uart().tx.len(), 64);

        let mut drives = 1;
        while link.pending_output() > 0 {
            link.uart().space = 64;
            link.drive(false);
            drives += 1;
            assert!(drives < 32);
        }
        assert_eq!(link.uart().tx, expected);
    }

    #[test]
    fn test_line_held_until_reply_drained() {
        let mut link = link();
        link.uart().space = 4;
        write!(link, "VERSION: 0.1.0{}DONE{}", EOL, EOL).unwrap();
        link.uart().receive(b"MODEL\n");

        link.drive(false);
        assert_eq!(link.take_line(), None);

        while link.pending_output() > 0 {
            link.uart().space = 4;
            link.drive(false);
        }
        assert_eq!(link.take_line().as_deref(), Some("MODEL"));
    }

    #[test]
    fn test_full_queue_drops_instead_of_waiting() {
        let mut link = link();
        link.uart().space = 0;
        for _ in 0..(TX_QUEUE_LEN / 8 + 4) {
            write!(link, "OVERRUN!").unwrap();
        }
        assert_eq!(link.pending_output(), TX_QUEUE_LEN);

        link.drive(false);
        assert!(link.uart().tx.is_empty());
        assert_eq!(link.pending_output(), TX_QUEUE_LEN);
    }

    #[test]
    fn test_flush_drains_queue() {
        let mut link = link();
        write!(link, "STUCK{}", EOL).unwrap();
        link.flush();
        assert_eq!(link.uart().tx, b"STUCK\r\n");
        assert_eq!(link.pending_output(), 0);
    }
}
