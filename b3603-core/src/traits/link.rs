//! Serial transport trait

use b3603_protocol::Line;

/// Line-oriented serial link
///
/// Responses are written through [`core::fmt::Write`], which must only
/// queue them. [`SerialLink::drive`] moves queued output to the wire and
/// gathers input until a complete line is available; neither waits on the
/// UART.
pub trait SerialLink: core::fmt::Write {
    /// Move pending bytes between the UART and the link's queues
    ///
    /// Echoes received bytes back when `echo` is set.
    fn drive(&mut self, echo: bool);

    /// Take the completed line, if any
    fn take_line(&mut self) -> Option<Line>;

    /// Block until all queued output has left the UART
    fn flush(&mut self);
}
