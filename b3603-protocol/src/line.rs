//! Line assembly for the serial command protocol.
//!
//! Bytes are fed one at a time as they arrive from the UART. A CR or LF
//! completes the line; the terminator itself is dropped. Hosts that send
//! CR LF therefore produce one line followed by an empty one, and empty
//! lines are swallowed here.

use heapless::{String, Vec};

/// Longest accepted command line, terminator excluded
pub const MAX_LINE_LEN: usize = 64;

/// A complete command line
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while assembling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// The line exceeded [`MAX_LINE_LEN`]; the rest of it is discarded
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Accumulating bytes
    Collecting,
    /// Dropping bytes until the next terminator
    Discarding,
}

/// State machine assembling received bytes into lines
#[derive(Debug, Clone)]
pub struct LineBuffer {
    state: LineState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            state: LineState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Number of bytes collected for the current line
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if no partial line is pending
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line, `Ok(None)` when more bytes are needed, or
    /// `Err(LineError::Overflow)` once for a line that is too long.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        let terminator = byte == b'\r' || byte == b'\n';

        match self.state {
            LineState::Discarding => {
                if terminator {
                    self.state = LineState::Collecting;
                }
                Ok(None)
            }
            LineState::Collecting if terminator => {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let line = self.take();
                Ok(Some(line))
            }
            LineState::Collecting => {
                // Anything outside printable ASCII can never match a command
                let printable = byte.is_ascii_graphic() || byte == b' ';
                let byte = if printable { byte } else { b'.' };
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = LineState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete line found, if any. Remaining bytes after
    /// a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn take(&mut self) -> Line {
        let mut line = Line::new();
        for &byte in &self.buffer {
            // Buffer only ever holds ASCII and has the same capacity
            let _ = line.push(byte as char);
        }
        self.buffer.clear();
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_completes_on_cr() {
        let mut buffer = LineBuffer::new();
        let line = buffer.feed_bytes(b"STATUS\r").unwrap().unwrap();
        assert_eq!(line.as_str(), "STATUS");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_crlf_yields_single_line() {
        let mut buffer = LineBuffer::new();
        let line = buffer.feed_bytes(b"VOLTAGE 5\r").unwrap().unwrap();
        assert_eq!(line.as_str(), "VOLTAGE 5");
        // The trailing LF is an empty line and is swallowed
        assert_eq!(buffer.feed(b'\n'), Ok(None));
    }

    #[test]
    fn test_partial_line_is_kept() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.feed_bytes(b"CONF"), Ok(None));
        assert_eq!(buffer.len(), 4);
        let line = buffer.feed_bytes(b"IG\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "CONFIG");
    }

    #[test]
    fn test_overflow_discards_until_terminator() {
        let mut buffer = LineBuffer::new();
        let long = [b'A'; MAX_LINE_LEN];
        assert_eq!(buffer.feed_bytes(&long), Ok(None));
        assert_eq!(buffer.feed(b'B'), Err(LineError::Overflow));

        // Tail of the long line is dropped silently
        assert_eq!(buffer.feed_bytes(b"CCC"), Ok(None));
        assert_eq!(buffer.feed(b'\r'), Ok(None));

        let line = buffer.feed_bytes(b"MODEL\r").unwrap().unwrap();
        assert_eq!(line.as_str(), "MODEL");
    }

    #[test]
    fn test_non_ascii_is_masked() {
        let mut buffer = LineBuffer::new();
        let line = buffer.feed_bytes(&[b'A', 0xC3, b'B', b'\n']).unwrap().unwrap();
        assert_eq!(line.as_str(), "A.B");
    }

    #[test]
    fn test_control_bytes_are_masked() {
        let mut buffer = LineBuffer::new();
        let line = buffer
            .feed_bytes(&[b'S', 0x07, b'N', b'\t', 0x1B, b' ', 0x7F, b'\r'])
            .unwrap()
            .unwrap();
        assert_eq!(line.as_str(), "S.N.. .");
    }

    proptest! {
        #[test]
        fn prop_any_short_ascii_line_is_returned_verbatim(text in "[ -~]{1,64}") {
            let mut buffer = LineBuffer::new();
            prop_assert_eq!(buffer.feed_bytes(text.as_bytes()), Ok(None));
            let line = buffer.feed(b'\r').unwrap().unwrap();
            prop_assert_eq!(line.as_str(), text.as_str());
        }
    }
}
