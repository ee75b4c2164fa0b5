//! B3603 serial command protocol
//!
//! This crate holds the transport-independent pieces of the text protocol
//! spoken on the B3603's serial header:
//!
//! ```text
//! host  → VOLTAGE 5.25\r
//! b3603 ← VOLTAGE: SET 5.250\r\n
//! b3603 ← DONE\r\n
//! ```
//!
//! - [`line`]: assembles received bytes into command lines
//! - [`token`]: splits a line into command name and argument
//! - [`number`]: fixed-point parsing and formatting of protocol values

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod line;
pub mod number;
pub mod token;

pub use line::{Line, LineBuffer, LineError, MAX_LINE_LEN};
pub use number::{parse_milli, parse_uint, Fixed16, Milli, OnOff, ParseError, YesNo};
pub use token::{tokenize, Args, Tokens};

/// Line terminator used in every response
pub const EOL: &str = "\r\n";
