//! Command line tokenizer.
//!
//! A command line is `NAME` or `NAME ARG`, separated by exactly one space.
//! Anything beyond two tokens is reported as [`Args::Exceeded`], which
//! matches no declared arity.

/// Maximum number of tokens in a command line (name plus one argument)
pub const MAX_TOKENS: usize = 2;

/// Arguments found after the command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Args<'a> {
    /// No argument
    None,
    /// Exactly one argument
    One(&'a str),
    /// More tokens than [`MAX_TOKENS`]
    Exceeded,
}

impl<'a> Args<'a> {
    /// Number of arguments, or `None` when the limit was exceeded
    pub fn count(self) -> Option<u8> {
        match self {
            Args::None => Some(0),
            Args::One(_) => Some(1),
            Args::Exceeded => None,
        }
    }

    /// The single argument, if present
    pub fn first(self) -> Option<&'a str> {
        match self {
            Args::One(arg) => Some(arg),
            _ => None,
        }
    }
}

/// A tokenized command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokens<'a> {
    /// Command name (first token)
    pub name: &'a str,
    /// Arguments following the name
    pub args: Args<'a>,
}

/// Split a line on single spaces
pub fn tokenize(line: &str) -> Tokens<'_> {
    let mut parts = line.split(' ');
    let name = parts.next().unwrap_or("");

    let args = match (parts.next(), parts.next()) {
        (None, _) => Args::None,
        (Some(arg), None) => Args::One(arg),
        (Some(_), Some(_)) => Args::Exceeded,
    };

    Tokens { name, args }
}
