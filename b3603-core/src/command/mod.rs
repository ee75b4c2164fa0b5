//! Command dispatcher
//!
//! Executes one input line against the instrument context. The
//! compatibility vocabulary is tried first on the whole line; anything it
//! does not recognize goes through the primary protocol:
//!
//! ```text
//! NAME[ ARG]  →  KEY: VALUE\r\n ... DONE\r\n
//! ```

pub mod compat;
mod handlers;
pub mod table;

use core::fmt::{self, Write};

use b3603_protocol::{tokenize, EOL};

use crate::context::Context;
use crate::traits::{ConfigStore, OutputActuator};

pub use compat::CompatQuery;
pub use table::{CommandEntry, Op};

/// How a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Primary protocol, response terminated with `DONE`
    Done,
    /// Compatibility request, no terminator
    Compat,
    /// The loop must stop feeding the watchdog
    Stall,
}

/// Everything a command may touch while it runs
pub struct Session<'a, W, O, C> {
    ctx: &'a mut Context,
    out: &'a mut W,
    actuator: &'a mut O,
    store: &'a mut C,
}

impl<'a, W, O, C> Session<'a, W, O, C>
where
    W: Write,
    O: OutputActuator,
    C: ConfigStore,
{
    pub fn new(ctx: &'a mut Context, out: &'a mut W, actuator: &'a mut O, store: &'a mut C) -> Self {
        Self {
            ctx,
            out,
            actuator,
            store,
        }
    }

    /// Execute one complete line
    pub fn execute(&mut self, line: &str) -> Result<Outcome, fmt::Error> {
        if let Some(query) = compat::lookup(line) {
            debug!("compat request: {}", line);
            self.compat(query)?;
            return Ok(Outcome::Compat);
        }

        let tokens = tokenize(line);
        let outcome = match table::lookup(tokens.name) {
            None => {
                self.line(format_args!("UNKNOWN COMMAND"))?;
                Outcome::Done
            }
            Some(entry) if tokens.args.count() != Some(entry.arity) => {
                self.line(format_args!("ARGUMENT ERROR"))?;
                Outcome::Done
            }
            Some(entry) => {
                trace!("command {}", entry.name);
                self.run(entry.op, tokens.args.first().unwrap_or(""))?
            }
        };

        if outcome == Outcome::Done {
            self.line(format_args!("DONE"))?;
        }

        Ok(outcome)
    }

    /// Write one response line
    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.out.write_fmt(args)?;
        self.out.write_str(EOL)
    }
}
