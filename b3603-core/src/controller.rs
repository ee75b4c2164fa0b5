//! Main control loop
//!
//! [`Instrument`] owns all mutable state. The firmware calls
//! [`Instrument::boot`] once and then [`Instrument::tick`] forever. One
//! tick runs, in order:
//!
//! 1. Watchdog feed
//! 2. One measurement pipeline step
//! 3. One display digit refresh
//! 4. One serial link drive
//! 5. At most one command, if a complete line arrived

use core::fmt::{self, Write};

use b3603_protocol::EOL;

use crate::command::{Outcome, Session};
use crate::context::Context;
use crate::display::DisplayMultiplexer;
use crate::measurement::MeasurementPipeline;
use crate::traits::{
    AdcDriver, ConfigStore, ModeSense, OutputActuator, SegmentBus, SerialLink, Watchdog,
};
use crate::{FW_VERSION, MODEL};

/// The board's collaborators
pub struct Board<A, B, M, O, C, L, W> {
    pub adc: A,
    pub bus: B,
    pub sense: M,
    pub actuator: O,
    pub store: C,
    pub link: L,
    pub watchdog: W,
}

/// Instrument state driven by the polling loop
pub struct Instrument {
    ctx: Context,
    pipeline: MeasurementPipeline,
    display: DisplayMultiplexer,
    stalled: bool,
}

impl Instrument {
    /// Load configuration, announce the firmware and apply the output state
    pub fn boot<A, B, M, O, C, L, W>(
        board: &mut Board<A, B, M, O, C, L, W>,
    ) -> Result<Self, fmt::Error>
    where
        A: AdcDriver,
        O: OutputActuator,
        C: ConfigStore,
        L: SerialLink,
    {
        let system = board.store.load_system();
        let output = board.store.load_output();

        let mut ctx = Context::new(system, output);
        ctx.system.output = ctx.system.default_on;

        write!(
            board.link,
            "{}{} starting: Version {}{}",
            EOL, MODEL, FW_VERSION, EOL
        )?;

        let mut pipeline = MeasurementPipeline::new();
        pipeline.start(&mut board.adc);

        board
            .actuator
            .commit(&ctx.output, &ctx.system, ctx.runtime.constant_current);

        info!(
            "boot: output={} vset={} cset={}",
            ctx.system.output, ctx.output.vset, ctx.output.cset
        );

        Ok(Self {
            ctx,
            pipeline,
            display: DisplayMultiplexer::new(),
            stalled: false,
        })
    }

    /// Run one loop iteration
    ///
    /// Returns how the command line was handled, if one was executed.
    pub fn tick<A, B, M, O, C, L, W>(
        &mut self,
        board: &mut Board<A, B, M, O, C, L, W>,
    ) -> Result<Option<Outcome>, fmt::Error>
    where
        A: AdcDriver,
        B: SegmentBus,
        M: ModeSense,
        O: OutputActuator,
        C: ConfigStore,
        L: SerialLink,
        W: Watchdog,
    {
        if !self.stalled {
            board.watchdog.feed();
        }

        self.pipeline.poll(
            &mut board.adc,
            &mut board.sense,
            &mut board.actuator,
            &self.ctx.system,
            &mut self.ctx.runtime,
            &mut self.display,
        );

        self.display.refresh(&mut board.bus);

        board.link.drive(self.ctx.echo);

        let Some(line) = board.link.take_line() else {
            return Ok(None);
        };

        let outcome = Session::new(
            &mut self.ctx,
            &mut board.link,
            &mut board.actuator,
            &mut board.store,
        )
        .execute(&line)?;

        if outcome == Outcome::Stall {
            board.link.flush();
            self.stalled = true;
        }

        Ok(Some(outcome))
    }

    /// Shared state
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Display state
    pub fn display(&self) -> &DisplayMultiplexer {
        &self.display
    }

    /// Whether the watchdog is no longer fed
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }
}
