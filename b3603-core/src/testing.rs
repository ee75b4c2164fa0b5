//! Test doubles for the collaborator traits

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use b3603_protocol::Line;

use crate::config::{OutputConfig, SystemConfig};
use crate::traits::{
    AdcChannel, AdcDriver, ConfigStore, ModeSense, OutputActuator, SegmentBus, SerialLink,
    Watchdog,
};

/// ADC whose conversions complete when the test says so
#[derive(Debug, Default)]
pub struct MockAdc {
    /// Channel ids passed to `start`, in order
    pub started: Vec<u8>,
    ready: bool,
    raw: u16,
    channel: u8,
}

impl MockAdc {
    /// Complete the conversion in flight with `raw`
    pub fn complete(&mut self, raw: u16) {
        let channel = self.started.last().copied().unwrap_or(0);
        self.complete_on(channel, raw);
    }

    /// Complete a conversion reporting an arbitrary channel id
    pub fn complete_on(&mut self, channel: u8, raw: u16) {
        self.ready = true;
        self.raw = raw;
        self.channel = channel;
    }
}

impl AdcDriver for MockAdc {
    fn start(&mut self, channel: AdcChannel) {
        self.started.push(channel.id());
        self.ready = false;
    }

    fn is_ready(&mut self) -> bool {
        self.ready
    }

    fn read(&mut self) -> u16 {
        self.raw
    }

    fn converted_channel(&mut self) -> u8 {
        self.channel
    }
}

/// Segment bus that records every word
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub words: Vec<u16>,
}

impl SegmentBus for RecordingBus {
    fn shift_out(&mut self, bits: u16) {
        self.words.push(bits);
    }
}

/// Sense line driven by the test
#[derive(Debug, Default)]
pub struct MockSense {
    pub cc: bool,
}

impl ModeSense for MockSense {
    fn is_constant_current(&mut self) -> bool {
        self.cc
    }
}

/// Actuator that records commits and state checks
#[derive(Debug, Default)]
pub struct RecordingActuator {
    /// (output, vset, cset) per commit
    pub commits: Vec<(bool, u16, u16)>,
    /// CC flag per state check
    pub checks: Vec<bool>,
}

impl OutputActuator for RecordingActuator {
    fn commit(&mut self, output: &OutputConfig, system: &SystemConfig, _constant_current: bool) {
        self.commits.push((system.output, output.vset, output.cset));
    }

    fn check_state(&mut self, _system: &SystemConfig, constant_current: bool) {
        self.checks.push(constant_current);
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub system: Option<SystemConfig>,
    pub output: Option<OutputConfig>,
    pub saves: usize,
}

impl ConfigStore for MemoryStore {
    fn load_system(&mut self) -> SystemConfig {
        self.system.clone().unwrap_or_else(|| self.default_system())
    }

    fn save_system(&mut self, config: &SystemConfig) {
        self.system = Some(config.clone());
        self.saves += 1;
    }

    fn load_output(&mut self) -> OutputConfig {
        self.output.unwrap_or_else(|| self.default_output())
    }

    fn save_output(&mut self, config: &OutputConfig) {
        self.output = Some(*config);
        self.saves += 1;
    }
}

/// Serial link with scripted input lines and captured output
#[derive(Debug, Default)]
pub struct MockLink {
    pub input: VecDeque<Line>,
    pub output: String,
    /// Echo flag seen by each `drive` call
    pub drives: Vec<bool>,
}

impl MockLink {
    /// Queue a line for the next `take_line`
    pub fn push_line(&mut self, text: &str) {
        let mut line = Line::new();
        line.push_str(text).unwrap();
        self.input.push_back(line);
    }

    /// Take everything written so far
    pub fn take_output(&mut self) -> String {
        core::mem::take(&mut self.output)
    }
}

impl core::fmt::Write for MockLink {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl SerialLink for MockLink {
    fn drive(&mut self, echo: bool) {
        self.drives.push(echo);
    }

    fn take_line(&mut self) -> Option<Line> {
        self.input.pop_front()
    }

    fn flush(&mut self) {}
}

/// Watchdog that counts feeds
#[derive(Debug, Default)]
pub struct MockWatchdog {
    pub feeds: usize,
}

impl Watchdog for MockWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

/// Shared record of collaborator calls across a whole board
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<&'static str>>>);

impl EventLog {
    /// Record an event; repeats of the previous event are collapsed
    pub fn push(&self, event: &'static str) {
        let mut events = self.0.borrow_mut();
        if events.last() != Some(&event) {
            events.push(event);
        }
    }

    /// Take everything recorded so far
    pub fn take(&self) -> Vec<&'static str> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Wraps a test double and records its calls in an [`EventLog`]
///
/// Sense and ADC reads log `poll`, segment shifts `refresh`, watchdog
/// feeds `feed`, response writes `reply`, and the link logs `drive`,
/// `take_line` and `flush`.
#[derive(Debug)]
pub struct Traced<T> {
    pub inner: T,
    log: EventLog,
}

impl<T> Traced<T> {
    pub fn new(inner: T, log: &EventLog) -> Self {
        Self {
            inner,
            log: log.clone(),
        }
    }
}

impl<T: AdcDriver> AdcDriver for Traced<T> {
    fn start(&mut self, channel: AdcChannel) {
        self.inner.start(channel);
    }

    fn is_ready(&mut self) -> bool {
        self.log.push("poll");
        self.inner.is_ready()
    }

    fn read(&mut self) -> u16 {
        self.inner.read()
    }

    fn converted_channel(&mut self) -> u8 {
        self.inner.converted_channel()
    }
}

impl<T: ModeSense> ModeSense for Traced<T> {
    fn is_constant_current(&mut self) -> bool {
        self.log.push("poll");
        self.inner.is_constant_current()
    }
}

impl<T: SegmentBus> SegmentBus for Traced<T> {
    fn shift_out(&mut self, bits: u16) {
        self.log.push("refresh");
        self.inner.shift_out(bits);
    }
}

impl<T: Watchdog> Watchdog for Traced<T> {
    fn feed(&mut self) {
        self.log.push("feed");
        self.inner.feed();
    }
}

impl<T: core::fmt::Write> core::fmt::Write for Traced<T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.log.push("reply");
        self.inner.write_str(s)
    }
}

impl<T: SerialLink> SerialLink for Traced<T> {
    fn drive(&mut self, echo: bool) {
        self.log.push("drive");
        self.inner.drive(echo);
    }

    fn take_line(&mut self) -> Option<Line> {
        self.log.push("take_line");
        self.inner.take_line()
    }

    fn flush(&mut self) {
        self.log.push("flush");
        self.inner.flush();
    }
}
