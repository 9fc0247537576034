//! Recording fakes for the collaborator traits. All fakes built from the same
//! [`Journal`] append to one ordered event list.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use embedded_hal::delay::DelayNs;

use crate::{
    annunciator::{Indicator, TextDisplay},
    input::{RawInputs, SignalSource},
    state::IndicatorColor,
    tone::{ClockDivider, PwmSlice},
};

pub const TEST_CLOCK_HZ: u32 = 125_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Indicator(IndicatorColor),
    Draw { x: i32, y: i32, text: String },
    Flush,
    Clear,
    Divider(ClockDivider),
    Level(u16),
    Delay(u32),
}

impl Event {
    pub fn is_audio(&self) -> bool {
        matches!(self, Event::Divider(_) | Event::Level(_))
    }
}

#[derive(Default, Clone)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Drains everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        self.0.borrow_mut().drain(..).collect()
    }
}

pub struct RecordingIndicator(Journal);

impl RecordingIndicator {
    pub fn new(journal: &Journal) -> Self {
        Self(journal.clone())
    }
}

impl Indicator for RecordingIndicator {
    fn show(&mut self, color: IndicatorColor) {
        self.0.push(Event::Indicator(color));
    }
}

pub struct RecordingDisplay {
    journal: Journal,
    fail: bool,
}

impl RecordingDisplay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
        }
    }

    /// A display whose every operation is recorded and then reported failed.
    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: true,
        }
    }

    fn outcome(&self) -> Result<(), &'static str> {
        if self.fail { Err("bus nak") } else { Ok(()) }
    }
}

impl TextDisplay for RecordingDisplay {
    type Error = &'static str;

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        self.journal.push(Event::Draw {
            x,
            y,
            text: text.to_string(),
        });
        self.outcome()
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.journal.push(Event::Flush);
        self.outcome()
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.journal.push(Event::Clear);
        self.outcome()
    }
}

pub struct RecordingPwm(Journal);

impl RecordingPwm {
    pub fn new(journal: &Journal) -> Self {
        Self(journal.clone())
    }
}

impl PwmSlice for RecordingPwm {
    fn clock_hz(&self) -> u32 {
        TEST_CLOCK_HZ
    }

    fn set_divider(&mut self, divider: ClockDivider) {
        self.0.push(Event::Divider(divider));
    }

    fn set_level(&mut self, level: u16) {
        self.0.push(Event::Level(level));
    }
}

pub struct RecordingDelay(Journal);

impl RecordingDelay {
    pub fn new(journal: &Journal) -> Self {
        Self(journal.clone())
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::Delay(ms));
    }
}

/// Replays a fixed list of input pairs, then keeps returning the last one.
pub struct ScriptedSignals {
    script: VecDeque<RawInputs>,
    last: RawInputs,
}

impl ScriptedSignals {
    pub fn new(script: &[(bool, bool)]) -> Self {
        Self {
            script: script
                .iter()
                .map(|&(signal_a, signal_b)| RawInputs { signal_a, signal_b })
                .collect(),
            last: RawInputs::default(),
        }
    }
}

impl SignalSource for ScriptedSignals {
    fn sample(&mut self) -> RawInputs {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Output line that records its level into a shared cell.
#[derive(Clone, Default)]
pub struct SharedLine(pub Rc<RefCell<Vec<bool>>>);

impl crate::annunciator::OutputLine for SharedLine {
    fn set_on(&mut self, on: bool) {
        self.0.borrow_mut().push(on);
    }
}

