//! Recording button lines for host tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use crate::pulse::{ButtonLines, Channel};
use crate::traits::{ButtonLine, Level, LineError};

/// Something that happened on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    Write(Level),
    Release,
}

/// Shared log for a set of recording lines
#[derive(Debug, Clone, Default)]
pub struct Wiring {
    log: Rc<RefCell<Vec<(Channel, LineEvent)>>>,
    failing: Rc<Cell<bool>>,
}

impl Wiring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> ButtonLines<RecordingLine> {
        ButtonLines {
            up: self.line(Channel::Up),
            down: self.line(Channel::Down),
            my_position: self.line(Channel::MyPosition),
        }
    }

    fn line(&self, channel: Channel) -> RecordingLine {
        RecordingLine {
            channel,
            log: Rc::clone(&self.log),
            failing: Rc::clone(&self.failing),
        }
    }

    /// Make every subsequent write fail (still logged)
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn events(&self) -> Vec<(Channel, LineEvent)> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Levels written to one channel, in order
    pub fn writes(&self, channel: Channel) -> Vec<Level> {
        self.log
            .borrow()
            .iter()
            .filter_map(|(c, e)| match e {
                LineEvent::Write(level) if *c == channel => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Number of active writes (button presses) on one channel
    pub fn presses(&self, channel: Channel) -> usize {
        self.writes(channel)
            .iter()
            .filter(|l| **l == Level::Active)
            .count()
    }

    /// Last level written to one channel
    pub fn level(&self, channel: Channel) -> Option<Level> {
        self.writes(channel).last().copied()
    }
}

/// Line that appends every call to a shared log
#[derive(Debug)]
pub struct RecordingLine {
    channel: Channel,
    log: Rc<RefCell<Vec<(Channel, LineEvent)>>>,
    failing: Rc<Cell<bool>>,
}

impl ButtonLine for RecordingLine {
    fn write(&mut self, level: Level) -> Result<(), LineError> {
        self.log
            .borrow_mut()
            .push((self.channel, LineEvent::Write(level)));
        if self.failing.get() {
            Err(LineError::WriteFailed)
        } else {
            Ok(())
        }
    }

    fn release(&mut self) {
        self.log.borrow_mut().push((self.channel, LineEvent::Release));
    }
}
