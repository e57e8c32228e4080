//! Position and motion-state types for the covering
//!
//! Positions are percentages of travel where 0 is fully closed and 100 is
//! fully open. The covering only ever rests on a 10% grid, so a validated
//! [`Position`] is always one of 0, 10, 20 .. 100.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid-aligned covering position (percent open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Position(u8);

impl Position {
    /// Fully closed
    pub const CLOSED: Position = Position(0);
    /// Fully open
    pub const OPEN: Position = Position(100);
    /// Position the remote's "my" preset is programmed to
    pub const MY_PRESET: Position = Position(10);
    /// Size of one estimation step
    pub const STEP: u8 = 10;

    /// Validate a raw percentage
    pub const fn new(value: u8) -> Result<Self, TargetError> {
        if value > Self::OPEN.0 {
            Err(TargetError::OutOfRange(value))
        } else if value % Self::STEP != 0 {
            Err(TargetError::NotDecadal(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Raw percentage
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if this is one of the positions the remote reaches by itself
    ///
    /// The motor stops on its own at both end stops and at the "my" preset;
    /// every other position needs an explicit stop press.
    pub const fn is_self_stopping(self) -> bool {
        matches!(self.0, 0 | 10 | 100)
    }

    /// One step toward `target`, or `self` if already there
    pub fn step_toward(self, target: Position) -> Position {
        match Direction::between(self, target) {
            Some(Direction::Increasing) => Position(self.0 + Self::STEP),
            Some(Direction::Decreasing) => Position(self.0 - Self::STEP),
            None => self,
        }
    }

    /// Number of steps between two positions
    pub const fn steps_to(self, target: Position) -> u8 {
        self.0.abs_diff(target.0) / Self::STEP
    }
}

impl TryFrom<u8> for Position {
    type Error = TargetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> u8 {
        position.0
    }
}

/// Reasons a requested target is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetError {
    /// Above 100%
    OutOfRange(u8),
    /// Not on the 10% grid
    NotDecadal(u8),
}

impl TargetError {
    /// Reason code sent to the host
    pub const fn code(self) -> u8 {
        match self {
            TargetError::OutOfRange(_) => 1,
            TargetError::NotDecadal(_) => 2,
        }
    }

    /// The refused value
    pub const fn value(self) -> u8 {
        match self {
            TargetError::OutOfRange(v) | TargetError::NotDecadal(v) => v,
        }
    }
}

impl core::fmt::Display for TargetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TargetError::OutOfRange(v) => write!(f, "target {} is above 100", v),
            TargetError::NotDecadal(v) => write!(f, "target {} is not a multiple of 10", v),
        }
    }
}

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Toward 100 (opening)
    Increasing,
    /// Toward 0 (closing)
    Decreasing,
}

impl Direction {
    /// Direction needed to get from `from` to `to`, `None` if equal
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        match to.0.cmp(&from.0) {
            core::cmp::Ordering::Greater => Some(Direction::Increasing),
            core::cmp::Ordering::Less => Some(Direction::Decreasing),
            core::cmp::Ordering::Equal => None,
        }
    }
}

/// Reported motion state of the covering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionState {
    /// Moving toward 100
    Increasing,
    /// Moving toward 0
    Decreasing,
    /// At rest
    #[default]
    Stopped,
}

impl MotionState {
    /// State for an optional direction of travel
    pub const fn from_direction(direction: Option<Direction>) -> Self {
        match direction {
            Some(Direction::Increasing) => MotionState::Increasing,
            Some(Direction::Decreasing) => MotionState::Decreasing,
            None => MotionState::Stopped,
        }
    }

    /// Host wire code (0 decreasing, 1 increasing, 2 stopped)
    pub const fn wire_code(self) -> u8 {
        match self {
            MotionState::Decreasing => 0,
            MotionState::Increasing => 1,
            MotionState::Stopped => 2,
        }
    }

    /// Decode a host wire code
    pub const fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(MotionState::Decreasing),
            1 => Some(MotionState::Increasing),
            2 => Some(MotionState::Stopped),
            _ => None,
        }
    }

    /// Check if the covering is travelling
    pub const fn is_moving(self) -> bool {
        !matches!(self, MotionState::Stopped)
    }

    pub const fn label(self) -> &'static str {
        match self {
            MotionState::Increasing => "opening",
            MotionState::Decreasing => "closing",
            MotionState::Stopped => "stopped",
        }
    }
}
