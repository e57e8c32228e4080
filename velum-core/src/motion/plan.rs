//! Target decision table
//!
//! Maps a requested target to the button to press and to how the move has
//! to end. The remote has no "go to N%" command: only the end stops and
//! the "my" preset stop the motor by themselves, so every other target is
//! reached by pressing UP or DOWN and pressing MY again on arrival.

use super::position::{Direction, Position};
use crate::pulse::Channel;

/// What a new target requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MovePlan {
    /// Button pressed when the command is issued
    pub press: Channel,
    /// The run must end with a stop press
    pub intermediate: bool,
    /// Direction reported while moving
    pub direction: Option<Direction>,
}

impl MovePlan {
    /// Decide how to reach `target` from `current`
    ///
    /// Every accepted target presses one button and starts a run, even when
    /// the estimate already sits on it.
    pub fn resolve(target: Position, current: Position) -> Self {
        let direction = Direction::between(current, target);

        if target.is_self_stopping() {
            let press = match target {
                Position::OPEN => Channel::Up,
                Position::CLOSED => Channel::Down,
                _ => Channel::MyPosition,
            };
            return Self {
                press,
                intermediate: false,
                direction,
            };
        }

        // Not above the estimate counts as down
        let press = match direction {
            Some(Direction::Increasing) => Channel::Up,
            Some(Direction::Decreasing) | None => Channel::Down,
        };
        Self {
            press,
            intermediate: true,
            direction,
        }
    }
}
