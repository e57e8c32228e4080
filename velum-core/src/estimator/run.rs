//! A single estimation run

use crate::motion::{Direction, Position};

/// Stepping process from one position to another
///
/// The run advances one 10% step per tick. Once the tracked position equals
/// the target, the next tick completes the run instead of stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EstimationRun {
    /// Position when the run was started
    pub origin: Position,
    /// Position the run is heading for
    pub target: Position,
    /// Tracked position
    pub position: Position,
    /// Time between ticks (ms)
    pub interval_ms: u32,
    /// Scheduled time of the next tick (ms)
    pub next_tick_ms: u64,
}

impl EstimationRun {
    pub(crate) fn new(from: Position, to: Position, interval_ms: u32, now_ms: u64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            origin: from,
            target: to,
            position: from,
            interval_ms,
            next_tick_ms: now_ms + u64::from(interval_ms),
        }
    }

    /// Direction of the whole run, `None` for a run that starts on target
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.origin, self.target)
    }

    /// Steps still to take before the completion tick
    pub fn remaining_steps(&self) -> u8 {
        self.position.steps_to(self.target)
    }

    /// Check if the tracked position has not reached the target yet
    pub fn is_travelling(&self) -> bool {
        self.position != self.target
    }

    /// Time at which the run will complete if left alone (ms)
    pub fn completes_at(&self) -> u64 {
        self.next_tick_ms + u64::from(self.remaining_steps()) * u64::from(self.interval_ms)
    }

    /// Advance the schedule by one interval
    ///
    /// Anchored to the previous deadline, not to when the tick was handled,
    /// so late polls do not stretch the run.
    pub(crate) fn advance_schedule(&mut self) {
        self.next_tick_ms += u64::from(self.interval_ms);
    }
}
