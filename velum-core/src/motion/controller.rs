//! Motion controller
//!
//! Owns the covering state and composes the pulse controller with the
//! position estimator:
//!
//! ```text
//! set_target ──> MovePlan ──> PulseController::pulse (UP / DOWN / MY)
//!                         └─> PositionEstimator::start
//!
//! poll(now) ──> releases due ──> ButtonReleased
//!           └─> ticks due ──> PositionChanged ... Completed
//!                                                   └─> stop press (MY) if intermediate
//!                                                   └─> Stopped, Arrived
//! ```
//!
//! The controller never sleeps. The caller asks for [`next_deadline`],
//! waits until then (or until a new command arrives), and calls [`poll`].
//! Everything observable is queued as a [`Notification`].
//!
//! [`next_deadline`]: MotionController::next_deadline
//! [`poll`]: MotionController::poll

use heapless::Deque;

use super::notify::{Notification, NOTIFICATION_CAPACITY};
use super::plan::MovePlan;
use super::position::{MotionState, Position, TargetError};
use crate::estimator::{EstimatorEvent, PositionEstimator};
use crate::pulse::{ButtonLines, Channel, PulseController};
use crate::traits::ButtonLine;

/// Timing and initial state for a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Time per 10% step (ms)
    pub tick_interval_ms: u32,
    /// How long a button is held per press (ms)
    pub button_press_ms: u32,
    /// Position assumed at boot
    pub initial_position: Position,
}

impl MotionConfig {
    /// Build from a full-traverse time in seconds
    ///
    /// A full traverse is ten steps, so each step takes a tenth of it.
    pub fn from_movement_duration(
        movement_duration_s: u16,
        button_press_ms: u32,
        initial_position: Position,
    ) -> Self {
        Self {
            tick_interval_ms: u32::from(movement_duration_s) * 100,
            button_press_ms,
            initial_position,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::from_movement_duration(8, 500, Position::CLOSED)
    }
}

/// Snapshot of the covering state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Covering {
    pub current: Position,
    pub target: Position,
    pub state: MotionState,
    /// The active run must end with a stop press
    pub intermediate: bool,
}

/// Covering motion controller
pub struct MotionController<L: ButtonLine> {
    config: MotionConfig,
    covering: Covering,
    pulses: PulseController<L>,
    estimator: PositionEstimator,
    notifications: Deque<Notification, NOTIFICATION_CAPACITY>,
}

impl<L: ButtonLine> MotionController<L> {
    /// Create a controller resting at the configured initial position
    ///
    /// All lines are driven inactive.
    pub fn new(config: MotionConfig, lines: ButtonLines<L>) -> Self {
        let initial = config.initial_position;
        Self {
            config,
            covering: Covering {
                current: initial,
                target: initial,
                state: MotionState::Stopped,
                intermediate: false,
            },
            pulses: PulseController::new(lines),
            estimator: PositionEstimator::new(),
            notifications: Deque::new(),
        }
    }

    /// Request a new target position
    ///
    /// Invalid values are rejected before anything happens. An accepted
    /// target cancels the active run in the same step, presses the button
    /// the move needs and starts a new run. Progress is reported through
    /// notifications.
    pub fn set_target(&mut self, value: u8, now_ms: u64) -> Result<(), TargetError> {
        let target = Position::new(value)?;

        self.estimator.cancel();

        let current = self.covering.current;
        let plan = MovePlan::resolve(target, current);

        self.covering.target = target;
        self.covering.intermediate = plan.intermediate;
        self.covering.state = MotionState::from_direction(plan.direction);
        self.notify(Notification::TargetChanged(target));

        self.press(plan.press, now_ms);

        self.notify(Notification::MotionStateChanged(self.covering.state));
        self.notify(Notification::PositionChanged(current));

        self.estimator
            .start(current, target, self.config.tick_interval_ms, now_ms);

        Ok(())
    }

    /// Process every release and tick due at or before `now_ms`
    ///
    /// Deadlines are handled in time order, releases first on a tie, so a
    /// late poll produces the same sequence as a punctual one.
    pub fn poll(&mut self, now_ms: u64) {
        loop {
            let release = self.pulses.next_release().filter(|t| *t <= now_ms);
            let tick = self.estimator.next_tick().filter(|t| *t <= now_ms);

            match (release, tick) {
                (Some(r), Some(t)) if r <= t => self.release_due(r),
                (Some(r), None) => self.release_due(r),
                (_, Some(t)) => self.tick_due(t),
                (None, None) => break,
            }
        }
    }

    fn release_due(&mut self, due_ms: u64) {
        for channel in self.pulses.poll(due_ms) {
            self.notify(Notification::ButtonReleased(channel));
        }
    }

    fn tick_due(&mut self, due_ms: u64) {
        match self.estimator.poll(due_ms) {
            Some(EstimatorEvent::Stepped { position, .. }) => {
                self.covering.current = position;
                self.notify(Notification::PositionChanged(position));
            }
            Some(EstimatorEvent::Completed { position, at_ms }) => {
                if self.covering.intermediate {
                    self.press(Channel::MyPosition, at_ms);
                    self.covering.intermediate = false;
                }
                self.covering.current = position;
                self.covering.state = MotionState::Stopped;
                self.notify(Notification::MotionStateChanged(MotionState::Stopped));
                self.notify(Notification::Arrived(position));
            }
            None => {}
        }
    }

    fn press(&mut self, channel: Channel, now_ms: u64) {
        self.pulses
            .pulse(channel, self.config.button_press_ms, now_ms);
        let wired = self
            .pulses
            .pending(channel)
            .map(|p| p.delivered)
            .unwrap_or(false);
        self.notify(Notification::ButtonPressed { channel, wired });
    }

    fn notify(&mut self, notification: Notification) {
        if self.notifications.is_full() {
            self.notifications.pop_front();
        }
        let _ = self.notifications.push_back(notification);
    }

    /// Earliest time at which [`poll`](Self::poll) has work to do
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.pulses.next_release(), self.estimator.next_tick()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Take the oldest queued notification
    pub fn next_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    /// Drain all queued notifications
    pub fn drain_notifications(&mut self) -> impl Iterator<Item = Notification> + '_ {
        core::iter::from_fn(move || self.notifications.pop_front())
    }

    pub fn current_position(&self) -> Position {
        self.covering.current
    }

    pub fn target_position(&self) -> Position {
        self.covering.target
    }

    pub fn motion_state(&self) -> MotionState {
        self.covering.state
    }

    pub fn covering(&self) -> Covering {
        self.covering
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn pulses(&self) -> &PulseController<L> {
        &self.pulses
    }

    pub fn estimator(&self) -> &PositionEstimator {
        &self.estimator
    }
}
