//! Open-loop position estimator
//!
//! The motor gives no feedback, so position is modelled: a run steps the
//! tracked position 10% toward its target every tick interval and reports
//! completion on the tick after it lands. The tick interval is fixed per
//! step (a tenth of the full-traverse time), so a partial move takes
//! proportionally less time than a full one.
//!
//! # State machine
//!
//! ```text
//! Idle ──start──> Running(direction) ──completion tick──> Idle
//!                   │  ▲
//!                   └──┘ start (replaces the run)
//! ```
//!
//! There is only ever one run. Starting a new one overwrites the old run
//! together with its pending tick, so nothing from a superseded run can be
//! observed afterwards.

mod run;

pub use run::EstimationRun;

use crate::motion::{Direction, Position};

/// Estimator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EstimatorState {
    /// No run active
    Idle,
    /// A run is active; `None` when it started on its target
    Running { direction: Option<Direction> },
}

/// Result of one processed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EstimatorEvent {
    /// Tracked position moved one step
    Stepped { position: Position, at_ms: u64 },
    /// Run finished at its target
    Completed { position: Position, at_ms: u64 },
}

impl EstimatorEvent {
    /// Scheduled time of the tick that produced this event
    pub fn at_ms(&self) -> u64 {
        match self {
            EstimatorEvent::Stepped { at_ms, .. } | EstimatorEvent::Completed { at_ms, .. } => {
                *at_ms
            }
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EstimatorEvent::Stepped { position, .. }
            | EstimatorEvent::Completed { position, .. } => *position,
        }
    }
}

/// Single-run position estimator
#[derive(Debug, Default)]
pub struct PositionEstimator {
    run: Option<EstimationRun>,
}

impl PositionEstimator {
    pub fn new() -> Self {
        Self { run: None }
    }

    /// Start a run from `from` to `to`, replacing any active run
    ///
    /// The first tick is due one interval after `now_ms`. Returns the run
    /// that was superseded, if any.
    pub fn start(
        &mut self,
        from: Position,
        to: Position,
        interval_ms: u32,
        now_ms: u64,
    ) -> Option<EstimationRun> {
        self.run
            .replace(EstimationRun::new(from, to, interval_ms, now_ms))
    }

    /// Drop the active run without completing it
    pub fn cancel(&mut self) -> Option<EstimationRun> {
        self.run.take()
    }

    /// Time of the next tick, if a run is active
    pub fn next_tick(&self) -> Option<u64> {
        self.run.as_ref().map(|run| run.next_tick_ms)
    }

    /// Process at most one tick due at or before `now_ms`
    ///
    /// Call repeatedly until it returns `None` to catch up on several
    /// overdue ticks.
    pub fn poll(&mut self, now_ms: u64) -> Option<EstimatorEvent> {
        let run = self.run.as_mut()?;
        if run.next_tick_ms > now_ms {
            return None;
        }

        let at_ms = run.next_tick_ms;
        if run.is_travelling() {
            run.position = run.position.step_toward(run.target);
            run.advance_schedule();
            Some(EstimatorEvent::Stepped {
                position: run.position,
                at_ms,
            })
        } else {
            let position = run.position;
            self.run = None;
            Some(EstimatorEvent::Completed { position, at_ms })
        }
    }

    /// Active run, if any
    pub fn run(&self) -> Option<&EstimationRun> {
        self.run.as_ref()
    }

    pub fn state(&self) -> EstimatorState {
        match &self.run {
            None => EstimatorState::Idle,
            Some(run) => EstimatorState::Running {
                direction: run.direction(),
            },
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }
}
