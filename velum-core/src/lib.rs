//! Board-agnostic core logic for the covering controller firmware
//!
//! This crate contains all control logic that does not depend on specific
//! hardware:
//!
//! - Button line trait (the injected output capability)
//! - Pulse controller (timed button presses with safe re-trigger)
//! - Position estimator (open-loop stepping model)
//! - Motion controller (target decisions, stop-at-intermediate handling)
//! - Configuration types and the embedded TOML parser
//!
//! Nothing here reads a clock. Every time-dependent call takes a monotonic
//! `now_ms`, and pending timers are plain deadlines that the caller sleeps
//! on (see [`motion::MotionController::next_deadline`]).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod estimator;
pub mod motion;
pub mod pulse;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
