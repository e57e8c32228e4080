//! Covering motion control
//!
//! Position types, the target decision table and the controller that ties
//! button presses to the position estimator.

pub mod controller;
pub mod notify;
pub mod plan;
pub mod position;

pub use controller::{Covering, MotionConfig, MotionController};
pub use notify::{Notification, NOTIFICATION_CAPACITY};
pub use plan::MovePlan;
pub use position::{Direction, MotionState, Position, TargetError};

#[cfg(test)]
mod properties;
