//! Timed button presses
//!
//! Emulates pressing and releasing the buttons of an RTS remote by pulsing
//! button lines for a fixed duration.

pub mod channel;
pub mod controller;

pub use channel::{ButtonLines, Channel, CHANNEL_COUNT};
pub use controller::{PendingRelease, PulseController, Released};
