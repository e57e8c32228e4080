//! Notifications published by the motion controller

use super::position::{MotionState, Position};
use crate::pulse::Channel;

/// Maximum queued notifications before the oldest are dropped
pub const NOTIFICATION_CAPACITY: usize = 32;

/// Something the host or the log may want to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// A new target was accepted
    TargetChanged(Position),
    /// Estimated position changed (or was republished)
    PositionChanged(Position),
    /// Motion state changed (or was republished)
    MotionStateChanged(MotionState),
    /// A button was pressed; `wired` is false when the press had no
    /// physical effect
    ButtonPressed { channel: Channel, wired: bool },
    /// A button was released
    ButtonReleased(Channel),
    /// The covering settled at its target
    Arrived(Position),
}

impl Notification {
    /// Check if the host link should forward this notification
    pub fn is_host_visible(&self) -> bool {
        !matches!(
            self,
            Notification::ButtonPressed { .. } | Notification::ButtonReleased(_)
        )
    }
}
