//! Pulse controller
//!
//! Drives a button line active immediately and releases it once the press
//! duration has elapsed. Each channel owns at most one pending release, so
//! pressing a button that is still held simply moves its release deadline,
//! exactly like keeping a finger on a physical remote a little longer.
//!
//! Write failures are swallowed: the bookkeeping always advances as if the
//! press happened, and [`PendingRelease::delivered`] records whether it
//! actually reached the hardware.
//!
//! ```ignore
//! let mut pulses = PulseController::new(lines);
//! pulses.pulse(Channel::Up, 500, now_ms);
//!
//! // Later, when the deadline is due:
//! for channel in pulses.poll(now_ms) {
//!     info!("released {}", channel.label());
//! }
//! ```

use heapless::Vec;

use super::channel::{ButtonLines, Channel, CHANNEL_COUNT};
use crate::traits::{ButtonLine, Level};

/// Channels released by one call to [`PulseController::poll`]
pub type Released = Vec<Channel, CHANNEL_COUNT>;

/// A press waiting for its release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingRelease {
    /// Time at which the line goes back to inactive (ms)
    pub due_ms: u64,
    /// Whether the active write reached the hardware
    pub delivered: bool,
}

/// Timed pulses on the remote's button lines
#[derive(Debug)]
pub struct PulseController<L: ButtonLine> {
    lines: [L; CHANNEL_COUNT],
    pending: [Option<PendingRelease>; CHANNEL_COUNT],
}

impl<L: ButtonLine> PulseController<L> {
    /// Take ownership of the lines and drive them all inactive
    pub fn new(lines: ButtonLines<L>) -> Self {
        let mut lines = lines.into_array();
        for line in lines.iter_mut() {
            let _ = line.write(Level::Inactive);
        }

        Self {
            lines,
            pending: [None; CHANNEL_COUNT],
        }
    }

    /// Press `channel` now and release it after `active_ms`
    ///
    /// A release already pending on the channel is replaced, never stacked.
    pub fn pulse(&mut self, channel: Channel, active_ms: u32, now_ms: u64) {
        let i = channel.index();
        let delivered = self.lines[i].write(Level::Active).is_ok();

        self.pending[i] = Some(PendingRelease {
            due_ms: now_ms + u64::from(active_ms),
            delivered,
        });
    }

    /// Release every channel whose deadline is at or before `now_ms`
    ///
    /// Channels are returned in deadline order.
    pub fn poll(&mut self, now_ms: u64) -> Released {
        let mut due: Vec<(u64, Channel), CHANNEL_COUNT> = Vec::new();
        for channel in Channel::ALL {
            if let Some(pending) = self.pending[channel.index()] {
                if pending.due_ms <= now_ms {
                    let _ = due.push((pending.due_ms, channel));
                }
            }
        }
        due.sort_unstable_by_key(|(due_ms, channel)| (*due_ms, channel.index()));

        let mut released = Released::new();
        for (_, channel) in due {
            let i = channel.index();
            self.pending[i] = None;
            let _ = self.lines[i].write(Level::Inactive);
            let _ = released.push(channel);
        }
        released
    }

    /// Earliest pending release deadline
    pub fn next_release(&self) -> Option<u64> {
        self.pending.iter().flatten().map(|p| p.due_ms).min()
    }

    /// Pending release for a channel, if it is currently held
    pub fn pending(&self, channel: Channel) -> Option<PendingRelease> {
        self.pending[channel.index()]
    }

    /// Check if a channel is currently held
    pub fn is_held(&self, channel: Channel) -> bool {
        self.pending[channel.index()].is_some()
    }

    /// Borrow the line behind a channel
    pub fn line(&self, channel: Channel) -> &L {
        &self.lines[channel.index()]
    }
}

impl<L: ButtonLine> Drop for PulseController<L> {
    fn drop(&mut self) {
        for (line, pending) in self.lines.iter_mut().zip(self.pending.iter_mut()) {
            if pending.take().is_some() {
                let _ = line.write(Level::Inactive);
            }
            line.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{LineEvent, Wiring};
    use crate::traits::DetachedLine;
    use proptest::prelude::*;

    const PRESS_MS: u32 = 500;

    #[test]
    fn test_new_drives_all_lines_inactive() {
        let wiring = Wiring::new();
        let pulses = PulseController::new(wiring.lines());

        for channel in Channel::ALL {
            assert_eq!(wiring.writes(channel), [Level::Inactive]);
            assert!(!pulses.is_held(channel));
        }
        assert_eq!(pulses.next_release(), None);
    }

    #[test]
    fn test_pulse_is_active_then_released() {
        let wiring = Wiring::new();
        let mut pulses = PulseController::new(wiring.lines());
        wiring.clear();

        pulses.pulse(Channel::Up, PRESS_MS, 1_000);
        assert_eq!(wiring.level(Channel::Up), Some(Level::Active));
        assert_eq!(pulses.next_release(), Some(1_500));

        // Not yet due
        assert!(pulses.poll(1_499).is_empty());
        assert_eq!(wiring.level(Channel::Up), Some(Level::Active));

        let released = pulses.poll(1_500);
        assert_eq!(released.as_slice(), &[Channel::Up]);
        assert_eq!(wiring.writes(Channel::Up), [Level::Active, Level::Inactive]);
        assert!(!pulses.is_held(Channel::Up));
    }

    #[test]
    fn test_repulse_replaces_pending_release() {
        let wiring = Wiring::new();
        let mut pulses = PulseController::new(wiring.lines());
        wiring.clear();

        pulses.pulse(Channel::Down, PRESS_MS, 0);
        pulses.pulse(Channel::Down, PRESS_MS, 300);
        assert_eq!(pulses.next_release(), Some(800));

        // The first press's deadline no longer releases anything
        assert!(pulses.poll(500).is_empty());
        assert_eq!(wiring.level(Channel::Down), Some(Level::Active));

        assert_eq!(pulses.poll(800).as_slice(), &[Channel::Down]);

        // Nothing left to release, ever
        assert!(pulses.poll(10_000).is_empty());
        assert_eq!(
            wiring.writes(Channel::Down),
            [Level::Active, Level::Active, Level::Inactive]
        );
    }

    #[test]
    fn test_channels_are_independent() {
        let wiring = Wiring::new();
        let mut pulses = PulseController::new(wiring.lines());

        pulses.pulse(Channel::Up, PRESS_MS, 0);
        pulses.pulse(Channel::MyPosition, 100, 50);

        assert_eq!(pulses.next_release(), Some(150));
        assert_eq!(pulses.poll(200).as_slice(), &[Channel::MyPosition]);
        assert!(pulses.is_held(Channel::Up));
        assert_eq!(pulses.poll(500).as_slice(), &[Channel::Up]);
    }

    #[test]
    fn test_poll_orders_by_deadline() {
        let wiring = Wiring::new();
        let mut pulses = PulseController::new(wiring.lines());

        pulses.pulse(Channel::Up, 300, 0);
        pulses.pulse(Channel::Down, 100, 0);
        pulses.pulse(Channel::MyPosition, 200, 0);

        let released = pulses.poll(1_000);
        assert_eq!(
            released.as_slice(),
            &[Channel::Down, Channel::MyPosition, Channel::Up]
        );
    }

    #[test]
    fn test_failed_write_keeps_bookkeeping() {
        let wiring = Wiring::new();
        let mut pulses = PulseController::new(wiring.lines());
        wiring.set_failing(true);

        pulses.pulse(Channel::Up, PRESS_MS, 0);
        let pending = pulses.pending(Channel::Up).unwrap();
        assert!(!pending.delivered);
        assert_eq!(pending.due_ms, 500);

        assert_eq!(pulses.poll(500).as_slice(), &[Channel::Up]);
        assert!(!pulses.is_held(Channel::Up));
    }

    #[test]
    fn test_detached_lines_are_bookkeeping_only() {
        let lines = ButtonLines {
            up: DetachedLine,
            down: DetachedLine,
            my_position: DetachedLine,
        };
        let mut pulses = PulseController::new(lines);

        pulses.pulse(Channel::MyPosition, PRESS_MS, 10);
        assert_eq!(
            pulses.pending(Channel::MyPosition),
            Some(PendingRelease {
                due_ms: 510,
                delivered: false
            })
        );
        assert_eq!(pulses.poll(510).as_slice(), &[Channel::MyPosition]);
    }

    #[test]
    fn test_drop_releases_held_lines() {
        let wiring = Wiring::new();
        {
            let mut pulses = PulseController::new(wiring.lines());
            pulses.pulse(Channel::Up, PRESS_MS, 0);
            wiring.clear();
        }

        let events = wiring.events();
        assert_eq!(
            events,
            [
                (Channel::Up, LineEvent::Write(Level::Inactive)),
                (Channel::Up, LineEvent::Release),
                (Channel::Down, LineEvent::Release),
                (Channel::MyPosition, LineEvent::Release),
            ]
        );
    }

    proptest! {
        /// The line is held exactly while inside the window of the most
        /// recent press, and each release follows at least one press
        #[test]
        fn test_line_held_only_within_last_window(
            gaps in proptest::collection::vec(0u64..1_000, 1..16),
            active_ms in 1u32..800,
        ) {
            let wiring = Wiring::new();
            let mut pulses = PulseController::new(wiring.lines());
            wiring.clear();

            let mut now = 0;
            let mut last_press = None;
            for gap in gaps {
                // Probe halfway through the gap before pressing again
                if let Some(pressed_at) = last_press {
                    let probe = now + gap / 2;
                    pulses.poll(probe);
                    let expected_held = probe < pressed_at + u64::from(active_ms);
                    prop_assert_eq!(pulses.is_held(Channel::Up), expected_held);
                }
                now += gap;
                pulses.poll(now);
                pulses.pulse(Channel::Up, active_ms, now);
                last_press = Some(now);
            }
            pulses.poll(u64::MAX);

            let writes = wiring.writes(Channel::Up);
            let active = writes.iter().filter(|l| **l == Level::Active).count();
            prop_assert!(writes.len() - active <= active);
            prop_assert_eq!(writes.last(), Some(&Level::Inactive));
        }
    }
}
