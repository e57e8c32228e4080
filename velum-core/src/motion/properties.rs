//! Property tests over every valid start/target pair and over arbitrary
//! command interleavings

use proptest::prelude::*;
use std::vec::Vec;

use super::*;
use crate::pulse::Channel;
use crate::testing::{RecordingLine, Wiring};
use crate::traits::Level;

const PRESS_MS: u32 = 500;

fn grid() -> impl Strategy<Value = u8> {
    (0u8..=10).prop_map(|v| v * 10)
}

fn build(movement_s: u16, initial: u8) -> (MotionController<RecordingLine>, Wiring) {
    let wiring = Wiring::new();
    let config = MotionConfig::from_movement_duration(
        movement_s,
        PRESS_MS,
        Position::new(initial).unwrap(),
    );
    let controller = MotionController::new(config, wiring.lines());
    wiring.clear();
    (controller, wiring)
}

fn arrivals(notifications: &[Notification]) -> Vec<u8> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::Arrived(p) => Some(p.value()),
            _ => None,
        })
        .collect()
}

proptest! {
    /// Any run ends stopped on its target with every line released
    #[test]
    fn run_settles_on_target(from in grid(), target in grid(), movement_s in 1u16..=60) {
        let (mut controller, wiring) = build(movement_s, from);
        controller.set_target(target, 0).unwrap();
        controller.poll(u64::MAX / 2);

        prop_assert_eq!(controller.current_position().value(), target);
        prop_assert_eq!(controller.motion_state(), MotionState::Stopped);
        prop_assert_eq!(controller.next_deadline(), None);
        for channel in Channel::ALL {
            prop_assert_ne!(wiring.level(channel), Some(Level::Active));
        }
    }

    /// Every intermediate move ends with one extra MY press, and only those
    #[test]
    fn stop_press_only_for_intermediate(from in grid(), target in grid()) {
        let (mut controller, wiring) = build(8, from);
        controller.set_target(target, 0).unwrap();
        let issued = wiring.presses(Channel::MyPosition);
        controller.poll(u64::MAX / 2);
        let stop_presses = wiring.presses(Channel::MyPosition) - issued;

        let position = Position::new(target).unwrap();
        let expected = usize::from(!position.is_self_stopping());
        prop_assert_eq!(stop_presses, expected);
    }

    /// State reported while moving matches the sign of the move
    #[test]
    fn state_matches_direction(from in grid(), target in grid()) {
        let (mut controller, _wiring) = build(8, from);
        controller.set_target(target, 0).unwrap();

        let expected = match target.cmp(&from) {
            core::cmp::Ordering::Greater => MotionState::Increasing,
            core::cmp::Ordering::Less => MotionState::Decreasing,
            core::cmp::Ordering::Equal => MotionState::Stopped,
        };
        prop_assert_eq!(controller.motion_state(), expected);
    }

    /// A superseding command leaves exactly one arrival, for itself
    #[test]
    fn superseded_command_never_arrives(
        from in grid(),
        first in grid(),
        second in grid(),
        permille in 0u64..1_000,
    ) {
        let first_pos = Position::new(first).unwrap();
        let (mut controller, _wiring) = build(1, from);
        controller.set_target(first, 0).unwrap();

        // Anywhere before the completion tick
        let steps = u64::from(Position::new(from).unwrap().steps_to(first_pos));
        let elapsed = (steps + 1) * 100 * permille / 1_000;

        controller.poll(elapsed);
        let before: Vec<Notification> = controller.drain_notifications().collect();
        prop_assert!(arrivals(&before).is_empty());

        let resume_from = controller.current_position().value();
        controller.set_target(second, elapsed).unwrap();
        controller.poll(u64::MAX / 2);
        let after: Vec<Notification> = controller.drain_notifications().collect();

        prop_assert_eq!(arrivals(&after), [second]);

        // Positions walk from where the first run stopped, one step at a time
        let mut last = resume_from;
        for n in &after {
            if let Notification::PositionChanged(p) = n {
                prop_assert!(p.value().abs_diff(last) <= Position::STEP);
                last = p.value();
            }
        }
        prop_assert_eq!(last, second);
    }

    /// Commands at arbitrary times never leave a line held or released twice
    #[test]
    fn interleaved_commands_keep_lines_sane(
        commands in proptest::collection::vec((grid(), 0u64..3_000), 1..12),
    ) {
        let (mut controller, wiring) = build(2, 0);
        let mut now = 0;
        for (target, gap) in commands {
            now += gap;
            controller.poll(now);
            controller.set_target(target, now).unwrap();
        }
        controller.poll(u64::MAX / 2);

        for channel in Channel::ALL {
            let writes = wiring.writes(channel);
            let active = writes.iter().filter(|l| **l == Level::Active).count();
            let inactive = writes.len() - active;
            prop_assert!(inactive <= active);
            prop_assert_ne!(writes.last(), Some(&Level::Active));
        }
        prop_assert_eq!(controller.motion_state(), MotionState::Stopped);
        prop_assert_eq!(controller.current_position(), controller.target_position());
    }
}
