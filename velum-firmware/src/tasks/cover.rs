//! Cover task
//!
//! Owns the motion controller. Sleeps until the next host command or the
//! controller's next deadline, whichever comes first, then polls the
//! controller and forwards its notifications to the log and the host.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_futures::yield_now;
use embassy_time::{Instant, Timer};

use velum_core::motion::{MotionConfig, MotionController, Notification};
use velum_core::pulse::ButtonLines;
use velum_drivers::remote::RemoteLine;
use velum_hal_rp2040::RpOutputPin;
use velum_protocol::{CoverMessage, HostCommand, RejectReason};

use crate::channels::{self, COMMANDS};

/// Button lines as wired on the RP2040
pub type CoverLines = ButtonLines<RemoteLine<RpOutputPin>>;

type Controller = MotionController<RemoteLine<RpOutputPin>>;

const MANUFACTURER: &str = "Somfy";
const MODEL: &str = "Telis 1 RTS";
const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cover task - runs the motion controller
#[embassy_executor::task]
pub async fn cover_task(config: MotionConfig, lines: CoverLines) {
    info!("Cover task started");

    let mut controller: Controller = MotionController::new(config, lines);
    report(&mut controller);

    loop {
        let command = match controller.next_deadline() {
            Some(deadline) => {
                match select(COMMANDS.receive(), Timer::at(Instant::from_millis(deadline))).await {
                    Either::First(cmd) => Some(cmd),
                    Either::Second(()) => None,
                }
            }
            None => Some(COMMANDS.receive().await),
        };

        let now = Instant::now().as_millis();
        controller.poll(now);

        if let Some(cmd) = command {
            handle_command(&mut controller, cmd, now);
        }

        report(&mut controller);
        // A ready command would otherwise loop without letting TX run
        yield_now().await;
    }
}

fn handle_command(controller: &mut Controller, cmd: HostCommand, now: u64) {
    match cmd {
        HostCommand::SetTarget(value) => {
            if let Err(e) = controller.set_target(value, now) {
                warn!("Rejected target {}: {:?}", value, e);
                if let Some(reason) = RejectReason::from_code(e.code()) {
                    channels::send(CoverMessage::Rejected { value, reason });
                }
            }
        }
        HostCommand::GetStatus => {
            let covering = controller.covering();
            channels::send(CoverMessage::Status {
                current: covering.current.value(),
                target: covering.target.value(),
                state: covering.state.wire_code(),
            });
        }
        HostCommand::Identify => channels::send(CoverMessage::Info {
            manufacturer: MANUFACTURER,
            model: MODEL,
            serial: FIRMWARE_VERSION,
        }),
        // Normally answered by the link RX task
        HostCommand::Ping => channels::send(CoverMessage::Pong),
    }
}

/// Log every queued notification and forward the host-visible ones
fn report(controller: &mut Controller) {
    while let Some(notification) = controller.next_notification() {
        log_notification(&notification);

        if let Some(message) = to_message(&notification) {
            channels::send(message);
        }
    }
}

fn log_notification(notification: &Notification) {
    match *notification {
        Notification::TargetChanged(target) => info!("Target set to {}%", target.value()),
        Notification::PositionChanged(position) => {
            info!("Position update: {}%", position.value())
        }
        Notification::MotionStateChanged(state) => debug!("Motion state: {}", state.label()),
        Notification::ButtonPressed {
            channel,
            wired: true,
        } => info!("Pressing button {}", channel.label()),
        Notification::ButtonPressed {
            channel,
            wired: false,
        } => warn!("GPIO not available, cannot press {}", channel.label()),
        Notification::ButtonReleased(channel) => debug!("Released button {}", channel.label()),
        Notification::Arrived(position) => {
            if !position.is_self_stopping() {
                info!("Stopped at intermediate position {}%", position.value());
            }
            info!("Operation completed");
        }
    }
}

fn to_message(notification: &Notification) -> Option<CoverMessage<'static>> {
    if !notification.is_host_visible() {
        return None;
    }
    match *notification {
        Notification::TargetChanged(target) => Some(CoverMessage::Target(target.value())),
        Notification::PositionChanged(position) => Some(CoverMessage::Position(position.value())),
        Notification::MotionStateChanged(state) => Some(CoverMessage::State(state.wire_code())),
        Notification::Arrived(position) => Some(CoverMessage::Arrived(position.value())),
        Notification::ButtonPressed { .. } | Notification::ButtonReleased(_) => None,
    }
}
