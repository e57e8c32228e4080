//! Remote control button lines

mod button;

pub use button::RemoteButton;

use velum_core::config::{ButtonsConfig, PinConfig};
use velum_core::pulse::{ButtonLines, Channel};
use velum_core::traits::{ButtonLine, DetachedLine, Level, LineError};
use velum_hal::OutputPin;

/// A button line that is either wired to a pin or simulated
///
/// Chosen once at boot from configuration. A detached line keeps the
/// controller's bookkeeping running without touching hardware.
#[derive(Debug)]
pub enum RemoteLine<P: OutputPin> {
    Wired(RemoteButton<P>),
    Detached(DetachedLine),
}

impl<P: OutputPin> RemoteLine<P> {
    pub fn wired(pin: P, config: PinConfig) -> Self {
        RemoteLine::Wired(RemoteButton::new(pin, config.inverted))
    }

    pub fn detached() -> Self {
        RemoteLine::Detached(DetachedLine)
    }

    pub fn is_wired(&self) -> bool {
        matches!(self, RemoteLine::Wired(_))
    }
}

impl<P: OutputPin> ButtonLine for RemoteLine<P> {
    fn write(&mut self, level: Level) -> Result<(), LineError> {
        match self {
            RemoteLine::Wired(button) => button.write(level),
            RemoteLine::Detached(line) => line.write(level),
        }
    }

    fn release(&mut self) {
        match self {
            RemoteLine::Wired(button) => button.release(),
            RemoteLine::Detached(line) => line.release(),
        }
    }
}

/// Build the three button lines described by `config`
///
/// `take` hands out the pin for one channel. When buttons are disabled
/// every line is detached; when `take` fails only that line is.
pub fn build_lines<P, E, F>(config: &ButtonsConfig, mut take: F) -> ButtonLines<RemoteLine<P>>
where
    P: OutputPin,
    F: FnMut(Channel, PinConfig) -> Result<P, E>,
{
    let mut line = |channel: Channel, pin: PinConfig| {
        if !config.enabled {
            return RemoteLine::detached();
        }
        match take(channel, pin) {
            Ok(p) => RemoteLine::wired(p, pin),
            Err(_) => RemoteLine::detached(),
        }
    };

    ButtonLines {
        up: line(Channel::Up, config.up),
        down: line(Channel::Down, config.down),
        my_position: line(Channel::MyPosition, config.my_position),
    }
}
