//! Polarity-aware remote button
//!
//! The remote's push buttons short a contact to ground, so the usual
//! wiring is active-low: pulling the GPIO low "presses" the button and
//! driving it high lets go. Some boards sit an inverting transistor in
//! between, which is why the polarity comes from configuration.
//!
//! ```ignore
//! let mut up = RemoteButton::new(pin, true); // "!gpio2"
//! up.write(Level::Active)?;   // GPIO low, button held
//! up.write(Level::Inactive)?; // GPIO high, button released
//! ```

use velum_core::traits::{ButtonLine, Level, LineError};
use velum_hal::{OutputPin, PinError};

/// One remote button driven by a GPIO pin
#[derive(Debug)]
pub struct RemoteButton<P: OutputPin> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> RemoteButton<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Pin level that corresponds to a logical level
    fn pin_high(&self, level: Level) -> bool {
        (level == Level::Active) != self.active_low
    }

    /// Check if the button is currently held
    pub fn is_pressed(&self) -> bool {
        self.pin.is_set_high() != self.active_low
    }

    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// Give back the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ButtonLine for RemoteButton<P> {
    fn write(&mut self, level: Level) -> Result<(), LineError> {
        let high = self.pin_high(level);
        self.pin.set_state(high).map_err(|e| match e {
            PinError::Released => LineError::Detached,
            PinError::WriteFailed => LineError::WriteFailed,
        })
    }

    fn release(&mut self) {
        self.pin.release();
    }
}
