//! GPIO output pins
//!
//! Button lines are driven through a [`Flex`] pin so that releasing one can
//! put it back into high impedance. The remote then sees an untouched
//! button, whatever the wiring polarity.

use embassy_rp::gpio::{AnyPin, Flex, Level};
use embassy_rp::Peri;
use embedded_hal::digital::PinState;
use velum_hal::{OutputPin, PinError};

/// RP2040 GPIO driving one remote button
pub struct RpOutputPin {
    pin: Flex<'static>,
    /// GPIO number, for logging
    number: u8,
    released: bool,
}

impl RpOutputPin {
    /// Take a pin as an output already at `idle_high`
    ///
    /// The level is latched before the output driver is enabled so the
    /// line never glitches to the active level at boot.
    pub fn new(pin: Peri<'static, AnyPin>, number: u8, idle_high: bool) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_level(if idle_high { Level::High } else { Level::Low });
        pin.set_as_output();
        Self {
            pin,
            number,
            released: false,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }
}

impl OutputPin for RpOutputPin {
    fn set_high(&mut self) -> Result<(), PinError> {
        self.set_state(true)
    }

    fn set_low(&mut self) -> Result<(), PinError> {
        self.set_state(false)
    }

    fn set_state(&mut self, high: bool) -> Result<(), PinError> {
        if self.released {
            return Err(PinError::Released);
        }
        embedded_hal::digital::OutputPin::set_state(&mut self.pin, PinState::from(high))
            .map_err(|_| PinError::WriteFailed)
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }

    fn release(&mut self) {
        if !self.released {
            self.pin.set_as_input();
            self.released = true;
        }
    }
}
