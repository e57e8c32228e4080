//! Pins handed out by number
//!
//! Button pins come from `cover.toml` as GPIO numbers, so they have to be
//! looked up at runtime. The bank owns every GPIO except the two used by the
//! host link, which are split off together with their UART.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_0, PIN_1, UART0};
use embassy_rp::{Peri, Peripherals};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// GPIOs owned by the host link (UART0 TX/RX)
const LINK_PINS: [u8; 2] = [0, 1];

/// Error when taking a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinBankError {
    /// No such GPIO (valid: 0-29)
    InvalidPin(u8),
    /// Pin already handed out
    AlreadyTaken(u8),
    /// Pin belongs to the host link
    Reserved(u8),
}

/// Peripherals for the host link
pub struct LinkPeripherals {
    pub uart: Peri<'static, UART0>,
    pub tx: Peri<'static, PIN_0>,
    pub rx: Peri<'static, PIN_1>,
}

/// Every GPIO not claimed by the link, takeable by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Split the chip's peripherals into the pin bank and the link
    pub fn split(p: Peripherals) -> (Self, LinkPeripherals) {
        let link = LinkPeripherals {
            uart: p.UART0,
            tx: p.PIN_0,
            rx: p.PIN_1,
        };
        let bank = Self {
            pins: [
                None,
                None,
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        (bank, link)
    }

    /// Take a pin by GPIO number
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinBankError> {
        if LINK_PINS.contains(&pin) {
            return Err(PinBankError::Reserved(pin));
        }
        self.pins
            .get_mut(usize::from(pin))
            .ok_or(PinBankError::InvalidPin(pin))?
            .take()
            .ok_or(PinBankError::AlreadyTaken(pin))
    }

    /// Check if a pin can still be taken
    pub fn is_available(&self, pin: u8) -> bool {
        matches!(self.pins.get(usize::from(pin)), Some(Some(_)))
    }
}
