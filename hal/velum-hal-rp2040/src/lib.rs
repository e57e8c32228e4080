//! RP2040-specific HAL for the covering firmware
//!
//! Implements the `velum-hal` pin trait on RP2040 GPIOs and hands out pins
//! by number, so the button wiring can come from the config file instead of
//! being fixed at compile time.
//!
//! - GPIO output pins (`velum_hal::OutputPin`)
//! - Config-driven pin bank with the host link pins split off

#![no_std]

pub mod gpio;
pub mod pins;

pub use gpio::RpOutputPin;
pub use pins::{LinkPeripherals, PinBank, PinBankError, GPIO_COUNT};
