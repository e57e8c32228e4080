//! Velum Hardware Abstraction Layer
//!
//! This crate defines the pin-level traits that chip-specific HALs implement.
//! Drivers in `velum-drivers` build on these to emulate remote button presses,
//! so the same control code runs on any board that can toggle a GPIO.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  velum-firmware / velum-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  velum-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  velum-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{OutputPin, PinError};
