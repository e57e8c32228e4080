//! Hardware driver implementations
//!
//! Concrete [`ButtonLine`](velum_core::traits::ButtonLine) implementations
//! for a remote control whose buttons are hard-wired to GPIO pins:
//!
//! - Polarity-aware button over any `velum_hal::OutputPin`
//! - Wired/detached selection made from configuration at boot

#![no_std]
#![deny(unsafe_code)]

pub mod remote;
