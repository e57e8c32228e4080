//! Host link protocol
//!
//! Binary protocol between a home-automation host and the covering
//! controller, carried over UART.
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 0x5A  │ 1B     │ 1B   │ 0–32B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The host sends [`HostCommand`]s; the controller answers and pushes
//! unsolicited [`CoverMessage`] notifications as the covering moves.
//! Positions are raw percentages and motion states use the wire codes
//! 0 (closing), 1 (opening), 2 (stopped).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{CoverMessage, HostCommand, RejectReason};
