//! Message types
//!
//! - Host → controller: commands (`0x01..`)
//! - Controller → host: replies and notifications (`0x40..`)

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Host → controller
pub const MSG_SET_TARGET: u8 = 0x01;
pub const MSG_GET_STATUS: u8 = 0x02;
pub const MSG_IDENTIFY: u8 = 0x03;
pub const MSG_PING: u8 = 0x04;

// Controller → host
pub const MSG_STATUS: u8 = 0x40;
pub const MSG_POSITION: u8 = 0x41;
pub const MSG_TARGET: u8 = 0x42;
pub const MSG_STATE: u8 = 0x43;
pub const MSG_REJECTED: u8 = 0x44;
pub const MSG_INFO: u8 = 0x45;
pub const MSG_PONG: u8 = 0x46;
pub const MSG_ARRIVED: u8 = 0x47;

/// Commands sent by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Move to a position (percent open)
    SetTarget(u8),
    /// Ask for a [`CoverMessage::Status`]
    GetStatus,
    /// Ask for a [`CoverMessage::Info`]
    Identify,
    /// Liveness check
    Ping,
}

impl HostCommand {
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match (frame.msg_type, frame.payload.as_slice()) {
            (MSG_SET_TARGET, [value]) => Ok(HostCommand::SetTarget(*value)),
            (MSG_GET_STATUS, []) => Ok(HostCommand::GetStatus),
            (MSG_IDENTIFY, []) => Ok(HostCommand::Identify),
            (MSG_PING, []) => Ok(HostCommand::Ping),
            (msg_type, _) => Err(FrameError::InvalidMessage(msg_type)),
        }
    }

    /// Encode (host side and tests)
    pub fn to_frame(&self) -> Frame {
        match self {
            HostCommand::SetTarget(value) => Frame {
                msg_type: MSG_SET_TARGET,
                payload: Vec::from_slice(&[*value]).unwrap_or_default(),
            },
            HostCommand::GetStatus => Frame::empty(MSG_GET_STATUS),
            HostCommand::Identify => Frame::empty(MSG_IDENTIFY),
            HostCommand::Ping => Frame::empty(MSG_PING),
        }
    }
}

/// Why a `SetTarget` was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// Above 100
    OutOfRange = 1,
    /// Not a multiple of 10
    NotMultipleOfTen = 2,
}

impl RejectReason {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(RejectReason::OutOfRange),
            2 => Some(RejectReason::NotMultipleOfTen),
            _ => None,
        }
    }
}

/// Messages sent by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoverMessage<'a> {
    /// Reply to `GetStatus`
    Status { current: u8, target: u8, state: u8 },
    /// Estimated position changed
    Position(u8),
    /// Target accepted
    Target(u8),
    /// Motion state changed (wire code)
    State(u8),
    /// `SetTarget` refused
    Rejected { value: u8, reason: RejectReason },
    /// Reply to `Identify`
    Info {
        manufacturer: &'a str,
        model: &'a str,
        serial: &'a str,
    },
    /// Reply to `Ping`
    Pong,
    /// Covering settled at a position
    Arrived(u8),
}

impl<'a> CoverMessage<'a> {
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            CoverMessage::Status {
                current,
                target,
                state,
            } => Frame::new(MSG_STATUS, &[*current, *target, *state]),
            CoverMessage::Position(p) => Frame::new(MSG_POSITION, &[*p]),
            CoverMessage::Target(t) => Frame::new(MSG_TARGET, &[*t]),
            CoverMessage::State(s) => Frame::new(MSG_STATE, &[*s]),
            CoverMessage::Rejected { value, reason } => {
                Frame::new(MSG_REJECTED, &[*reason as u8, *value])
            }
            CoverMessage::Info {
                manufacturer,
                model,
                serial,
            } => {
                // Each string as [len][bytes]
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                for s in [manufacturer, model, serial] {
                    let bytes = s.as_bytes();
                    payload
                        .push(bytes.len() as u8)
                        .map_err(|_| FrameError::PayloadTooLarge)?;
                    payload
                        .extend_from_slice(bytes)
                        .map_err(|_| FrameError::PayloadTooLarge)?;
                }
                Frame::new(MSG_INFO, &payload)
            }
            CoverMessage::Pong => Ok(Frame::empty(MSG_PONG)),
            CoverMessage::Arrived(p) => Frame::new(MSG_ARRIVED, &[*p]),
        }
    }

    /// Decode (host side and tests)
    ///
    /// `Info` strings borrow from the frame.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let invalid = FrameError::InvalidMessage(frame.msg_type);
        let msg = match (frame.msg_type, frame.payload.as_slice()) {
            (MSG_STATUS, [current, target, state]) => CoverMessage::Status {
                current: *current,
                target: *target,
                state: *state,
            },
            (MSG_POSITION, [p]) => CoverMessage::Position(*p),
            (MSG_TARGET, [t]) => CoverMessage::Target(*t),
            (MSG_STATE, [s]) => CoverMessage::State(*s),
            (MSG_REJECTED, [reason, value]) => CoverMessage::Rejected {
                value: *value,
                reason: RejectReason::from_code(*reason).ok_or(invalid)?,
            },
            (MSG_INFO, payload) => {
                let mut rest = payload;
                let mut fields = [""; 3];
                for field in fields.iter_mut() {
                    let (len, tail) = rest.split_first().ok_or(invalid)?;
                    let len = usize::from(*len);
                    if tail.len() < len {
                        return Err(invalid);
                    }
                    *field = core::str::from_utf8(&tail[..len]).map_err(|_| invalid)?;
                    rest = &tail[len..];
                }
                CoverMessage::Info {
                    manufacturer: fields[0],
                    model: fields[1],
                    serial: fields[2],
                }
            }
            (MSG_PONG, []) => CoverMessage::Pong,
            (MSG_ARRIVED, [p]) => CoverMessage::Arrived(*p),
            _ => return Err(invalid),
        };
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_commands_from_frames() {
        let frame = Frame::new(MSG_SET_TARGET, &[40]).unwrap();
        assert_eq!(HostCommand::from_frame(&frame), Ok(HostCommand::SetTarget(40)));
        assert_eq!(
            HostCommand::from_frame(&Frame::empty(MSG_GET_STATUS)),
            Ok(HostCommand::GetStatus)
        );
        assert_eq!(
            HostCommand::from_frame(&Frame::empty(MSG_PING)),
            Ok(HostCommand::Ping)
        );
    }

    #[test]
    fn test_host_command_wrong_payload() {
        // SetTarget without a value
        assert_eq!(
            HostCommand::from_frame(&Frame::empty(MSG_SET_TARGET)),
            Err(FrameError::InvalidMessage(MSG_SET_TARGET))
        );
        // Ping with stray payload
        let frame = Frame::new(MSG_PING, &[1]).unwrap();
        assert_eq!(
            HostCommand::from_frame(&frame),
            Err(FrameError::InvalidMessage(MSG_PING))
        );
        assert_eq!(
            HostCommand::from_frame(&Frame::empty(0x7F)),
            Err(FrameError::InvalidMessage(0x7F))
        );
    }

    #[test]
    fn test_set_target_to_frame() {
        let frame = HostCommand::SetTarget(70).to_frame();
        assert_eq!(frame.msg_type, MSG_SET_TARGET);
        assert_eq!(frame.payload.as_slice(), &[70]);
    }

    #[test]
    fn test_status_layout() {
        let msg = CoverMessage::Status {
            current: 30,
            target: 80,
            state: 1,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_STATUS);
        assert_eq!(frame.payload.as_slice(), &[30, 80, 1]);
    }

    #[test]
    fn test_rejected_layout() {
        let msg = CoverMessage::Rejected {
            value: 55,
            reason: RejectReason::NotMultipleOfTen,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.payload.as_slice(), &[2, 55]);
        assert_eq!(CoverMessage::from_frame(&frame), Ok(msg));
    }

    #[test]
    fn test_info_strings() {
        let msg = CoverMessage::Info {
            manufacturer: "Somfy",
            model: "Telis 1 RTS",
            serial: "0.1.0",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.payload[0], 5);
        assert_eq!(&frame.payload[1..6], b"Somfy");
        assert_eq!(frame.payload[6], 11);
        assert_eq!(CoverMessage::from_frame(&frame), Ok(msg));
    }

    #[test]
    fn test_info_too_long() {
        let msg = CoverMessage::Info {
            manufacturer: "Somfy",
            model: "An extremely verbose model name",
            serial: "0.1.0",
        };
        assert_eq!(msg.to_frame(), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_truncated_info_is_invalid() {
        let frame = Frame::new(MSG_INFO, &[5, b'S', b'o']).unwrap();
        assert_eq!(
            CoverMessage::from_frame(&frame),
            Err(FrameError::InvalidMessage(MSG_INFO))
        );
    }
}
