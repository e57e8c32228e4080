//! Frame encoding and byte-wise decoding
//!
//! - START (1 byte): 0x5A
//! - LENGTH (1 byte): payload length, at most [`MAX_PAYLOAD_SIZE`]
//! - TYPE (1 byte): message type
//! - PAYLOAD (LENGTH bytes)
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE and every payload byte

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x5A;

/// Largest payload a frame may carry
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

/// Frame errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload longer than [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Received checksum does not match
    InvalidChecksum,
    /// LENGTH byte announces an impossible payload
    InvalidLength(u8),
    /// Unknown message type or malformed payload
    InvalidMessage(u8),
    /// Output buffer too small
    BufferTooSmall,
}

/// One protocol frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type
    pub msg_type: u8,
    /// Payload bytes
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame without payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ msg_type, |acc, b| acc ^ b)
    }

    /// Number of bytes [`encode`](Self::encode) writes
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + 4
    }

    /// Write the frame into `buf`, returning the number of bytes used
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buf.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (head, rest) = out.split_at_mut(3);
        head.copy_from_slice(&[FRAME_START, length, self.msg_type]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(len)
    }

    /// Encode into a fixed-capacity buffer
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let mut out = Vec::new();
        // A frame always fits MAX_FRAME_SIZE
        if let Ok(len) = self.encode(&mut buf) {
            let _ = out.extend_from_slice(&buf[..len]);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Type { length: u8 },
    Payload { length: u8, msg_type: u8 },
    Checksum { length: u8, msg_type: u8 },
}

/// Incremental frame decoder
///
/// Bytes before a START byte are skipped, so the parser resynchronises on
/// its own after line noise or a bad frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.payload.clear();
    }

    /// Check if a frame is partially received
    pub fn in_frame(&self) -> bool {
        self.stage != Stage::Sync
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` when a frame completes, `Ok(None)` while
    /// more bytes are needed. On error the partial frame is dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.stage = match self.stage {
            Stage::Sync => {
                if byte == FRAME_START {
                    self.payload.clear();
                    Stage::Length
                } else {
                    Stage::Sync
                }
            }
            Stage::Length => {
                if usize::from(byte) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength(byte));
                }
                Stage::Type { length: byte }
            }
            Stage::Type { length } if length == 0 => Stage::Checksum {
                length,
                msg_type: byte,
            },
            Stage::Type { length } => Stage::Payload {
                length,
                msg_type: byte,
            },
            Stage::Payload { length, msg_type } => {
                let _ = self.payload.push(byte);
                if self.payload.len() == usize::from(length) {
                    Stage::Checksum { length, msg_type }
                } else {
                    Stage::Payload { length, msg_type }
                }
            }
            Stage::Checksum { length, msg_type } => {
                let expected = Frame::checksum(length, msg_type, &self.payload);
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                if byte != expected {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(Frame { msg_type, payload }));
            }
        };
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec as StdVec;

    fn feed_all(parser: &mut FrameParser, bytes: &[u8]) -> StdVec<Result<Frame, FrameError>> {
        bytes
            .iter()
            .filter_map(|b| parser.feed(*b).transpose())
            .collect()
    }

    #[test]
    fn test_encode_empty() {
        let mut buf = [0u8; 8];
        let len = Frame::empty(0x04).encode(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x5A, 0x00, 0x04, 0x04]);
    }

    #[test]
    fn test_encode_status() {
        let frame = Frame::new(0x40, &[30, 100, 0]).unwrap();
        let bytes = frame.to_bytes();
        assert_eq!(
            bytes.as_slice(),
            &[0x5A, 3, 0x40, 30, 100, 0, 3 ^ 0x40 ^ 30 ^ 100]
        );
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x40, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 6];
        assert_eq!(frame.encode(&mut buf), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_payload_too_large() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x45, &payload), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_parser_skips_garbage() {
        let mut bytes = StdVec::from([0x00, 0xFF, 0x13]);
        bytes.extend_from_slice(&Frame::new(0x01, &[70]).unwrap().to_bytes());

        let mut parser = FrameParser::new();
        let frames = feed_all(&mut parser, &bytes);
        assert_eq!(frames, [Ok(Frame::new(0x01, &[70]).unwrap())]);
        assert!(!parser.in_frame());
    }

    #[test]
    fn test_parser_rejects_bad_checksum_then_recovers() {
        let mut bad = Frame::empty(0x02).to_bytes();
        let last = bad.len() - 1;
        bad[last] ^= 0x55;

        let mut bytes = StdVec::from(bad.as_slice());
        bytes.extend_from_slice(&Frame::empty(0x04).to_bytes());

        let mut parser = FrameParser::new();
        let frames = feed_all(&mut parser, &bytes);
        assert_eq!(
            frames,
            [Err(FrameError::InvalidChecksum), Ok(Frame::empty(0x04))]
        );
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(200), Err(FrameError::InvalidLength(200)));
        assert!(!parser.in_frame());
    }

    proptest! {
        #[test]
        fn test_any_frame_survives_noise(
            msg_type in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
            noise in proptest::collection::vec(any::<u8>().prop_filter("not START", |b| *b != FRAME_START), 0..16),
        ) {
            let frame = Frame::new(msg_type, &payload).unwrap();
            let mut bytes = noise.clone();
            bytes.extend_from_slice(&frame.to_bytes());

            let mut parser = FrameParser::new();
            let frames = feed_all(&mut parser, &bytes);
            prop_assert_eq!(frames, [Ok(frame)]);
        }
    }
}
