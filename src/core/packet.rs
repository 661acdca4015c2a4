//! # RCON Packet
//!
//! A packet is an immutable value: a request id chosen by the client, a type
//! tag and a text payload. This module converts between that value and the
//! frame body that travels on the wire.
//!
//! ## Wire Format
//! ```text
//! [Length(4, LE)] [RequestId(4, LE)] [Type(4, LE)] [Payload(N)] [0x00 0x00]
//! ```
//! `Length` counts every byte after itself. [`Packet::encode`] and
//! [`Packet::decode`] work on the body (everything after the length prefix);
//! [`Packet::to_frame`] produces the full length-prefixed frame.

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::MAX_FRAME_SIZE;
use crate::error::{constants, RconError, Result};

/// Two zero bytes that terminate every frame body
pub const TERMINATOR: [u8; 2] = [0x00, 0x00];

/// Size of the length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Smallest valid body: request id + type + terminator
pub const MIN_BODY_SIZE: usize = 4 + 4 + TERMINATOR.len();

/// Packet type tag. The integer values are fixed by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PacketType {
    Response = 0,
    Command = 2,
    Login = 3,
}

impl PacketType {
    /// Protocol value of this type
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for PacketType {
    type Error = RconError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(PacketType::Response),
            2 => Ok(PacketType::Command),
            3 => Ok(PacketType::Login),
            _ => Err(RconError::InvalidFrame(constants::ERR_UNKNOWN_TYPE)),
        }
    }
}

impl From<PacketType> for u32 {
    fn from(kind: PacketType) -> u32 {
        kind.as_u32()
    }
}

/// One RCON packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    request_id: u32,
    kind: PacketType,
    payload: String,
}

impl Packet {
    pub fn new(request_id: u32, kind: PacketType, payload: impl Into<String>) -> Self {
        Self {
            request_id,
            kind,
            payload: payload.into(),
        }
    }

    /// Command packet with a fresh random request id
    pub fn command(command: impl Into<String>) -> Self {
        Self::new(next_request_id(), PacketType::Command, command)
    }

    /// Login packet with a fresh random request id
    pub fn login(password: impl Into<String>) -> Self {
        Self::new(next_request_id(), PacketType::Login, password)
    }

    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn kind(&self) -> PacketType {
        self.kind
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Consume the packet, keeping only the payload text
    pub fn into_payload(self) -> String {
        self.payload
    }

    /// Number of body bytes [`Packet::encode`] will produce
    pub fn body_len(&self) -> usize {
        MIN_BODY_SIZE + self.payload.len()
    }

    /// Encode into a frame body (no length prefix).
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.body_len());
        self.write_body(&mut buf);
        buf
    }

    /// Reject packets whose body exceeds [`MAX_FRAME_SIZE`], the same bound
    /// applied to incoming frames.
    pub fn check_size(&self) -> Result<()> {
        let body_len = self.body_len();
        if body_len > MAX_FRAME_SIZE {
            return Err(RconError::OversizedFrame(body_len));
        }
        Ok(())
    }

    /// Encode into a complete length-prefixed frame, ready for the socket.
    ///
    /// The length prefix is only meaningful for bodies that pass
    /// [`Packet::check_size`]; the session checks before sending.
    pub fn to_frame(&self) -> Bytes {
        let body_len = self.body_len();
        let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + body_len);
        buf.put_u32_le(body_len as u32);
        self.write_body(&mut buf);
        buf.freeze()
    }

    #[inline]
    fn write_body(&self, buf: &mut BytesMut) {
        buf.put_u32_le(self.request_id);
        buf.put_u32_le(self.kind.as_u32());
        buf.put_slice(self.payload.as_bytes());
        buf.put_slice(&TERMINATOR);
    }

    /// Decode a frame body (length prefix already stripped).
    pub fn decode(body: &[u8]) -> Result<Self> {
        if body.len() < MIN_BODY_SIZE {
            return Err(RconError::InvalidFrame(constants::ERR_FRAME_TOO_SHORT));
        }

        let (content, tail) = body.split_at(body.len() - TERMINATOR.len());
        if tail != TERMINATOR {
            return Err(RconError::InvalidFrame(constants::ERR_BAD_TERMINATOR));
        }

        let request_id = u32::from_le_bytes([content[0], content[1], content[2], content[3]]);
        let kind = PacketType::try_from(u32::from_le_bytes([
            content[4], content[5], content[6], content[7],
        ]))?;

        let payload = std::str::from_utf8(&content[8..])
            .map_err(|_| RconError::InvalidFrame(constants::ERR_PAYLOAD_NOT_UTF8))?;

        Ok(Self::new(request_id, kind, payload))
    }
}

/// Pseudo-random correlation id. Used only to match responses to requests.
pub fn next_request_id() -> u32 {
    rand::random::<u32>()
}
