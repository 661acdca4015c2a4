//! Length-prefixed frame codec for tokio streams.
//!
//! The decoder accumulates bytes until a complete frame body is buffered, so a
//! frame split across any number of socket reads still comes out whole. It has
//! no knowledge of packet contents; [`crate::core::packet::Packet::decode`]
//! interprets the body.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::config::MAX_FRAME_SIZE;
use crate::core::packet::{LENGTH_PREFIX_SIZE, MIN_BODY_SIZE};
use crate::error::{constants, RconError};

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCodec;

impl Decoder for FrameCodec {
    type Item = BytesMut;
    type Error = RconError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < LENGTH_PREFIX_SIZE {
            src.reserve(LENGTH_PREFIX_SIZE - src.len());
            return Ok(None);
        }

        let body_len = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;

        if body_len < MIN_BODY_SIZE {
            return Err(RconError::InvalidFrame(constants::ERR_LENGTH_TOO_SMALL));
        }
        if body_len > MAX_FRAME_SIZE {
            return Err(RconError::OversizedFrame(body_len));
        }

        let frame_len = LENGTH_PREFIX_SIZE + body_len;
        if src.len() < frame_len {
            // Wait for the rest of the body
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(LENGTH_PREFIX_SIZE);
        Ok(Some(src.split_to(body_len)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(body) => Ok(Some(body)),
            None if src.is_empty() => Ok(None),
            // Peer hung up part way through a frame
            None => Err(RconError::ConnectionClosed),
        }
    }
}

/// Frames are length-prefixed by the caller; the encoder writes them verbatim.
impl Encoder<Bytes> for FrameCodec {
    type Error = RconError;

    fn encode(&mut self, frame: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&frame);
        Ok(())
    }
}
