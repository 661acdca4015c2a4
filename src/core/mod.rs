//! # Core Protocol Components
//!
//! Packet encoding/decoding and stream framing. Nothing in here performs I/O.
//!
//! ## Components
//! - **Packet**: immutable packet value with its wire conversions
//! - **Codec**: tokio codec that cuts a byte stream into frame bodies
//!
//! ## Wire Format
//! ```text
//! [Length(4)] [RequestId(4)] [Type(4)] [Payload(N)] [0x00 0x00]
//! ```
//! All integers are little-endian. `Length` counts every byte after itself.
//!
//! ## Limits
//! - Declared lengths above `MAX_FRAME_SIZE` are rejected before allocating
//! - Bodies shorter than 10 bytes are rejected as invalid frames

pub mod codec;
pub mod packet;
