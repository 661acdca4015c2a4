//! # Transport Layer
//!
//! Byte-exact frame I/O over TCP. See [`tcp::Transport`].

pub mod tcp;

pub use tcp::Transport;
