//! # RCON Protocol
//!
//! Async client core for the binary, length-prefixed remote console protocol
//! used to administer game servers over TCP.
//!
//! ## Layers
//! - [`core`]: packet encoding/decoding and stream framing (no I/O)
//! - [`transport`]: one TCP connection, whole frames in and out
//! - [`protocol`]: the session state machine (connect, login, run)
//! - [`commands`] / [`response`]: convenience commands and response parsers
//!   built on `run`
//!
//! ## Quick Start
//! ```rust,no_run
//! use rcon_protocol::commands::InfoCommands;
//! use rcon_protocol::config::ClientConfig;
//! use rcon_protocol::Session;
//!
//! # async fn demo() -> rcon_protocol::error::Result<()> {
//! let config = ClientConfig {
//!     host: "10.0.0.5".into(),
//!     password: "admin-password".into(),
//!     ..ClientConfig::default()
//! };
//!
//! let session = Session::open(&config).await?;
//! let players = session.online_players().await?;
//! println!("{} online", players.len());
//! session.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! One session is one socket with at most one request in flight. Concurrent
//! callers sharing a session are served in turn. Nothing is retried
//! automatically and the protocol is plaintext.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod response;
pub mod transport;
pub mod utils;

pub use crate::commands::{AdminCommands, ChatCommands, InfoCommands, Rcon};
pub use crate::core::packet::{Packet, PacketType};
pub use crate::error::{RconError, Result};
pub use crate::protocol::{ConnectionState, Session};
pub use crate::transport::Transport;
