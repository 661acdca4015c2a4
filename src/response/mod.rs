//! # Response Parsing
//!
//! Turns the text of specific command responses into typed values. The
//! formats are defined by the game server; the protocol core only delivers
//! the raw payload.

pub mod log_line;
pub mod player;

pub use log_line::LogLine;
pub use player::Player;

/// Payload the server sends for a command that produced no output
pub const NO_RESPONSE: &str = "Server received, But no response!! \n ";

/// Payload of `listplayers` when nobody is online
pub const NO_PLAYERS: &str = "No Players Connected";
