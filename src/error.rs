//! # Error Types
//!
//! Every failure the RCON client can report, from socket-level problems up to
//! protocol violations and login failures.
//!
//! ## Error Categories
//! - **Connection**: connect timeouts, refused connections, peer closes
//! - **Framing**: malformed or oversized frames
//! - **State**: operations attempted before `connect()` or `login()`
//! - **Correlation**: request id mismatches and the login-specific credential failure
//! - **Collaborator**: response text that does not match the expected shape
//!
//! Nothing here is retried internally. Every variant reaches the caller as-is.
//!
//! ## Example Usage
//! ```rust,no_run
//! use rcon_protocol::error::RconError;
//! use rcon_protocol::Session;
//!
//! # async fn demo() -> rcon_protocol::error::Result<()> {
//! let session = Session::new("127.0.0.1", 27020, "secret", None);
//! match session.run("listplayers", &[]).await {
//!     Err(RconError::NotConnected) => session.connect().await?,
//!     Err(e) => return Err(e),
//!     Ok(text) => println!("{text}"),
//! }
//! # Ok(())
//! # }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to keep error paths allocation-free.
pub mod constants {
    /// Frame validation
    pub const ERR_FRAME_TOO_SHORT: &str = "frame body shorter than id, type and terminator";
    pub const ERR_BAD_TERMINATOR: &str = "frame does not end with two zero bytes";
    pub const ERR_UNKNOWN_TYPE: &str = "unknown packet type";
    pub const ERR_PAYLOAD_NOT_UTF8: &str = "payload is not valid UTF-8";
    pub const ERR_LENGTH_TOO_SMALL: &str = "declared frame length below minimum";

    /// Collaborator parsing
    pub const ERR_PLAYER_LINE: &str = "Unable to parse online players from response";
}

/// Primary error type for every client operation.
#[derive(Error, Debug)]
pub enum RconError {
    #[error("Connection timed out")]
    ConnectTimedOut,

    #[error("Connection failed: {0}")]
    ConnectError(#[source] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid frame: {0}")]
    InvalidFrame(&'static str),

    #[error("Frame too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("Client is not connected to the host")]
    NotConnected,

    #[error("Connected to the RCON server but not logged in")]
    NotLoggedIn,

    #[error(
        "Sent packet ID [{sent}] does not match received packet ID [{received}]. \
         Are you sure you are logged in to the server?"
    )]
    RequestIdMismatch { sent: u32, received: u32 },

    #[error("Invalid RCON password")]
    InvalidCredentials,

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RconError {
    /// Whether the error means the underlying socket is no longer usable.
    pub fn is_connection_loss(&self) -> bool {
        matches!(self, RconError::ConnectionClosed | RconError::Io(_))
    }

    /// Classify a socket error raised after the connection was established.
    pub(crate) fn from_stream(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => RconError::ConnectionClosed,
            _ => RconError::Io(err),
        }
    }
}

/// Type alias for Results using RconError
pub type Result<T> = std::result::Result<T, RconError>;
