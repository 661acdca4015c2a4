//! # RCON Session Protocol
//!
//! The request/response state machine that sits on top of the transport:
//! connect, log in, then exchange command packets one at a time.

pub mod session;
pub mod state;

pub use session::Session;
pub use state::ConnectionState;
