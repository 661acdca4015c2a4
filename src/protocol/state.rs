//! Connection state of a [`crate::Session`].

use std::fmt;

/// Where a session is in its connect/login lifecycle.
///
/// ```text
/// Disconnected --connect()--> Connected --login()--> LoggedIn
///       ^                         |                     |
///       +------ close() / connection loss --------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ConnectionState {
    #[default]
    Disconnected = 0,
    Connected = 1,
    LoggedIn = 2,
}

impl ConnectionState {
    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connected,
            2 => ConnectionState::LoggedIn,
            _ => ConnectionState::Disconnected,
        }
    }

    /// Whether a socket is open (logged in or not)
    pub fn is_connected(self) -> bool {
        !matches!(self, ConnectionState::Disconnected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::LoggedIn => "logged-in",
        };
        f.write_str(name)
    }
}
