//! # Server Commands
//!
//! Convenience wrappers over the one protocol operation, "send a command,
//! get the response text". Each capability is an extension trait with a
//! blanket implementation for every [`Rcon`] implementor, so a [`Session`]
//! (or any test double implementing `run`) gets all of them.
//!
//! ```rust,no_run
//! use rcon_protocol::commands::{AdminCommands, InfoCommands};
//! use rcon_protocol::Session;
//!
//! # async fn demo(session: Session) -> rcon_protocol::error::Result<()> {
//! session.broadcast("Restart in 5 minutes").await?;
//! session.save_world().await?;
//! for player in session.online_players().await? {
//!     println!("{} {}", player.id, player.name);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::protocol::session::Session;

pub mod admin;
pub mod chat;
pub mod info;

pub use admin::AdminCommands;
pub use chat::ChatCommands;
pub use info::InfoCommands;

/// Anything that can run an RCON command and return the response text.
#[async_trait]
pub trait Rcon: Send + Sync {
    async fn run(&self, command: &str, args: &[&str]) -> Result<String>;
}

#[async_trait]
impl<S> Rcon for Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn run(&self, command: &str, args: &[&str]) -> Result<String> {
        Session::run(self, command, args).await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records every command line and answers with a canned response.
    pub struct Recorder {
        pub response: String,
        pub sent: Mutex<Vec<String>>,
    }

    impl Recorder {
        pub fn answering(response: &str) -> Self {
            Self {
                response: response.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }

        #[allow(clippy::unwrap_used)]
        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Rcon for Recorder {
        #[allow(clippy::unwrap_used)]
        async fn run(&self, command: &str, args: &[&str]) -> Result<String> {
            let mut line = command.to_string();
            for arg in args {
                line.push(' ');
                line.push_str(arg);
            }
            self.sent.lock().unwrap().push(line);
            Ok(self.response.clone())
        }
    }
}
