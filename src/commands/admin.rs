//! Server administration commands.

use async_trait::async_trait;

use crate::commands::Rcon;
use crate::error::Result;

#[async_trait]
pub trait AdminCommands: Rcon {
    /// Trigger a world save (`saveworld`).
    async fn save_world(&self) -> Result<()> {
        self.run("saveworld", &[]).await.map(drop)
    }

    /// Show a message to every player (`broadcast <message>`).
    async fn broadcast(&self, message: &str) -> Result<()> {
        self.run("broadcast", &[message]).await.map(drop)
    }
}

impl<T: Rcon + ?Sized> AdminCommands for T {}
