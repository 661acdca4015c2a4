//! Server information queries.

use async_trait::async_trait;

use crate::commands::Rcon;
use crate::error::Result;
use crate::response::{LogLine, Player};

#[async_trait]
pub trait InfoCommands: Rcon {
    /// Players currently online (`listplayers`).
    async fn online_players(&self) -> Result<Vec<Player>> {
        let text = self.run("listplayers", &[]).await?;
        Player::parse_roster(&text)
    }

    /// Game log lines buffered since the last call (`getgamelog`).
    async fn game_log(&self) -> Result<Vec<LogLine>> {
        let text = self.run("getgamelog", &[]).await?;
        Ok(LogLine::parse_all(&text))
    }
}

impl<T: Rcon + ?Sized> InfoCommands for T {}
