//! In-game chat.

use async_trait::async_trait;

use crate::commands::Rcon;
use crate::error::Result;

#[async_trait]
pub trait ChatCommands: Rcon {
    /// Post to server chat (`serverchat [<name>: ]<message>`). A non-empty
    /// `username` is shown as the sender.
    async fn chat(&self, username: Option<&str>, message: &str) -> Result<()> {
        let text = match username {
            Some(name) if !name.is_empty() => format!("{name}: {message}"),
            _ => message.to_string(),
        };
        self.run("serverchat", &[text.as_str()]).await.map(drop)
    }
}

impl<T: Rcon + ?Sized> ChatCommands for T {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::commands::mock::Recorder;

    #[tokio::test]
    async fn prefixes_username_when_given() {
        let rcon = Recorder::answering("");
        rcon.chat(Some("Admin"), "hello").await.unwrap();
        rcon.chat(None, "anonymous").await.unwrap();
        rcon.chat(Some(""), "blank name").await.unwrap();
        assert_eq!(
            rcon.sent(),
            vec![
                "serverchat Admin: hello",
                "serverchat anonymous",
                "serverchat blank name"
            ]
        );
    }
}
