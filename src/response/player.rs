//! Online player roster as reported by `listplayers`.
//!
//! ```text
//! 0. Alice, 76561198000000001
//! 1. Bob the Builder, 76561198000000002
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{constants, RconError, Result};
use crate::response::NO_PLAYERS;

#[allow(clippy::expect_used)]
static LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.+?),\s+(\d+)").expect("static pattern"));

/// One online player
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    /// Position in the server's roster
    pub id: u32,
    pub name: String,
    /// Platform account id
    pub unique_id: String,
}

impl Player {
    /// Parse one roster line.
    pub fn from_line(line: &str) -> Result<Self> {
        let line = line.trim();
        let unparsable = || {
            RconError::UnexpectedResponse(format!("{}: {line:?}", constants::ERR_PLAYER_LINE))
        };

        let caps = LINE_PATTERN.captures(line).ok_or_else(unparsable)?;
        let id = caps[1].parse::<u32>().map_err(|_| unparsable())?;

        Ok(Self {
            id,
            name: caps[2].to_string(),
            unique_id: caps[3].to_string(),
        })
    }

    /// Parse a full `listplayers` response. Blank lines are skipped and the
    /// "no players" sentinel yields an empty roster.
    pub fn parse_roster(text: &str) -> Result<Vec<Self>> {
        if text.trim() == NO_PLAYERS {
            return Ok(Vec::new());
        }

        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::from_line)
            .collect()
    }
}
