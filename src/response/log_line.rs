//! Timestamped server log lines, as returned by `getgamelog`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::response::NO_RESPONSE;

#[allow(clippy::expect_used)]
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}\.\d{2}\.\d{2}_\d{2}\.\d{2}\.\d{2}): (.*?)\r?\n").expect("static pattern")
});

/// One `YYYY.MM.DD_HH.MM.SS: <message>` line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogLine {
    /// Timestamp exactly as the server printed it
    pub time: String,
    pub message: String,
}

impl LogLine {
    /// Extract every complete log line from a response. Text that does not
    /// match the line format is ignored.
    pub fn parse_all(text: &str) -> Vec<Self> {
        if text == NO_RESPONSE {
            return Vec::new();
        }

        LINE_PATTERN
            .captures_iter(text)
            .map(|caps| Self {
                time: caps[1].to_string(),
                message: caps[2].to_string(),
            })
            .collect()
    }
}
