use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Author role of a chat message.
///
/// Only `user` and `agent` carry meaning for the metrics; any other value
/// deserializes to `Other` and only counts toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    User,
    Agent,
    #[serde(other)]
    Other,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::User => "user",
            Direction::Agent => "agent",
            Direction::Other => "other",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message exactly as it arrives in the input payload.
///
/// `timestamp` stays an untyped JSON value: ISO-8601 strings and Unix epoch
/// numbers are both accepted later by the normalizer, everything else
/// becomes a missing instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub direction: Direction,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub timestamp: Value,
}

impl RawMessage {
    pub fn new(direction: Direction, text: impl Into<String>, timestamp: impl Into<Value>) -> Self {
        Self {
            direction,
            text: Some(text.into()),
            timestamp: timestamp.into(),
        }
    }

    /// Message body, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn has_text(&self) -> bool {
        !self.text().is_empty()
    }
}
