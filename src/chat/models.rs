//! The core models for the persisted chat transcript.
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamps are stored as preformatted strings so the on-disk layout
/// stays stable regardless of locale or chrono version.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of most-recent turns kept in a session's history.
pub const MAX_HISTORY: usize = 50;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl Role {
    /// Label used when rendering the transcript.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "👤 **User:**",
            Role::Assistant => "🤖 **AI:**",
        }
    }
}

/// One message in the transcript. Stored on disk as a three element
/// array `[role, text, timestamp]`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(from = "TurnRecord", into = "TurnRecord")]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: String,
}

// Tuple structs serialize as JSON arrays which matches the persisted
// `[role, text, timestamp]` layout.
#[derive(Serialize, Deserialize)]
struct TurnRecord(Role, String, String);

impl From<TurnRecord> for ChatTurn {
    fn from(record: TurnRecord) -> Self {
        Self {
            role: record.0,
            text: record.1,
            timestamp: record.2,
        }
    }
}

impl From<ChatTurn> for TurnRecord {
    fn from(turn: ChatTurn) -> Self {
        Self(turn.role, turn.text, turn.timestamp)
    }
}

impl ChatTurn {
    pub fn new(role: Role, text: &str, timestamp: &str) -> Self {
        Self {
            role,
            text: text.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// Create a turn stamped with the current local time.
    pub fn now(role: Role, text: &str) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::new(role, text, &timestamp)
    }
}

/// Ordered transcript of turns, insertion order is chronological order.
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq)]
#[serde(transparent)]
pub struct ChatHistory(Vec<ChatTurn>);

impl ChatHistory {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_turns(turns: Vec<ChatTurn>) -> Self {
        Self(turns)
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.0.push(turn)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    /// Drop the oldest turns until only the retention window remains.
    pub fn truncate_to_recent(&mut self) {
        let excess = self.0.len().saturating_sub(MAX_HISTORY);
        if excess > 0 {
            self.0.drain(..excess);
        }
    }
}
