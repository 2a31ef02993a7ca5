//! File-backed storage for the chat transcript.
//!
//! The store is a stateless gateway to a single JSON file holding an
//! array of `[role, text, timestamp]` entries. There is no locking:
//! concurrent writers race and the last save wins.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::models::ChatHistory;

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted transcript. A missing file or malformed
    /// content yields an empty history rather than an error.
    pub fn load(&self) -> ChatHistory {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::debug!("No readable history at {}: {}", self.path.display(), err);
                return ChatHistory::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(history) => history,
            Err(err) => {
                tracing::debug!("Discarding malformed history at {}: {}", self.path.display(), err);
                ChatHistory::new()
            }
        }
    }

    /// Serialize the full transcript, overwriting the file. Failures
    /// propagate and abort the current interaction.
    pub fn save(&self, history: &ChatHistory) -> Result<()> {
        let contents = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Persist an empty transcript.
    pub fn clear(&self) -> Result<()> {
        self.save(&ChatHistory::new())
    }
}
