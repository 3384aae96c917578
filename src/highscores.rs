//! Ranked high-score table with JSON persistence.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::MAX_HIGH_SCORES;
use crate::storage::{read_json, write_json_atomic};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    /// Unix seconds.
    pub timestamp: u64,
    pub game_mode: String,
}

impl Default for HighScoreEntry {
    fn default() -> Self {
        HighScoreEntry {
            name: "AAA".to_string(),
            score: 0,
            level: 1,
            timestamp: 0,
            game_mode: "normal".to_string(),
        }
    }
}

/// Top scores, highest first. Equal scores keep insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
    capacity: usize,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HIGH_SCORES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HighScoreTable {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn from_entries(mut entries: Vec<HighScoreEntry>, capacity: usize) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        HighScoreTable { entries, capacity }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would earn a place in the table.
    pub fn is_high_score(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= self.capacity => score > lowest.score,
            _ => true,
        }
    }

    /// Insert and return the 1-based rank, or 0 when the entry fell off the end.
    pub fn add(&mut self, name: &str, score: u32, level: u32, game_mode: &str) -> usize {
        self.add_entry(HighScoreEntry {
            name: name.to_string(),
            score,
            level,
            timestamp: now_unix(),
            game_mode: game_mode.to_string(),
        })
    }

    pub fn add_entry(&mut self, entry: HighScoreEntry) -> usize {
        // Entries with an equal score stay ahead of the newcomer.
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        if rank >= self.capacity {
            return 0;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(self.capacity);
        rank + 1
    }

    pub fn top_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

// ── Persistence ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or corrupt files load as an empty table.
    pub fn load(&self) -> HighScoreTable {
        let entries = read_json::<Vec<HighScoreEntry>>(&self.path).unwrap_or_default();
        HighScoreTable::from_entries(entries, MAX_HIGH_SCORES)
    }

    pub fn save(&self, table: &HighScoreTable) {
        match write_json_atomic(&self.path, table.entries()) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), entries = table.len(), "high scores saved")
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not save high scores")
            }
        }
    }
}
