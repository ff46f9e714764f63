//! High score leaderboard
//!
//! Persisted through a `Storage` backend, keeps the top 20 scores. Equal
//! scores keep insertion order: the earlier entry ranks higher.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence::Storage;

/// Initials used when the player gives none
pub const DEFAULT_INITIALS: &str = "YOU";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player initials (3 uppercase characters)
    pub initials: String,
    /// Score achieved
    pub score: u64,
    /// RFC 3339 timestamp of the run
    pub date: String,
}

impl HighScoreEntry {
    pub fn new(initials: &str, score: u64, date: impl Into<String>) -> Self {
        Self {
            initials: normalize_initials(initials),
            score,
            date: date.into(),
        }
    }
}

/// Trim, uppercase and cut to 3 characters; blank input becomes `YOU`
pub fn normalize_initials(raw: &str) -> String {
    let initials: String = raw
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .take(3)
        .collect();
    if initials.is_empty() {
        DEFAULT_INITIALS.to_string()
    } else {
        initials
    }
}

/// Current time as an RFC 3339 string
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Ranked list of high scores
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, restoring rank order and capacity
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        // Stable: equal scores keep their stored order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry behind all entries with an equal or higher score.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let index = pos.unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Read/write access to the persisted leaderboard
pub trait ScoreStore {
    /// Entries sorted descending by score; empty if missing or unreadable
    fn get_scores(&self) -> Vec<HighScoreEntry>;
    /// Add an entry and persist the top 20
    fn save_score(&mut self, entry: HighScoreEntry);
}

/// Leaderboard persisted as JSON under a storage key
#[derive(Debug)]
pub struct HighScoreStore<S: Storage> {
    storage: S,
}

impl<S: Storage> HighScoreStore<S> {
    pub const STORAGE_KEY: &'static str = "circus_high_scores";

    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the leaderboard, treating anything unreadable as empty
    pub fn load(&self) -> HighScores {
        let raw = match self.storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HighScores::new(),
            Err(e) => {
                log::warn!("could not read high scores: {e}");
                return HighScores::new();
            }
        };
        match serde_json::from_str::<Vec<HighScoreEntry>>(&raw) {
            Ok(entries) => {
                log::debug!("loaded {} high scores", entries.len());
                HighScores::from_entries(entries)
            }
            Err(e) => {
                log::warn!("discarding corrupt high scores: {e}");
                HighScores::new()
            }
        }
    }

    fn persist(&self, scores: &HighScores) {
        match serde_json::to_string(scores) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(Self::STORAGE_KEY, &json) {
                    log::warn!("could not save high scores: {e}");
                } else {
                    log::info!("high scores saved ({} entries)", scores.len());
                }
            }
            Err(e) => log::warn!("could not encode high scores: {e}"),
        }
    }
}

impl<S: Storage> ScoreStore for HighScoreStore<S> {
    fn get_scores(&self) -> Vec<HighScoreEntry> {
        self.load().entries
    }

    fn save_score(&mut self, entry: HighScoreEntry) {
        let mut scores = self.load();
        match scores.add(entry) {
            Some(rank) => log::info!("new high score at rank {rank}"),
            None => log::debug!("score did not make the leaderboard"),
        }
        self.persist(&scores);
    }
}
