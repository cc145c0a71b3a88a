//! Leaderboard and best score
//!
//! The leaderboard keeps one entry per player (names compared case
//! insensitively) holding that player's best result. The best score is a
//! separate scalar: the highest score value ever seen in any session,
//! regardless of who played it.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, load_json, save_json};

/// A player's best result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i64,
}

/// Per-player best scores, in insertion order
///
/// Serialized as a plain `[{ "name": .., "score": .. }]` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished session
    ///
    /// An existing entry for the same name (any case) only changes when the
    /// new score is strictly higher; its stored spelling is kept.
    /// Returns true if the leaderboard changed.
    pub fn record_result(&mut self, name: &str, score: i64) -> bool {
        let key = name.to_lowercase();
        match self
            .entries
            .iter_mut()
            .find(|e| e.name.to_lowercase() == key)
        {
            Some(entry) if score > entry.score => {
                entry.score = score;
                true
            }
            Some(_) => false,
            None => {
                self.entries.push(LeaderboardEntry {
                    name: name.to_string(),
                    score,
                });
                true
            }
        }
    }

    /// Entries by score, highest first; ties keep insertion order
    pub fn ranked_view(&self) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<_> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Best score recorded for `name` (any case)
    pub fn best_for(&self, name: &str) -> Option<i64> {
        let key = name.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name.to_lowercase() == key)
            .map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load from storage; absent or corrupt data gives an empty board
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<Leaderboard>(storage, Self::STORAGE_KEY) {
            Some(board) => {
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            None => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        save_json(storage, Self::STORAGE_KEY, self);
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
    }
}

/// Highest score value ever observed, across all players
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScore(pub i64);

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    /// Track a score; returns true if it is a new best
    ///
    /// Starts at 0, so negative scores never register.
    pub fn observe(&mut self, score: i64) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }

    pub fn load(storage: &dyn Storage) -> Self {
        load_json(storage, Self::STORAGE_KEY).unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        save_json(storage, Self::STORAGE_KEY, self);
    }
}
