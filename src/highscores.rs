//! Shooter leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

use crate::storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Entries sorted by descending score; ties keep the earlier run first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "webgl_demos_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record a finished run. Returns the 1-based rank, or `None` if the
    /// score did not make the board.
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let index = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        match storage::load_json::<Self>(Self::STORAGE_KEY) {
            Some(mut scores) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
        log::info!("High scores saved ({} entries)", self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.is_empty());
    }

    #[test]
    fn test_ranks_are_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 2, 1.0), Some(1));
        assert_eq!(scores.add_score(120, 3, 2.0), Some(1));
        assert_eq!(scores.add_score(80, 2, 3.0), Some(2));
        assert_eq!(scores.top_score(), Some(120));

        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![120, 80, 50]);
        assert_eq!(scores.entries[0].level, 3);
    }

    #[test]
    fn test_tie_goes_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score(100, 2, 1.0);
        assert_eq!(scores.add_score(100, 2, 2.0), Some(2));
        assert_eq!(scores.entries[0].timestamp, 1.0);
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, 1, i as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);

        // Lower than the last entry: rejected
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 1, 99.0), None);

        // Beats the last entry: inserted, lowest dropped
        assert_eq!(scores.add_score(15, 1, 99.0), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_json_shape() {
        let mut scores = HighScores::new();
        scores.add_score(30, 1, 1700000000000.0);
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.contains("\"level\":1"));
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scores);
    }
}
