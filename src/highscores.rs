//! Score sink and high score leaderboard
//!
//! The loop projects the session score out through [`ScoreSink`]. The
//! leaderboard keeps the top 10 final scores in memory; the embedder may
//! persist it as JSON.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Receives read-only projections of the session score
pub trait ScoreSink {
    /// Called whenever the live score changes (including the reset to 0)
    fn score_changed(&mut self, score: u64);
    /// Called once when a run ends
    fn game_over(&mut self, final_score: u64, wave: u32);
}

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Wave reached (1-based)
    pub wave: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Live score of the current run
    #[serde(skip)]
    pub current: u64,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, wave: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, wave };

        // Sorted descending; ties keep the earlier run ahead
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        serde_json::to_string(self).map_err(|e| SimError::invariant(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let mut scores: HighScores = serde_json::from_str(json)
            .map_err(|e| SimError::invalid_config("highscores", e.to_string()))?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }
}

impl ScoreSink for HighScores {
    fn score_changed(&mut self, score: u64) {
        self.current = score;
    }

    fn game_over(&mut self, final_score: u64, wave: u32) {
        self.current = final_score;
        if let Some(rank) = self.add_score(final_score, wave) {
            log::info!("New high score #{}: {} (wave {})", rank, final_score, wave);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_add_score_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(100, 1), Some(1));
        assert_eq!(scores.add_score(300, 2), Some(1));
        assert_eq!(scores.add_score(200, 1), Some(2));
        let ordered: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=15 {
            scores.add_score(i * 10, 1);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(50));
        assert!(scores.qualifies(1000));
    }

    #[test]
    fn test_sink_records_final_score() {
        let mut scores = HighScores::new();
        scores.score_changed(40);
        assert_eq!(scores.current, 40);
        scores.game_over(40, 3);
        assert_eq!(scores.entries, vec![HighScoreEntry { score: 40, wave: 3 }]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut scores = HighScores::new();
        scores.add_score(120, 2);
        let json = scores.to_json().unwrap();
        let loaded = HighScores::from_json(&json).unwrap();
        assert_eq!(loaded.entries, scores.entries);
    }
}
