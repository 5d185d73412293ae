//! Local leaderboard
//!
//! In-memory stand-in for a platform leaderboard service: keeps the top 10
//! scores of this process and the milestones unlocked so far. Nothing is
//! written to disk.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::achievements::Milestone;
use crate::sim::AchievementReporter;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Asteroids destroyed
    pub score: u32,
    /// Which run of the process produced it (1-based)
    pub run: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    pub unlocked: BTreeSet<Milestone>,
    runs: u32,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Returns the rank achieved, if it placed.
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        self.runs += 1;
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            run: self.runs,
        };

        // Sorted descending; ties keep the earlier run first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
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

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Runs recorded so far, including ones that did not place
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn is_unlocked(&self, milestone: Milestone) -> bool {
        self.unlocked.contains(&milestone)
    }
}

impl AchievementReporter for HighScores {
    fn on_game_over(&mut self, final_score: u32) {
        if let Some(rank) = self.add_score(final_score) {
            log::info!("New high score #{}: {}", rank, final_score);
        }
    }

    fn on_milestone(&mut self, milestone: Milestone) {
        if self.unlocked.insert(milestone) {
            log::info!("Achievement unlocked: {}", milestone.as_str());
        }
    }
}

/// Shared handle so the host can read the board while the session reports to it
impl AchievementReporter for std::rc::Rc<std::cell::RefCell<HighScores>> {
    fn on_game_over(&mut self, final_score: u32) {
        self.borrow_mut().on_game_over(final_score);
    }

    fn on_milestone(&mut self, milestone: Milestone) {
        self.borrow_mut().on_milestone(milestone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add_score(0), None);
        assert_eq!(scores.runs(), 1);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5), Some(1));
        assert_eq!(scores.add_score(12), Some(1));
        assert_eq!(scores.add_score(7), Some(2));
        let ordered: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![12, 7, 5]);
        assert_eq!(scores.top_score(), Some(12));
        assert_eq!(scores.entries[0].run, 2);
    }

    #[test]
    fn test_full_board_requires_beating_lowest() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(s * 10);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(11), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.add_score(1000), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_reporter_records_runs_and_milestones() {
        let mut scores = HighScores::new();
        scores.on_game_over(3);
        scores.on_milestone(Milestone::FirstHit);
        scores.on_milestone(Milestone::FirstHit);
        assert_eq!(scores.top_score(), Some(3));
        assert!(scores.is_unlocked(Milestone::FirstHit));
        assert!(!scores.is_unlocked(Milestone::Asteroid20));
        assert_eq!(scores.unlocked.len(), 1);
    }
}
