//! Game-over milestones reported to the achievement collaborator

use serde::{Deserialize, Serialize};

/// Achievements unlocked by a run's final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Milestone {
    /// Finished a run without destroying anything
    WorstPlayer,
    /// Destroyed at least one asteroid
    FirstHit,
    /// Destroyed at least 20 asteroids
    Asteroid20,
    /// Destroyed at least 50 asteroids
    Asteroid50,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::WorstPlayer,
        Milestone::FirstHit,
        Milestone::Asteroid20,
        Milestone::Asteroid50,
    ];

    /// Whether a final score earns this milestone
    pub fn reached_by(self, score: u32) -> bool {
        match self {
            Milestone::WorstPlayer => score == 0,
            Milestone::FirstHit => score >= 1,
            Milestone::Asteroid20 => score >= 20,
            Milestone::Asteroid50 => score >= 50,
        }
    }

    /// Stable identifier for platform achievement services
    pub fn as_str(self) -> &'static str {
        match self {
            Milestone::WorstPlayer => "worst_player",
            Milestone::FirstHit => "first_hit",
            Milestone::Asteroid20 => "asteroid_20",
            Milestone::Asteroid50 => "asteroid_50",
        }
    }
}

/// Every milestone a final score earns, in declaration order
pub fn milestones_for(score: u32) -> Vec<Milestone> {
    Milestone::ALL
        .into_iter()
        .filter(|m| m.reached_by(score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score() {
        assert_eq!(milestones_for(0), vec![Milestone::WorstPlayer]);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(milestones_for(1), vec![Milestone::FirstHit]);
        assert_eq!(milestones_for(19), vec![Milestone::FirstHit]);
        assert_eq!(
            milestones_for(20),
            vec![Milestone::FirstHit, Milestone::Asteroid20]
        );
        assert_eq!(
            milestones_for(50),
            vec![
                Milestone::FirstHit,
                Milestone::Asteroid20,
                Milestone::Asteroid50
            ]
        );
    }
}
