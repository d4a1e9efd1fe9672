//! Difficulty presets
//!
//! Fixed table of named profiles; a round always runs under exactly one.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The preset bundle for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                difficulty: Difficulty::Easy,
                time_limit_secs: 40,
                score_goal: 50,
                spawn_interval_ms: 1200,
                fall_duration_min_secs: 3.0,
                fall_duration_max_secs: 4.0,
                dirty_probability: 0.2,
            },
            Difficulty::Medium => DifficultyProfile {
                difficulty: Difficulty::Medium,
                time_limit_secs: 30,
                score_goal: 40,
                spawn_interval_ms: 1000,
                fall_duration_min_secs: 2.5,
                fall_duration_max_secs: 3.5,
                dirty_probability: 0.3,
            },
            Difficulty::Hard => DifficultyProfile {
                difficulty: Difficulty::Hard,
                time_limit_secs: 25,
                score_goal: 45,
                spawn_interval_ms: 700,
                fall_duration_min_secs: 1.5,
                fall_duration_max_secs: 2.5,
                dirty_probability: 0.4,
            },
        }
    }
}

/// Immutable parameters of one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Round length
    pub time_limit_secs: u32,
    /// Score needed at expiry to win
    pub score_goal: u32,
    /// Time between spawns
    pub spawn_interval_ms: u32,
    /// Fall duration is drawn uniformly from [min, max]
    pub fall_duration_min_secs: f32,
    pub fall_duration_max_secs: f32,
    /// Chance a spawned drop is dirty
    pub dirty_probability: f32,
}

impl DifficultyProfile {
    pub fn name(&self) -> &'static str {
        self.difficulty.as_str()
    }
}

/// Look up a profile by name
pub fn profile_for(name: &str) -> Result<DifficultyProfile, GameError> {
    Difficulty::from_str(name)
        .map(|d| d.profile())
        .ok_or_else(|| GameError::UnknownDifficulty(name.to_string()))
}
