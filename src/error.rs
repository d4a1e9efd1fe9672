//! Error taxonomy
//!
//! Deliberately narrow: everything else (double start, input while idle,
//! resolving a resolved drop) is a silent no-op.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Difficulty name outside {easy, medium, hard}
    UnknownDifficulty(String),
    /// Field or bucket dimensions that cannot host a round
    InvalidGeometry { width: f32, height: f32, reason: &'static str },
    /// Malformed configuration document
    Config(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDifficulty(name) => write!(f, "unknown difficulty: {name:?}"),
            Self::InvalidGeometry {
                width,
                height,
                reason,
            } => write!(f, "invalid geometry {width}x{height}: {reason}"),
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
