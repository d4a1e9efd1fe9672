//! Game configuration
//!
//! Field geometry plus the tunables that are not part of a difficulty
//! profile. Every field has a default, so a host can supply a partial JSON
//! document.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::profile::Difficulty;

/// Play field dimensions as measured by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGeometry {
    pub width: f32,
    pub height: f32,
    pub bucket_width: f32,
    pub bucket_height: f32,
    /// Gap between the bucket's bottom edge and the field's bottom edge
    pub bucket_bottom_offset: f32,
    pub entity_width: f32,
    pub entity_height: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            bucket_width: 100.0,
            bucket_height: 60.0,
            bucket_bottom_offset: 10.0,
            entity_width: DROP_SIZE,
            entity_height: DROP_SIZE,
        }
    }
}

impl FieldGeometry {
    /// Y coordinate of the bucket's top edge
    #[inline]
    pub fn bucket_top(&self) -> f32 {
        self.height - self.bucket_bottom_offset - self.bucket_height
    }

    /// Rightmost legal bucket offset
    #[inline]
    pub fn max_bucket_x(&self) -> f32 {
        (self.width - self.bucket_width).max(0.0)
    }

    /// Rightmost legal drop offset
    #[inline]
    pub fn max_entity_x(&self) -> f32 {
        (self.width - self.entity_width).max(0.0)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason| GameError::InvalidGeometry {
            width: self.width,
            height: self.height,
            reason,
        };

        let dims = [
            self.width,
            self.height,
            self.bucket_width,
            self.bucket_height,
            self.entity_width,
            self.entity_height,
        ];
        // NaN fails this check too
        if !dims.iter().all(|d| *d > 0.0) {
            return Err(invalid("dimensions must be positive"));
        }
        if self.bucket_bottom_offset < 0.0 {
            return Err(invalid("bucket offset must not be negative"));
        }
        if self.bucket_width > self.width {
            return Err(invalid("bucket wider than field"));
        }
        if self.entity_width > self.width {
            return Err(invalid("drop wider than field"));
        }
        if self.bucket_top() < 0.0 {
            return Err(invalid("bucket does not fit vertically"));
        }
        Ok(())
    }
}

/// How often drops are tested against the bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionCadence {
    /// Poll at a fixed period, decoupled from the animation step. Fast drops
    /// can pass the catch band between two polls.
    Sampled { every_ms: u32 },
    /// Test after every motion step
    EveryTick,
}

impl Default for CollisionCadence {
    fn default() -> Self {
        CollisionCadence::Sampled {
            every_ms: COLLISION_POLL_MS,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub geometry: FieldGeometry,
    /// Difficulty selected when the session is created
    pub difficulty: Difficulty,
    pub collision: CollisionCadence,
    /// Seconds between a round ending and the automatic reset
    pub auto_reset_secs: u32,
    /// Confetti pieces launched on a win (0 disables the effect)
    pub confetti_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            geometry: FieldGeometry::default(),
            difficulty: Difficulty::default(),
            collision: CollisionCadence::default(),
            auto_reset_secs: AUTO_RESET_SECS,
            confetti_count: CONFETTI_COUNT,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.geometry.validate()?;
        if let CollisionCadence::Sampled { every_ms: 0 } = self.collision {
            return Err(GameError::Config("collision poll period must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_valid() {
        assert!(FieldGeometry::default().validate().is_ok());
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_geometry() {
        let zero = FieldGeometry {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(GameError::InvalidGeometry { .. })));

        let narrow = FieldGeometry {
            width: 50.0,
            ..Default::default()
        };
        assert!(narrow.validate().is_err());

        let short = FieldGeometry {
            height: 40.0,
            ..Default::default()
        };
        assert!(short.validate().is_err());

        let nan = FieldGeometry {
            height: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_bucket_top() {
        let geo = FieldGeometry::default();
        assert_eq!(geo.bucket_top(), 430.0);
        assert_eq!(geo.max_bucket_x(), 700.0);
        assert_eq!(geo.max_entity_x(), 770.0);
    }

    #[test]
    fn test_partial_json() {
        let config = GameConfig::from_json(
            r#"{ "difficulty": "hard", "geometry": { "width": 640.0 }, "collision": "every_tick" }"#,
        )
        .unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.geometry.width, 640.0);
        assert_eq!(config.geometry.height, 500.0);
        assert_eq!(config.collision, CollisionCadence::EveryTick);
        assert_eq!(config.auto_reset_secs, AUTO_RESET_SECS);
    }

    #[test]
    fn test_sampled_cadence_json() {
        let config =
            GameConfig::from_json(r#"{ "collision": { "sampled": { "every_ms": 20 } } }"#).unwrap();
        assert_eq!(config.collision, CollisionCadence::Sampled { every_ms: 20 });
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(GameError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "geometry": { "width": -1.0 } }"#),
            Err(GameError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "difficulty": "nightmare" }"#),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
