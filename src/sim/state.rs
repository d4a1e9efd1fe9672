//! Session state and core simulation types
//!
//! Everything the round mutates lives in `SessionState`; the session owns it
//! exclusively and no drop outlives the session that spawned it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::FieldGeometry;
use crate::consts::*;
use crate::profile::DifficultyProfile;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    Idle,
    /// Timer running, drops falling
    Running,
    /// Timer expired with score >= goal
    Won,
    /// Timer expired short of the goal
    Lost,
}

impl GamePhase {
    pub fn is_ended(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// How a drop left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Landed in the bucket
    Caught,
    /// Fell past the bottom edge
    Missed,
}

/// A drop falling through the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    /// Top-left corner; x is fixed at spawn
    pub pos: Vec2,
    pub clean: bool,
    pub fall_duration_secs: f32,
    /// Pixels per tick, fixed for the drop's lifetime
    pub speed: f32,
    /// Set exactly once, when the drop is caught or missed
    resolved: bool,
}

impl FallingEntity {
    pub fn new(id: u32, x: f32, clean: bool, fall_duration_secs: f32, field_height: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, 0.0),
            clean,
            fall_duration_secs,
            speed: field_height / (fall_duration_secs * TICK_RATE as f32),
            resolved: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Mark the drop resolved. Returns false if it already was.
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }

    /// Score change for a catch
    pub fn catch_delta(&self) -> i32 {
        if self.clean { CLEAN_REWARD } else { -DIRTY_PENALTY }
    }

    /// Horizontal center given the drop width
    #[inline]
    pub fn center_x(&self, width: f32) -> f32 {
        self.pos.x + width / 2.0
    }

    #[inline]
    pub fn bottom(&self, height: f32) -> f32 {
        self.pos.y + height
    }
}

/// The player's bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Left edge offset from the field's left edge
    pub x: f32,
    pub width: f32,
}

impl Bucket {
    /// A bucket centered in the field
    pub fn centered(geometry: &FieldGeometry) -> Self {
        let mut bucket = Self {
            x: 0.0,
            width: geometry.bucket_width,
        };
        bucket.center(geometry);
        bucket
    }

    pub fn center(&mut self, geometry: &FieldGeometry) {
        self.width = geometry.bucket_width;
        self.x = geometry.width / 2.0 - self.width / 2.0;
        self.clamp(geometry);
    }

    /// Follow a pointer: `raw_x` and `origin_x` share the host's coordinate
    /// space; the bucket centers itself under the pointer.
    pub fn follow(&mut self, raw_x: f32, origin_x: f32, geometry: &FieldGeometry) {
        if !raw_x.is_finite() || !origin_x.is_finite() {
            return;
        }
        self.x = raw_x - origin_x - self.width / 2.0;
        self.clamp(geometry);
    }

    /// Keep the bucket inside [0, width - bucket width]
    pub fn clamp(&mut self, geometry: &FieldGeometry) {
        self.width = geometry.bucket_width;
        self.x = self.x.clamp(0.0, geometry.max_bucket_x());
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// RNG seed wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Score, clock and live drops of the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// May go negative
    pub score: i32,
    pub time_remaining_secs: u32,
    pub goal: u32,
    /// True only while Running
    pub active: bool,
    pub phase: GamePhase,
    pub profile: DifficultyProfile,
    /// Live drops (sorted by id)
    pub entities: Vec<FallingEntity>,
    /// Next entity ID
    next_id: u32,
}

impl SessionState {
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            score: 0,
            time_remaining_secs: profile.time_limit_secs,
            goal: profile.score_goal,
            active: false,
            phase: GamePhase::Idle,
            profile,
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the final score meets the goal
    pub fn goal_reached(&self) -> bool {
        self.score as i64 >= self.goal as i64
    }

    /// Drop resolved entities from the live set
    pub fn prune(&mut self) {
        self.entities.retain(|e| !e.is_resolved());
    }

    pub fn live_count(&self) -> usize {
        self.entities.iter().filter(|e| !e.is_resolved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Difficulty;

    #[test]
    fn test_resolve_once() {
        let mut drop = FallingEntity::new(1, 10.0, true, 3.0, 500.0);
        assert!(drop.resolve());
        assert!(!drop.resolve());
        assert!(drop.is_resolved());
    }

    #[test]
    fn test_speed_from_duration() {
        let drop = FallingEntity::new(1, 0.0, true, 2.5, 600.0);
        // 600px over 2.5s at 60 ticks/s
        assert!((drop.speed - 4.0).abs() < 1e-5);
        assert_eq!(drop.pos.y, 0.0);
    }

    #[test]
    fn test_catch_delta() {
        assert_eq!(FallingEntity::new(1, 0.0, true, 3.0, 500.0).catch_delta(), 2);
        assert_eq!(FallingEntity::new(2, 0.0, false, 3.0, 500.0).catch_delta(), -1);
    }

    #[test]
    fn test_bucket_follow_clamps() {
        let geo = FieldGeometry::default();
        let mut bucket = Bucket::centered(&geo);
        assert_eq!(bucket.x, 350.0);

        // Pointer at field x=400 centers the bucket there
        bucket.follow(420.0, 20.0, &geo);
        assert_eq!(bucket.x, 350.0);

        bucket.follow(-500.0, 0.0, &geo);
        assert_eq!(bucket.x, 0.0);

        bucket.follow(5000.0, 0.0, &geo);
        assert_eq!(bucket.x, 700.0);

        bucket.follow(f32::NAN, 0.0, &geo);
        assert_eq!(bucket.x, 700.0);
    }

    #[test]
    fn test_bucket_reclamp_on_resize() {
        let mut geo = FieldGeometry::default();
        let mut bucket = Bucket::centered(&geo);
        bucket.follow(800.0, 0.0, &geo);
        assert_eq!(bucket.x, 700.0);

        geo.width = 400.0;
        bucket.clamp(&geo);
        assert_eq!(bucket.x, 300.0);
    }

    #[test]
    fn test_goal_reached() {
        let mut state = SessionState::new(Difficulty::Medium.profile());
        state.score = 39;
        assert!(!state.goal_reached());
        state.score = 40;
        assert!(state.goal_reached());
        state.score = -5;
        assert!(!state.goal_reached());
    }

    #[test]
    fn test_prune() {
        let mut state = SessionState::new(Difficulty::Easy.profile());
        for clean in [true, false, true] {
            let id = state.next_entity_id();
            state.entities.push(FallingEntity::new(id, 0.0, clean, 3.0, 500.0));
        }
        state.entities[1].resolve();
        assert_eq!(state.live_count(), 2);
        state.prune();
        assert_eq!(
            state.entities.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }
}
