//! Drop Catch - a falling-drops arcade minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, spawning, session state)
//! - `profile`: Named difficulty presets
//! - `config`: Field geometry and tunables
//! - `render`: Render commands consumed by the host
//! - `error`: Error taxonomy

pub mod config;
pub mod error;
pub mod profile;
pub mod render;
pub mod sim;

pub use config::{CollisionCadence, FieldGeometry, GameConfig};
pub use error::GameError;
pub use profile::{Difficulty, DifficultyProfile, profile_for};
pub use render::{Banner, RenderCommand, RenderSink};
pub use sim::{GamePhase, Session};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per animation frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Height of the catch band below the bucket's top edge
    pub const CATCH_BAND: f32 = 40.0;
    /// Collision poll period in milliseconds (20 Hz)
    pub const COLLISION_POLL_MS: u32 = 50;
    /// Countdown period in milliseconds
    pub const COUNTDOWN_MS: u32 = 1000;

    /// Points for catching a clean drop
    pub const CLEAN_REWARD: i32 = 2;
    /// Points lost for catching a dirty drop
    pub const DIRTY_PENALTY: i32 = 1;

    /// Delay before an ended round resets itself
    pub const AUTO_RESET_SECS: u32 = 3;

    /// Confetti batch size on a win
    pub const CONFETTI_COUNT: usize = 50;
    /// Stagger between confetti pieces (ms)
    pub const CONFETTI_STAGGER_MS: u32 = 50;
    /// Confetti fall duration range (seconds)
    pub const CONFETTI_MIN_SECS: f32 = 2.0;
    pub const CONFETTI_MAX_SECS: f32 = 5.0;
    /// Confetti palette
    pub const CONFETTI_PALETTE: [&str; 3] = ["#fdd33d", "#4fb6e7", "#0c4da2"];

    /// Drop dimensions
    pub const DROP_SIZE: f32 = 30.0;
}

/// Convert a duration in milliseconds to whole simulation ticks (at least one)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    let ticks = (ms as u64 * consts::TICK_RATE as u64 + 500) / 1000;
    (ticks as u32).max(1)
}

/// Convert whole seconds to simulation ticks, saturating on huge inputs
#[inline]
pub fn secs_to_ticks(secs: u32) -> u32 {
    secs.saturating_mul(consts::TICK_RATE)
}
