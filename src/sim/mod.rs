//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod celebration;
pub mod collision;
pub mod motion;
pub mod schedule;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use celebration::{Celebration, Confetti};
pub use collision::{Catch, check};
pub use motion::{Motion, advance};
pub use schedule::{Fired, Repeating, Scheduler, Timeout};
pub use session::Session;
pub use state::{Bucket, FallingEntity, GamePhase, Resolution, SessionState};
pub use tick::{resolve, tick};
