//! Drop spawner
//!
//! Draws position, classification and fall duration from the session RNG.

use rand::Rng;

use super::state::{FallingEntity, SessionState};
use crate::config::FieldGeometry;
use crate::profile::DifficultyProfile;

/// Draw one drop's fall duration from the profile's range
pub fn draw_fall_duration<R: Rng>(rng: &mut R, profile: &DifficultyProfile) -> f32 {
    let min = profile.fall_duration_min_secs;
    let max = profile.fall_duration_max_secs.max(min);
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Create a drop and register it with the session. Returns the new drop.
///
/// Does nothing while the session is inactive.
pub fn spawn<'a, R: Rng>(
    state: &'a mut SessionState,
    geometry: &FieldGeometry,
    rng: &mut R,
) -> Option<&'a FallingEntity> {
    if !state.active {
        return None;
    }

    let profile = state.profile;
    let clean = rng.random::<f32>() > profile.dirty_probability;
    let x = rng.random::<f32>() * geometry.max_entity_x();
    let duration = draw_fall_duration(rng, &profile);

    let id = state.next_entity_id();
    state
        .entities
        .push(FallingEntity::new(id, x, clean, duration, geometry.height));

    log::debug!(
        "Spawned drop {} ({}) at x={:.1}, falls in {:.2}s",
        id,
        if clean { "clean" } else { "dirty" },
        x,
        duration
    );
    state.entities.last()
}
