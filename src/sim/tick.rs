//! Fixed timestep simulation tick
//!
//! One call = one animation frame. Order within a running tick:
//! motion → bottom exits → triggers → catch poll → render moves → spawn →
//! countdown. Motion always precedes the catch check, so the poll never sees
//! a stale position.

use super::collision::{self, Catch};
use super::motion::{self, Motion};
use super::session::Session;
use super::spawner;
use super::state::{Resolution, SessionState};
use crate::render::RenderCommand;

/// Settle a drop. Returns false (and changes nothing) if the drop is unknown
/// or already resolved. Score only moves while the round is active.
pub fn resolve(
    state: &mut SessionState,
    id: u32,
    resolution: Resolution,
    out: &mut Vec<RenderCommand>,
) -> bool {
    let active = state.active;
    let Some(entity) = state.entities.iter_mut().find(|e| e.id == id) else {
        return false;
    };
    if !entity.resolve() {
        return false;
    }
    out.push(RenderCommand::RemoveDrop { id });

    if resolution == Resolution::Caught && active {
        let delta = entity.catch_delta();
        state.score += delta;
        out.push(RenderCommand::SetScore { score: state.score });
        log::debug!("Caught drop {} ({:+}), score {}", id, delta, state.score);
    }
    true
}

/// Advance the session by one tick
pub fn tick(session: &mut Session) {
    session.time_ticks += 1;

    // Cosmetic; keeps playing through Won and Idle
    session.celebration.tick(&mut session.outbox);

    if session.scheduler.auto_reset.tick() {
        log::info!("Auto-reset");
        session.reset();
        return;
    }

    // Nothing below may run once the round is over
    if !session.state.active {
        return;
    }

    let height = session.geometry.height;
    let exited: Vec<u32> = session
        .state
        .entities
        .iter_mut()
        .filter(|e| !e.is_resolved())
        .filter_map(|e| (motion::advance(e, height) == Motion::ExitedBottom).then_some(e.id))
        .collect();
    for id in exited {
        resolve(&mut session.state, id, Resolution::Missed, &mut session.outbox);
    }

    let fired = session.scheduler.advance();

    if fired.collision {
        let hits: Vec<u32> = session
            .state
            .entities
            .iter()
            .filter(|e| !e.is_resolved())
            .filter(|e| collision::check(e, &session.bucket, &session.geometry) == Catch::Hit)
            .map(|e| e.id)
            .collect();
        for id in hits {
            resolve(&mut session.state, id, Resolution::Caught, &mut session.outbox);
        }
    }

    session.state.prune();
    for entity in &session.state.entities {
        session.outbox.push(RenderCommand::MoveDrop {
            id: entity.id,
            y: entity.pos.y,
        });
    }

    if fired.spawn {
        if let Some(entity) = spawner::spawn(&mut session.state, &session.geometry, &mut session.rng) {
            session.outbox.push(RenderCommand::SpawnDrop {
                id: entity.id,
                x: entity.pos.x,
                y: entity.pos.y,
                clean: entity.clean,
            });
        }
    }

    if fired.countdown {
        let state = &mut session.state;
        state.time_remaining_secs = state.time_remaining_secs.saturating_sub(1);
        session.outbox.push(RenderCommand::SetTimer {
            secs: state.time_remaining_secs,
        });
        if state.time_remaining_secs == 0 {
            session.end();
        }
    }
}
