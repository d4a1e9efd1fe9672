//! Win confetti
//!
//! Purely cosmetic: never touches score, timer or drops.

use rand::Rng;

use crate::consts::*;
use crate::render::RenderCommand;
use crate::{ms_to_ticks, secs_to_ticks};

/// A single confetti piece
#[derive(Debug, Clone)]
pub struct Confetti {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: &'static str,
    /// Ticks before the piece appears
    pub delay_ticks: u32,
    /// Ticks spent falling once visible
    pub age_ticks: u32,
    pub lifetime_ticks: u32,
    pub speed: f32,
    visible: bool,
}

/// Live confetti batch
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    pub pieces: Vec<Confetti>,
    next_id: u32,
}

impl Celebration {
    pub fn is_active(&self) -> bool {
        !self.pieces.is_empty()
    }

    /// Queue a staggered batch across the field
    pub fn launch<R: Rng>(&mut self, rng: &mut R, count: usize, width: f32, height: f32) {
        let stagger = ms_to_ticks(CONFETTI_STAGGER_MS);
        for i in 0..count {
            let secs = rng.random_range(CONFETTI_MIN_SECS..=CONFETTI_MAX_SECS);
            let lifetime_ticks = ((secs * TICK_RATE as f32).round() as u32).max(1);
            let size = rng.random_range(6.0..=12.0);
            self.next_id += 1;
            self.pieces.push(Confetti {
                id: self.next_id,
                x: rng.random::<f32>() * (width - size).max(0.0),
                y: 0.0,
                size,
                color: CONFETTI_PALETTE[rng.random_range(0..CONFETTI_PALETTE.len())],
                delay_ticks: i as u32 * stagger,
                age_ticks: 0,
                lifetime_ticks,
                speed: height / lifetime_ticks as f32,
                visible: false,
            });
        }
        log::debug!("Launched {} confetti", count);
    }

    /// Advance one tick, emitting render updates
    pub fn tick(&mut self, out: &mut Vec<RenderCommand>) {
        for piece in self.pieces.iter_mut() {
            if piece.delay_ticks > 0 {
                piece.delay_ticks -= 1;
                continue;
            }
            if !piece.visible {
                piece.visible = true;
                out.push(RenderCommand::SpawnConfetti {
                    id: piece.id,
                    x: piece.x,
                    y: piece.y,
                    size: piece.size,
                    color: piece.color.to_string(),
                });
                continue;
            }
            piece.age_ticks += 1;
            piece.y += piece.speed;
            if piece.age_ticks >= piece.lifetime_ticks {
                out.push(RenderCommand::RemoveConfetti { id: piece.id });
            } else {
                out.push(RenderCommand::MoveConfetti {
                    id: piece.id,
                    y: piece.y,
                });
            }
        }
        self.pieces.retain(|p| p.age_ticks < p.lifetime_ticks);
    }

    /// Remove everything immediately
    pub fn clear(&mut self, out: &mut Vec<RenderCommand>) {
        for piece in self.pieces.drain(..) {
            if piece.visible {
                out.push(RenderCommand::RemoveConfetti { id: piece.id });
            }
        }
    }
}

/// Ticks until a fresh batch of `count` pieces has fully played out
pub fn max_duration_ticks(count: usize) -> u32 {
    let stagger = ms_to_ticks(CONFETTI_STAGGER_MS);
    count.saturating_sub(1) as u32 * stagger
        + secs_to_ticks(CONFETTI_MAX_SECS.ceil() as u32)
        + 2
}
