//! Tick-based timers
//!
//! The round is driven by three fixed-rate triggers (countdown, spawn,
//! collision poll) plus a one-shot auto-reset. All periods are whole ticks.
//! Cancelling a trigger disarms it; a disarmed trigger never fires.

use crate::config::CollisionCadence;
use crate::consts::*;
use crate::{ms_to_ticks, secs_to_ticks};

/// Fixed-rate trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeating {
    period: u32,
    elapsed: u32,
    armed: bool,
}

impl Repeating {
    pub fn new(period_ticks: u32) -> Self {
        Self {
            period: period_ticks.max(1),
            elapsed: 0,
            armed: false,
        }
    }

    /// Arm with a fresh phase; first fire is one full period away
    pub fn arm(&mut self) {
        self.elapsed = 0;
        self.armed = true;
    }

    pub fn arm_with_period(&mut self, period_ticks: u32) {
        self.period = period_ticks.max(1);
        self.arm();
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance one tick; true when the period elapses
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// One-shot trigger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeout {
    remaining: Option<u32>,
}

impl Timeout {
    pub fn schedule(&mut self, ticks: u32) {
        self.remaining = Some(ticks.max(1));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance one tick; true exactly once, when the delay runs out
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(1) => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
            None => false,
        }
    }
}

/// Triggers that fired during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub collision: bool,
    pub spawn: bool,
    pub countdown: bool,
}

/// All periodic triggers of a session
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub countdown: Repeating,
    pub spawn: Repeating,
    /// `None` when collisions are checked every tick
    pub collision_poll: Option<Repeating>,
    pub auto_reset: Timeout,
}

impl Scheduler {
    pub fn new(cadence: CollisionCadence, spawn_interval_ms: u32) -> Self {
        let collision_poll = match cadence {
            CollisionCadence::Sampled { every_ms } => Some(Repeating::new(ms_to_ticks(every_ms))),
            CollisionCadence::EveryTick => None,
        };
        Self {
            countdown: Repeating::new(ms_to_ticks(COUNTDOWN_MS)),
            spawn: Repeating::new(ms_to_ticks(spawn_interval_ms)),
            collision_poll,
            auto_reset: Timeout::default(),
        }
    }

    /// Arm the round triggers
    pub fn start_round(&mut self, spawn_interval_ms: u32) {
        self.auto_reset.cancel();
        self.countdown.arm();
        self.spawn.arm_with_period(ms_to_ticks(spawn_interval_ms));
        if let Some(poll) = &mut self.collision_poll {
            poll.arm();
        }
    }

    /// Cancel every trigger, including a pending auto-reset
    pub fn cancel_all(&mut self) {
        self.countdown.cancel();
        self.spawn.cancel();
        if let Some(poll) = &mut self.collision_poll {
            poll.cancel();
        }
        self.auto_reset.cancel();
    }

    pub fn schedule_reset(&mut self, secs: u32) {
        self.auto_reset.schedule(secs_to_ticks(secs));
    }

    pub fn any_round_trigger_armed(&self) -> bool {
        self.countdown.is_armed()
            || self.spawn.is_armed()
            || self.collision_poll.as_ref().is_some_and(|p| p.is_armed())
    }

    /// Advance the round triggers by one tick
    pub fn advance(&mut self) -> Fired {
        let collision = match &mut self.collision_poll {
            Some(poll) => poll.tick(),
            None => self.countdown.is_armed(),
        };
        Fired {
            collision,
            spawn: self.spawn.tick(),
            countdown: self.countdown.tick(),
        }
    }
}
