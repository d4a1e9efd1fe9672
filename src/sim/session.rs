//! Round lifecycle
//!
//! `Session` is the single owner of everything a round mutates: state, RNG,
//! timers, bucket and confetti. Hosts talk to it only through the lifecycle
//! calls below and `tick`/`advance`, and read back nothing but render
//! commands.

use rand_pcg::Pcg32;

use super::celebration::Celebration;
use super::schedule::Scheduler;
use super::state::{Bucket, GamePhase, RngState, SessionState};
use crate::config::{FieldGeometry, GameConfig};
use crate::consts::*;
use crate::error::GameError;
use crate::profile::{DifficultyProfile, profile_for};
use crate::render::{Banner, RenderCommand, RenderSink};

pub struct Session {
    pub state: SessionState,
    pub bucket: Bucket,
    pub(crate) geometry: FieldGeometry,
    pub(crate) config: GameConfig,
    pub(crate) scheduler: Scheduler,
    pub(crate) celebration: Celebration,
    pub(crate) rng: Pcg32,
    pub(crate) outbox: Vec<RenderCommand>,
    /// Fixed-timestep accumulator for `advance`
    accumulator: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Session {
    /// Create an idle session. Fails if the configured geometry is unusable.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let profile = config.difficulty.profile();
        let geometry = config.geometry;

        let mut session = Self {
            state: SessionState::new(profile),
            bucket: Bucket::centered(&geometry),
            geometry,
            scheduler: Scheduler::new(config.collision, profile.spawn_interval_ms),
            celebration: Celebration::default(),
            rng: RngState::new(seed).to_rng(),
            outbox: Vec::new(),
            accumulator: 0.0,
            time_ticks: 0,
            config,
        };
        session.emit_hud();
        log::info!(
            "Session created ({}, goal {}, {}s, seed {})",
            profile.name(),
            profile.score_goal,
            profile.time_limit_secs,
            seed
        );
        Ok(session)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.state.profile
    }

    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether a win/lose auto-reset is pending
    pub fn reset_pending(&self) -> bool {
        self.scheduler.auto_reset.is_pending()
    }

    pub fn celebration_active(&self) -> bool {
        self.celebration.is_active()
    }

    /// Begin (or resume) a round. No-op while running.
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running => return,
            GamePhase::Won | GamePhase::Lost => self.reset(),
            GamePhase::Idle => {}
        }

        self.state.active = true;
        self.state.phase = GamePhase::Running;
        self.scheduler.start_round(self.state.profile.spawn_interval_ms);
        self.bucket.clamp(&self.geometry);

        self.outbox.push(RenderCommand::HideBanners);
        self.outbox.push(RenderCommand::SetRunning { running: true });
        self.outbox.push(RenderCommand::MoveBucket { x: self.bucket.x });
        log::info!(
            "Round started ({}, {}s left, score {})",
            self.state.profile.name(),
            self.state.time_remaining_secs,
            self.state.score
        );
    }

    /// Halt the round: cancel every trigger and drop all live entities.
    /// Score and remaining time are kept.
    pub fn stop(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.halt();
        self.state.phase = GamePhase::Idle;
        log::info!("Round stopped");
    }

    /// Timer expiry: settle the outcome and schedule the automatic reset
    pub(crate) fn end(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.halt();

        let score = self.state.score;
        let goal = self.state.goal;
        if self.state.goal_reached() {
            self.state.phase = GamePhase::Won;
            self.outbox.push(RenderCommand::ShowBanner(Banner::win(score)));
            let count = self.config.confetti_count;
            self.celebration
                .launch(&mut self.rng, count, self.geometry.width, self.geometry.height);
            log::info!("Round won with {} points (goal {})", score, goal);
        } else {
            self.state.phase = GamePhase::Lost;
            self.outbox
                .push(RenderCommand::ShowBanner(Banner::lose(score, goal)));
            log::info!("Round lost with {} points (goal {})", score, goal);
        }

        self.scheduler.schedule_reset(self.config.auto_reset_secs);
    }

    /// Back to a fresh idle round under the current profile
    pub fn reset(&mut self) {
        self.halt();
        self.celebration.clear(&mut self.outbox);

        let profile = self.state.profile;
        self.state.score = 0;
        self.state.time_remaining_secs = profile.time_limit_secs;
        self.state.goal = profile.score_goal;
        self.state.phase = GamePhase::Idle;
        self.bucket.center(&self.geometry);

        self.outbox.push(RenderCommand::HideBanners);
        self.emit_hud();
        log::info!("Session reset ({})", profile.name());
    }

    /// Switch profile by name. Unknown names keep the current profile.
    pub fn set_difficulty(&mut self, name: &str) -> Result<(), GameError> {
        let profile = profile_for(name)?;
        self.state.profile = profile;
        self.config.difficulty = profile.difficulty;
        self.reset();
        Ok(())
    }

    /// Pointer/touch position in host coordinates
    pub fn on_input_position(&mut self, raw_x: f32, origin_x: f32) {
        if !self.state.active {
            return;
        }
        let before = self.bucket.x;
        self.bucket.follow(raw_x, origin_x, &self.geometry);
        if self.bucket.x != before {
            self.outbox.push(RenderCommand::MoveBucket { x: self.bucket.x });
        }
    }

    /// New field measurements. Invalid geometry is rejected and the previous
    /// measurements stay in force.
    pub fn resize(&mut self, geometry: FieldGeometry) -> Result<(), GameError> {
        geometry.validate()?;
        self.geometry = geometry;
        self.config.geometry = geometry;
        self.bucket.clamp(&self.geometry);
        self.outbox.push(RenderCommand::MoveBucket { x: self.bucket.x });
        Ok(())
    }

    /// Run as many fixed ticks as `dt` seconds cover (capped per call)
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            super::tick::tick(self);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Advance exactly one simulation tick
    pub fn tick(&mut self) {
        super::tick::tick(self);
    }

    /// Take all queued render commands
    pub fn drain_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Hand all queued render commands to a sink
    pub fn flush<S: RenderSink>(&mut self, sink: &mut S) {
        for cmd in self.outbox.drain(..) {
            sink.apply(cmd);
        }
    }

    /// Cancel all triggers and clear live drops. Flips `active` off; this is
    /// the only place that does so.
    fn halt(&mut self) {
        self.scheduler.cancel_all();
        self.state.active = false;
        for entity in self.state.entities.drain(..) {
            if !entity.is_resolved() {
                self.outbox.push(RenderCommand::RemoveDrop { id: entity.id });
            }
        }
        self.outbox.push(RenderCommand::SetRunning { running: false });
    }

    fn emit_hud(&mut self) {
        self.outbox.push(RenderCommand::SetScore {
            score: self.state.score,
        });
        self.outbox.push(RenderCommand::SetTimer {
            secs: self.state.time_remaining_secs,
        });
        self.outbox.push(RenderCommand::SetGoal {
            goal: self.state.goal,
        });
        self.outbox.push(RenderCommand::MoveBucket { x: self.bucket.x });
    }
}
