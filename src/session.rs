//! Session controller.
//!
//! Owns the entity collections, the scoreboard and the collaborators, and
//! drives the state machine:
//!
//! ```text
//!   Playing ──(squadron destroyed)──▶ LevelComplete ──(rebuild, speeds ×1.2)──▶ Playing
//!   Playing ──(ship hit / overrun)──▶ GameOver ──(restart: speeds, score reset)──▶ Playing
//!   any ──(quit)──▶ terminated
//! ```
//!
//! `LevelComplete` is resolved inside the tick that produced it, so callers
//! only ever observe `Playing` or `GameOver` between ticks.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::assets::FrameSet;
use crate::audio::{Audio, Effect};
use crate::compute::{self, GameEvent, TickReport};
use crate::config::{GameConfig, Speeds};
use crate::entities::{GameState, GameStatus};
use crate::input::Command;
use crate::score_store::ScoreStore;
use crate::scoreboard::Scoreboard;

/// What the loop should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Session {
    config: GameConfig,
    frames: FrameSet,
    state: GameState,
    scoreboard: Scoreboard,
    audio: Box<dyn Audio>,
    level: u32,
}

impl Session {
    /// Load the high score, build the first session and start the music.
    pub fn new(
        config: GameConfig,
        frames: FrameSet,
        store: Box<dyn ScoreStore>,
        mut audio: Box<dyn Audio>,
        now: Instant,
    ) -> Self {
        let scoreboard = Scoreboard::new(store, config.score_award);
        let state = compute::init_state(&config, &frames, Speeds::initial(&config), now);
        audio.play(Effect::BackgroundMusic);
        info!(high_score = scoreboard.high_score(), "session started");
        Self {
            config,
            frames,
            state,
            scoreboard,
            audio,
            level: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn speeds(&self) -> Speeds {
        self.state.speeds
    }

    /// 1-based level counter.
    pub fn level(&self) -> u32 {
        self.level
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Apply one input command.  Ship commands only act while playing;
    /// restart only acts after a game over; quit acts in any state.
    pub fn handle(&mut self, command: Command, now: Instant) -> Control {
        let playing = self.state.status == GameStatus::Playing;
        match command {
            Command::MoveLeft if playing => compute::move_player_left(&mut self.state, &self.config),
            Command::MoveRight if playing => compute::move_player_right(&mut self.state, &self.config),
            Command::Fire if playing => {
                if compute::player_shoot(&mut self.state, &self.config, now) {
                    self.audio.play(Effect::Shoot);
                }
            }
            Command::Restart => {
                self.restart(now);
            }
            Command::Quit => {
                self.quit();
                return Control::Quit;
            }
            _ => {}
        }
        Control::Continue
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Run one render tick and settle any terminal state it produced.
    pub fn tick(&mut self, now: Instant, rng: &mut impl Rng) -> TickReport {
        let report = compute::tick(&mut self.state, &self.config, now, rng);

        for event in &report.events {
            match event {
                GameEvent::AlienHit => {
                    self.scoreboard.increase_score();
                    self.audio.play(Effect::AlienHit);
                }
                GameEvent::BarrierHit => self.audio.play(Effect::BarrierHit),
                GameEvent::AlienFired => self.audio.play(Effect::AlienShoot),
                GameEvent::ProjectilesCancelled => debug!("projectiles cancelled"),
                GameEvent::ShipDestroyed | GameEvent::Overrun | GameEvent::LevelCleared => {}
            }
        }

        if self.state.status == GameStatus::LevelComplete {
            self.level_complete(now);
        } else if report.contains(GameEvent::ShipDestroyed) || report.contains(GameEvent::Overrun) {
            self.game_over(&report);
        }
        report
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    fn game_over(&mut self, report: &TickReport) {
        let cause = if report.contains(GameEvent::ShipDestroyed) {
            "ship destroyed"
        } else {
            "overrun"
        };
        info!(cause, score = self.scoreboard.score(), level = self.level, "game over");
        self.scoreboard.save_high_score();
        self.audio.play(Effect::GameOver);
    }

    fn level_complete(&mut self, now: Instant) {
        let speeds = self.state.speeds.scaled(self.config.speed_growth);
        self.scoreboard.save_high_score();
        self.level += 1;
        info!(
            level = self.level,
            alien_speed = speeds.alien,
            projectile_speed = speeds.projectile,
            "level complete"
        );
        self.reset(speeds, now);
    }

    /// Start a new game after a game over.  Returns whether it did.
    pub fn restart(&mut self, now: Instant) -> bool {
        if self.state.status != GameStatus::GameOver {
            return false;
        }
        self.scoreboard.reset_score();
        self.level = 1;
        info!("restart");
        self.reset(Speeds::initial(&self.config), now);
        true
    }

    /// Bank the high score before the process goes away.
    pub fn quit(&mut self) {
        self.scoreboard.save_high_score();
        info!(score = self.scoreboard.score(), high_score = self.scoreboard.high_score(), "quit");
    }

    /// Discard every entity and rebuild the session with `speeds`.
    fn reset(&mut self, speeds: Speeds, now: Instant) {
        self.state = compute::init_state(&self.config, &self.frames, speeds, now);
    }
}
