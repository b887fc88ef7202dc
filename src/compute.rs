//! Game-logic functions.
//!
//! Every function here takes the session's `GameState` by mutable reference
//! plus whatever it needs from outside: the configuration, the current
//! instant, and (where needed) an RNG handle.  Nothing here touches the
//! terminal, the audio device or the score file; what happened is reported
//! back as [`GameEvent`]s and the session decides what that means.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::FrameSet;
use crate::collision::resolve_collisions;
use crate::config::{GameConfig, Speeds};
use crate::entities::{
    Animation, Barrier, Direction, Enemy, GameState, GameStatus, Heading, Player, Projectile,
    Squadron,
};

/// Something that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A player projectile destroyed an enemy.
    AlienHit,
    /// A projectile from either side was absorbed by a barrier.
    BarrierHit,
    /// An enemy projectile and a player projectile destroyed each other.
    ProjectilesCancelled,
    AlienFired,
    ShipDestroyed,
    /// An enemy descended to the ship's row.
    Overrun,
    LevelCleared,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    pub fn contains(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: ship at its start position, full alien grid,
/// barriers, no projectiles, squadron heading right.
pub fn init_state(
    config: &GameConfig,
    frames: &FrameSet,
    speeds: Speeds,
    now: Instant,
) -> GameState {
    let (ship_x, ship_y) = config.ship_start;
    GameState {
        player: Player::new(ship_x, ship_y, Animation::new(frames.spaceship.clone())),
        enemies: create_aliens(config, frames, speeds.alien),
        barriers: create_barriers(config, frames),
        player_projectiles: Vec::new(),
        enemy_projectiles: Vec::new(),
        squadron: Squadron {
            direction: Direction::Right,
            last_advance: now,
        },
        background: Animation::new(frames.background.clone()),
        projectile_animation: Animation::new(frames.projectile.clone()),
        speeds,
        status: GameStatus::Playing,
        started: now,
        frame: 0,
    }
}

pub fn create_aliens(config: &GameConfig, frames: &FrameSet, speed: f32) -> Vec<Enemy> {
    let (origin_x, origin_y) = config.alien_origin;
    let (dx, dy) = config.alien_spacing;
    let mut aliens = Vec::with_capacity(config.alien_rows * config.alien_columns);
    for row in 0..config.alien_rows {
        for col in 0..config.alien_columns {
            aliens.push(Enemy::new(
                origin_x + col as f32 * dx,
                origin_y + row as f32 * dy,
                speed,
                Animation::new(frames.alien.clone()),
            ));
        }
    }
    aliens
}

pub fn create_barriers(config: &GameConfig, frames: &FrameSet) -> Vec<Barrier> {
    config
        .barrier_positions
        .iter()
        .map(|&(x, y)| Barrier::new(x, y, Animation::new(frames.barrier.clone())))
        .collect()
}

// ── Input-driven transitions ─────────────────────────────────────────────────

pub fn move_player_left(state: &mut GameState, config: &GameConfig) {
    state.player.move_left(config.ship_step, config.half_width());
}

pub fn move_player_right(state: &mut GameState, config: &GameConfig) {
    state.player.move_right(config.ship_step, config.half_width());
}

/// Fire from the ship's position if the cooldown has elapsed.  The cooldown
/// is the only limit on player fire.  Returns whether a projectile was
/// spawned.
pub fn player_shoot(state: &mut GameState, config: &GameConfig, now: Instant) -> bool {
    if !state.player.ready_to_fire(now, config.shoot_cooldown) {
        return false;
    }
    let ship = &state.player.sprite;
    state.player_projectiles.push(Projectile::new(
        ship.x,
        ship.y,
        Heading::Up,
        state.speeds.projectile,
        state.projectile_animation.clone(),
    ));
    state.player.last_shot = Some(now);
    true
}

// ── Per-tick steps ───────────────────────────────────────────────────────────

/// Move the whole squadron one step.  If any member ends up beyond the
/// horizontal bound, every member reverses and drops one row.
pub fn advance_squadron(state: &mut GameState, config: &GameConfig) {
    let sign = state.squadron.direction.sign();
    for enemy in &mut state.enemies {
        enemy.sprite.x += sign * enemy.speed;
    }

    let crossed = state
        .enemies
        .iter()
        .any(|e| e.sprite.x > config.alien_bound || e.sprite.x < -config.alien_bound);
    if crossed {
        state.squadron.direction = state.squadron.direction.reversed();
        for enemy in &mut state.enemies {
            enemy.sprite.y -= config.row_drop;
        }
    }
}

/// Advance every projectile and silently drop the ones that left the
/// play-field (player fire off the top, enemy fire off the bottom).
pub fn move_projectiles(state: &mut GameState, config: &GameConfig) {
    let top = config.half_height();
    for projectile in &mut state.player_projectiles {
        projectile.advance();
    }
    state.player_projectiles.retain(|p| p.sprite.y <= top);

    for projectile in &mut state.enemy_projectiles {
        projectile.advance();
    }
    state.enemy_projectiles.retain(|p| p.sprite.y >= -top);
}

/// With probability `enemy_fire_chance`, one enemy chosen uniformly at
/// random fires downward.  The rate does not depend on squadron size.
pub fn enemy_fire(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) -> bool {
    if state.enemies.is_empty() || !rng.gen_bool(config.enemy_fire_chance.clamp(0.0, 1.0)) {
        return false;
    }
    let Some(shooter) = state.enemies.choose(rng) else {
        return false;
    };
    let projectile = Projectile::new(
        shooter.sprite.x,
        shooter.sprite.y,
        Heading::Down,
        state.speeds.projectile,
        state.projectile_animation.clone(),
    );
    state.enemy_projectiles.push(projectile);
    true
}

/// Step every entity's animation and set the background frame from the
/// time elapsed since the session started.
pub fn animate(state: &mut GameState, config: &GameConfig, now: Instant) {
    state.player.sprite.advance_frame();
    for enemy in &mut state.enemies {
        enemy.sprite.advance_frame();
    }
    for projectile in state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut())
    {
        projectile.sprite.advance_frame();
    }
    for barrier in &mut state.barriers {
        barrier.sprite.advance_frame();
    }

    let period = config.background_frame_period.as_millis().max(1);
    let elapsed = now.saturating_duration_since(state.started).as_millis();
    state.background.seek((elapsed / period) as u64);
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one render tick.
///
/// Order: squadron advance (only when the move interval has elapsed),
/// projectile movement and bounds cleanup, collisions, enemy fire,
/// animation, and finally the level-complete check.  Once the game is over
/// nothing further happens in the tick, and a game-over beats an emptied
/// squadron.  All randomness comes through `rng`.
pub fn tick(
    state: &mut GameState,
    config: &GameConfig,
    now: Instant,
    rng: &mut impl Rng,
) -> TickReport {
    let mut report = TickReport::default();
    if state.status != GameStatus::Playing {
        return report;
    }
    state.frame += 1;

    // ── 1. Squadron on its own cadence ───────────────────────────────────────
    if now.saturating_duration_since(state.squadron.last_advance) >= config.alien_move_interval {
        advance_squadron(state, config);
        state.squadron.last_advance = now;
    }

    // ── 2. Projectiles ───────────────────────────────────────────────────────
    move_projectiles(state, config);

    // ── 3. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(state, config, &mut report.events);
    if state.status == GameStatus::GameOver {
        return report;
    }

    // ── 4. Enemy fire ────────────────────────────────────────────────────────
    if enemy_fire(state, config, rng) {
        report.events.push(GameEvent::AlienFired);
    }

    // ── 5. Animation ─────────────────────────────────────────────────────────
    animate(state, config, now);

    // ── 6. Level complete ────────────────────────────────────────────────────
    if state.enemies.is_empty() {
        state.status = GameStatus::LevelComplete;
        report.events.push(GameEvent::LevelCleared);
    }

    report
}
