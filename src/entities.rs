//! All game entity types.
//!
//! Every movable object is composed from a [`Sprite`] (position plus
//! animation state) rather than inheriting from a shared base.  Behaviour
//! here is limited to what an entity can do to itself; anything involving
//! more than one entity lives in `compute` and `collision`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Speeds;

/// An ordered, immutable sequence of frame identifiers shared by every
/// entity of the same kind.
pub type Frames = Arc<[String]>;

// ── Animation ─────────────────────────────────────────────────────────────────

/// Cyclic frame index over a frame sequence.
///
/// An empty sequence means "no animation": the renderer falls back to a
/// static shape and [`Animation::advance`] does nothing.  The index is
/// always a valid index into a non-empty sequence.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Frames,
    index: usize,
}

impl Animation {
    pub fn new(frames: Frames) -> Self {
        Self { frames, index: 0 }
    }

    /// An animation without frames.
    pub fn still() -> Self {
        Self::new(Arc::from(Vec::<String>::new()))
    }

    pub fn advance(&mut self) {
        if !self.frames.is_empty() {
            self.index = (self.index + 1) % self.frames.len();
        }
    }

    /// Jump to the frame for an absolute step count.
    pub fn seek(&mut self, step: u64) {
        if !self.frames.is_empty() {
            self.index = (step % self.frames.len() as u64) as usize;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame currently shown, if there is one.
    pub fn shape(&self) -> Option<&str> {
        self.frames.get(self.index).map(String::as_str)
    }
}

// ── Sprite ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub animation: Animation,
}

impl Sprite {
    pub fn new(x: f32, y: f32, animation: Animation) -> Self {
        Self { x, y, animation }
    }

    pub fn distance(&self, other: &Sprite) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn advance_frame(&mut self) {
        self.animation.advance();
    }

    pub fn shape(&self) -> Option<&str> {
        self.animation.shape()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Vertical travel direction of a projectile, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    /// Player fire (+1).
    Up,
    /// Enemy fire (−1).
    Down,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::Up => 1.0,
            Heading::Down => -1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub sprite: Sprite,
    heading: Heading,
    speed: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, heading: Heading, speed: f32, animation: Animation) -> Self {
        Self {
            sprite: Sprite::new(x, y, animation),
            heading,
            speed,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Translate by `speed` along the heading.  Leaving the play-field is
    /// the owner's concern.
    pub fn advance(&mut self) {
        self.sprite.y += self.heading.sign() * self.speed;
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub sprite: Sprite,
    /// When the last successful shot was fired.
    pub last_shot: Option<Instant>,
}

impl Player {
    pub fn new(x: f32, y: f32, animation: Animation) -> Self {
        Self {
            sprite: Sprite::new(x, y, animation),
            last_shot: None,
        }
    }

    /// Step left unless that would reach the wall at `-half_width`.
    pub fn move_left(&mut self, step: f32, half_width: f32) {
        let new_x = self.sprite.x - step;
        if new_x > -half_width {
            self.sprite.x = new_x;
        }
    }

    /// Step right unless that would reach the wall at `half_width`.
    pub fn move_right(&mut self, step: f32, half_width: f32) {
        let new_x = self.sprite.x + step;
        if new_x < half_width {
            self.sprite.x = new_x;
        }
    }

    pub fn ready_to_fire(&self, now: Instant, cooldown: Duration) -> bool {
        match self.last_shot {
            Some(last) => now.saturating_duration_since(last) >= cooldown,
            None => true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub sprite: Sprite,
    /// Horizontal distance per squadron advance; fixed per level.
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32, animation: Animation) -> Self {
        Self {
            sprite: Sprite::new(x, y, animation),
            speed,
        }
    }
}

/// A static obstacle.  Absorbs every projectile that reaches it and is never
/// damaged.
#[derive(Clone, Debug)]
pub struct Barrier {
    pub sprite: Sprite,
}

impl Barrier {
    pub fn new(x: f32, y: f32, animation: Animation) -> Self {
        Self {
            sprite: Sprite::new(x, y, animation),
        }
    }
}

// ── Squadron ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Movement state shared by every live enemy.
#[derive(Clone, Debug)]
pub struct Squadron {
    pub direction: Direction,
    pub last_advance: Instant,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    /// Transient: the session resolves it back to `Playing` within the same tick.
    LevelComplete,
}

/// Everything one session owns.  Rebuilt from scratch on every reset.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub barriers: Vec<Barrier>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub squadron: Squadron,
    pub background: Animation,
    /// Animation template for newly spawned projectiles.
    pub projectile_animation: Animation,
    /// Speeds this session was built with.
    pub speeds: Speeds,
    pub status: GameStatus,
    pub started: Instant,
    pub frame: u64,
}
