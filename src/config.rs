//! Game parameters.
//!
//! The simulation never reads ambient globals: one immutable `GameConfig`
//! is handed to the session at construction and threaded through every
//! update function.  World coordinates have their origin at the centre of
//! the play-field with y pointing up.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Play-field width in world units.
    pub screen_width: f32,
    /// Play-field height in world units.
    pub screen_height: f32,
    /// Render/physics quantum.
    pub tick: Duration,

    pub ship_start: (f32, f32),
    /// Horizontal distance covered by one move command.
    pub ship_step: f32,
    /// Minimum time between two successful player shots.
    pub shoot_cooldown: Duration,

    pub alien_rows: usize,
    pub alien_columns: usize,
    /// Position of the bottom-left alien of the grid.
    pub alien_origin: (f32, f32),
    /// Column and row spacing of the alien grid.
    pub alien_spacing: (f32, f32),
    /// |x| beyond which the squadron reverses.
    pub alien_bound: f32,
    pub row_drop: f32,
    /// Squadron-advance cadence, layered on top of the render tick.
    pub alien_move_interval: Duration,

    pub initial_alien_speed: f32,
    pub initial_projectile_speed: f32,
    /// Multiplier applied to both speeds on each completed level.
    pub speed_growth: f32,
    /// Per-tick probability that one enemy fires.
    pub enemy_fire_chance: f64,

    pub barrier_positions: Vec<(f32, f32)>,

    /// Distance threshold for every pairwise collision test.
    pub hit_radius: f32,
    /// An enemy this close (in y) to the ship ends the game.
    pub overrun_margin: f32,
    /// Points per destroyed enemy.
    pub score_award: u32,
    pub background_frame_period: Duration,
}

impl GameConfig {
    pub fn half_width(&self) -> f32 {
        self.screen_width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.screen_height / 2.0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            tick: Duration::from_millis(20), // ≈50 FPS

            ship_start: (0.0, -250.0),
            ship_step: 20.0,
            shoot_cooldown: Duration::from_millis(250),

            alien_rows: 5,
            alien_columns: 11,
            alien_origin: (-250.0, 150.0),
            alien_spacing: (50.0, 30.0),
            alien_bound: 350.0,
            row_drop: 40.0,
            alien_move_interval: Duration::from_millis(300),

            initial_alien_speed: 10.0,
            initial_projectile_speed: 10.0,
            speed_growth: 1.2,
            enemy_fire_chance: 0.05,

            barrier_positions: vec![
                (-225.0, -150.0),
                (-75.0, -150.0),
                (75.0, -150.0),
                (225.0, -150.0),
            ],

            hit_radius: 20.0,
            overrun_margin: 20.0,
            score_award: 10,
            background_frame_period: Duration::from_millis(100),
        }
    }
}

// ── Speeds ────────────────────────────────────────────────────────────────────

/// The two speeds that scale per level.  Carried across session resets:
/// multiplied on level completion, restored to the configured initial values
/// on restart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speeds {
    pub alien: f32,
    pub projectile: f32,
}

impl Speeds {
    pub fn initial(config: &GameConfig) -> Self {
        Self {
            alien: config.initial_alien_speed,
            projectile: config.initial_projectile_speed,
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            alien: self.alien * factor,
            projectile: self.projectile * factor,
        }
    }
}
