use std::time::{Duration, Instant};

use invaders::assets::{FrameSet, GlyphAtlas};
use invaders::compute::*;
use invaders::config::{GameConfig, Speeds};
use invaders::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_fire_chance: 0.0,
        ..GameConfig::default()
    }
}

fn make_state(config: &GameConfig, now: Instant) -> GameState {
    init_state(config, &FrameSet::still(), Speeds::initial(config), now)
}

/// A state with no aliens and no barriers.
fn empty_state(now: Instant) -> (GameConfig, GameState) {
    let config = GameConfig {
        alien_rows: 0,
        barrier_positions: Vec::new(),
        enemy_fire_chance: 0.0,
        ..GameConfig::default()
    };
    let state = make_state(&config, now);
    (config, state)
}

fn enemy(x: f32, y: f32) -> Enemy {
    Enemy::new(x, y, 10.0, Animation::still())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_layout() {
    let config = GameConfig::default();
    let s = make_state(&config, Instant::now());
    assert_eq!((s.player.sprite.x, s.player.sprite.y), (0.0, -250.0));
    assert_eq!(s.enemies.len(), 55);
    assert_eq!(s.barriers.len(), 4);
    assert!(s.player_projectiles.is_empty());
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.squadron.direction, Direction::Right);
    assert_eq!(s.frame, 0);
}

#[test]
fn alien_grid_positions() {
    let config = GameConfig::default();
    let aliens = create_aliens(&config, &FrameSet::still(), 12.0);
    let first = &aliens[0];
    let last = aliens.last().unwrap();
    assert_eq!((first.sprite.x, first.sprite.y), (-250.0, 150.0));
    assert_eq!((last.sprite.x, last.sprite.y), (250.0, 270.0));
    assert!(aliens.iter().all(|a| a.speed == 12.0));
}

#[test]
fn barriers_follow_configured_positions() {
    let config = GameConfig {
        barrier_positions: vec![(1.0, 2.0), (3.0, 4.0)],
        ..GameConfig::default()
    };
    let barriers = create_barriers(&config, &FrameSet::still());
    assert_eq!(barriers.len(), 2);
    assert_eq!((barriers[1].sprite.x, barriers[1].sprite.y), (3.0, 4.0));
}

// ── Ship movement ─────────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let config = GameConfig::default();
    let mut s = make_state(&config, Instant::now());
    move_player_left(&mut s, &config);
    assert_eq!(s.player.sprite.x, -20.0);
}

#[test]
fn repeated_move_left_never_leaves_the_field() {
    let config = GameConfig::default();
    let mut s = make_state(&config, Instant::now());
    for _ in 0..100 {
        move_player_left(&mut s, &config);
        assert!(s.player.sprite.x > -config.half_width());
    }
    assert_eq!(s.player.sprite.x, -380.0);
}

#[test]
fn repeated_move_right_never_leaves_the_field() {
    let config = GameConfig::default();
    let mut s = make_state(&config, Instant::now());
    for _ in 0..100 {
        move_player_right(&mut s, &config);
        assert!(s.player.sprite.x < config.half_width());
    }
    assert_eq!(s.player.sprite.x, 380.0);
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shoot_adds_upward_projectile_at_ship() {
    let config = GameConfig::default();
    let now = Instant::now();
    let mut s = make_state(&config, now);
    move_player_right(&mut s, &config);
    assert!(player_shoot(&mut s, &config, now));
    assert_eq!(s.player_projectiles.len(), 1);
    let p = &s.player_projectiles[0];
    assert_eq!((p.sprite.x, p.sprite.y), (20.0, -250.0));
    assert_eq!(p.heading(), Heading::Up);
    assert_eq!(p.speed(), config.initial_projectile_speed);
    assert_eq!(s.player.last_shot, Some(now));
}

#[test]
fn shoot_respects_cooldown() {
    let config = GameConfig::default();
    let t0 = Instant::now();
    let mut s = make_state(&config, t0);
    assert!(player_shoot(&mut s, &config, t0));
    assert!(!player_shoot(&mut s, &config, t0 + ms(100)));
    assert!(player_shoot(&mut s, &config, t0 + ms(250)));
    assert_eq!(s.player_projectiles.len(), 2);
}

#[test]
fn shots_use_the_session_projectile_speed() {
    let config = GameConfig::default();
    let now = Instant::now();
    let speeds = Speeds::initial(&config).scaled(1.2);
    let mut s = init_state(&config, &FrameSet::still(), speeds, now);
    player_shoot(&mut s, &config, now);
    assert!((s.player_projectiles[0].speed() - 12.0).abs() < 1e-4);
}

// ── advance_squadron ──────────────────────────────────────────────────────────

#[test]
fn squadron_moves_in_its_direction() {
    let (config, mut s) = empty_state(Instant::now());
    s.enemies = vec![enemy(0.0, 100.0), enemy(50.0, 100.0)];
    advance_squadron(&mut s, &config);
    assert_eq!(s.enemies[0].sprite.x, 10.0);
    assert_eq!(s.enemies[1].sprite.x, 60.0);
    assert_eq!(s.enemies[0].sprite.y, 100.0);
    assert_eq!(s.squadron.direction, Direction::Right);

    s.squadron.direction = Direction::Left;
    advance_squadron(&mut s, &config);
    assert_eq!(s.enemies[0].sprite.x, 0.0);
}

#[test]
fn one_enemy_crossing_the_bound_bounces_the_whole_squadron() {
    let (config, mut s) = empty_state(Instant::now());
    s.enemies = vec![enemy(345.0, 100.0), enemy(0.0, 200.0), enemy(-100.0, 150.0)];
    advance_squadron(&mut s, &config);

    assert_eq!(s.squadron.direction, Direction::Left);
    let ys: Vec<f32> = s.enemies.iter().map(|e| e.sprite.y).collect();
    assert_eq!(ys, vec![60.0, 160.0, 110.0]);

    // Next advance heads back in without another drop.
    advance_squadron(&mut s, &config);
    assert_eq!(s.enemies[0].sprite.x, 345.0);
    assert_eq!(s.enemies[0].sprite.y, 60.0);
    assert_eq!(s.squadron.direction, Direction::Left);
}

#[test]
fn left_bound_bounces_too() {
    let (config, mut s) = empty_state(Instant::now());
    s.squadron.direction = Direction::Left;
    s.enemies = vec![enemy(-345.0, 100.0), enemy(0.0, 100.0)];
    advance_squadron(&mut s, &config);
    assert_eq!(s.squadron.direction, Direction::Right);
    assert!(s.enemies.iter().all(|e| e.sprite.y == 60.0));
}

// ── move_projectiles ──────────────────────────────────────────────────────────

#[test]
fn projectiles_leaving_the_field_are_dropped() {
    let (config, mut s) = empty_state(Instant::now());
    s.player_projectiles = vec![
        Projectile::new(0.0, 295.0, Heading::Up, 10.0, Animation::still()),
        Projectile::new(0.0, 0.0, Heading::Up, 10.0, Animation::still()),
    ];
    s.enemy_projectiles = vec![
        Projectile::new(0.0, -295.0, Heading::Down, 10.0, Animation::still()),
        Projectile::new(0.0, 0.0, Heading::Down, 10.0, Animation::still()),
    ];
    move_projectiles(&mut s, &config);

    assert_eq!(s.player_projectiles.len(), 1);
    assert_eq!(s.player_projectiles[0].sprite.y, 10.0);
    assert_eq!(s.enemy_projectiles.len(), 1);
    assert_eq!(s.enemy_projectiles[0].sprite.y, -10.0);
}

#[test]
fn bounds_cleanup_runs_during_tick_without_scoring() {
    let now = Instant::now();
    let (config, mut s) = empty_state(now);
    s.enemies = vec![enemy(0.0, 100.0)];
    s.player_projectiles = vec![Projectile::new(300.0, 295.0, Heading::Up, 10.0, Animation::still())];
    let report = tick(&mut s, &config, now + ms(20), &mut seeded_rng());
    assert!(s.player_projectiles.is_empty());
    assert!(report.events.is_empty());
    assert_eq!(s.status, GameStatus::Playing);
}

// ── enemy_fire ────────────────────────────────────────────────────────────────

#[test]
fn enemy_fire_spawns_downward_shot_from_an_enemy() {
    let (mut config, mut s) = empty_state(Instant::now());
    config.enemy_fire_chance = 1.0;
    s.enemies = vec![enemy(-50.0, 100.0), enemy(50.0, 120.0)];
    let mut rng = seeded_rng();
    assert!(enemy_fire(&mut s, &config, &mut rng));
    assert_eq!(s.enemy_projectiles.len(), 1);
    let shot = &s.enemy_projectiles[0];
    assert_eq!(shot.heading(), Heading::Down);
    assert!(s
        .enemies
        .iter()
        .any(|e| e.sprite.x == shot.sprite.x && e.sprite.y == shot.sprite.y));
}

#[test]
fn enemy_fire_never_happens_at_zero_chance() {
    let (config, mut s) = empty_state(Instant::now());
    s.enemies = vec![enemy(0.0, 100.0)];
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        assert!(!enemy_fire(&mut s, &config, &mut rng));
    }
    assert!(s.enemy_projectiles.is_empty());
}

#[test]
fn enemy_fire_needs_enemies() {
    let (mut config, mut s) = empty_state(Instant::now());
    config.enemy_fire_chance = 1.0;
    assert!(!enemy_fire(&mut s, &config, &mut seeded_rng()));
}

#[test]
fn enemy_fire_rate_is_about_five_percent() {
    let config = GameConfig::default();
    let mut s = make_state(&config, Instant::now());
    let mut rng = seeded_rng();
    let shots = (0..10_000).filter(|_| enemy_fire(&mut s, &config, &mut rng)).count();
    assert!((350..650).contains(&shots), "shots = {shots}");
}

// ── animate ───────────────────────────────────────────────────────────────────

#[test]
fn animate_steps_every_entity() {
    let config = quiet_config();
    let frames = FrameSet::load(&GlyphAtlas::default()).unwrap();
    let now = Instant::now();
    let mut s = init_state(&config, &frames, Speeds::initial(&config), now);
    player_shoot(&mut s, &config, now);

    animate(&mut s, &config, now);
    assert_eq!(s.player.sprite.animation.index(), 1);
    assert!(s.enemies.iter().all(|e| e.sprite.animation.index() == 1));
    assert!(s.barriers.iter().all(|b| b.sprite.animation.index() == 1));
    assert_eq!(s.player_projectiles[0].sprite.animation.index(), 1);

    animate(&mut s, &config, now);
    assert_eq!(s.player.sprite.animation.index(), 0); // two ship frames
}

#[test]
fn background_frame_follows_the_clock() {
    let config = quiet_config();
    let frames = FrameSet::load(&GlyphAtlas::default()).unwrap();
    let now = Instant::now();
    let mut s = init_state(&config, &frames, Speeds::initial(&config), now);
    animate(&mut s, &config, now + ms(250));
    assert_eq!(s.background.index(), 2);
    animate(&mut s, &config, now + ms(450));
    assert_eq!(s.background.index(), 0); // four background frames
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn squadron_advances_only_on_its_interval() {
    let config = quiet_config();
    let t0 = Instant::now();
    let mut s = make_state(&config, t0);
    let mut rng = seeded_rng();
    let x0 = s.enemies[0].sprite.x;

    tick(&mut s, &config, t0 + ms(20), &mut rng);
    assert_eq!(s.enemies[0].sprite.x, x0);

    tick(&mut s, &config, t0 + ms(300), &mut rng);
    assert_eq!(s.enemies[0].sprite.x, x0 + 10.0);

    tick(&mut s, &config, t0 + ms(320), &mut rng);
    assert_eq!(s.enemies[0].sprite.x, x0 + 10.0);
    assert_eq!(s.frame, 3);
}

#[test]
fn tick_marks_level_complete_when_squadron_is_gone() {
    let now = Instant::now();
    let (config, mut s) = empty_state(now);
    let report = tick(&mut s, &config, now + ms(20), &mut seeded_rng());
    assert_eq!(s.status, GameStatus::LevelComplete);
    assert!(report.contains(GameEvent::LevelCleared));
}

#[test]
fn tick_does_nothing_after_game_over() {
    let config = quiet_config();
    let now = Instant::now();
    let mut s = make_state(&config, now);
    s.status = GameStatus::GameOver;
    s.player_projectiles = vec![Projectile::new(0.0, 0.0, Heading::Up, 10.0, Animation::still())];
    let x0 = s.enemies[0].sprite.x;

    let report = tick(&mut s, &config, now + ms(1000), &mut seeded_rng());
    assert!(report.events.is_empty());
    assert_eq!(s.player_projectiles[0].sprite.y, 0.0);
    assert_eq!(s.enemies[0].sprite.x, x0);
    assert_eq!(s.frame, 0);
}

#[test]
fn tick_reports_enemy_fire() {
    let config = GameConfig {
        enemy_fire_chance: 1.0,
        ..GameConfig::default()
    };
    let now = Instant::now();
    let mut s = make_state(&config, now);
    let report = tick(&mut s, &config, now + ms(20), &mut seeded_rng());
    assert_eq!(report.count(GameEvent::AlienFired), 1);
    assert_eq!(s.enemy_projectiles.len(), 1);
}
