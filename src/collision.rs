//! Collision detection and resolution.
//!
//! Every pairwise test is the same: centre distance strictly below the hit
//! radius.  Rules run in a fixed precedence order and simultaneous hits are
//! settled by that order, not by which pair is closer.  Removals are
//! collected as indices during a pass and compacted afterwards, so no rule
//! ever mutates a collection it is iterating.

use crate::compute::GameEvent;
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Sprite};

pub fn within_hit_radius(a: &Sprite, b: &Sprite, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Resolve all collisions for one tick, appending what happened to `events`.
///
/// 1. Player projectile vs enemy: both destroyed, first enemy found wins.
/// 2. Remaining player projectiles vs barriers: projectile absorbed.
/// 3. Enemy projectile vs ship: game over, stop immediately.
/// 4. Otherwise enemy projectile vs barriers: projectile absorbed.
/// 5. Otherwise enemy projectile vs player projectile: both destroyed.
/// 6. Any enemy within the overrun margin of the ship's row: game over.
pub fn resolve_collisions(state: &mut GameState, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let radius = config.hit_radius;

    // ── 1 & 2. Player fire ───────────────────────────────────────────────────
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut spent_shots: Vec<usize> = Vec::new();

    for (si, shot) in state.player_projectiles.iter().enumerate() {
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| {
                !killed_enemies.contains(ei) && within_hit_radius(&shot.sprite, &enemy.sprite, radius)
            })
            .map(|(ei, _)| ei);

        if let Some(ei) = target {
            killed_enemies.push(ei);
            spent_shots.push(si);
            events.push(GameEvent::AlienHit);
            continue;
        }

        if state
            .barriers
            .iter()
            .any(|barrier| within_hit_radius(&shot.sprite, &barrier.sprite, radius))
        {
            spent_shots.push(si);
            events.push(GameEvent::BarrierHit);
        }
    }

    compact(&mut state.enemies, &killed_enemies);
    compact(&mut state.player_projectiles, &spent_shots);

    // ── 3, 4 & 5. Enemy fire ─────────────────────────────────────────────────
    let mut spent_enemy_shots: Vec<usize> = Vec::new();
    let mut cancelled_shots: Vec<usize> = Vec::new();
    let mut ship_hit = false;

    for (si, shot) in state.enemy_projectiles.iter().enumerate() {
        if within_hit_radius(&shot.sprite, &state.player.sprite, radius) {
            ship_hit = true;
            break;
        }

        if state
            .barriers
            .iter()
            .any(|barrier| within_hit_radius(&shot.sprite, &barrier.sprite, radius))
        {
            spent_enemy_shots.push(si);
            events.push(GameEvent::BarrierHit);
            continue;
        }

        let counter = state
            .player_projectiles
            .iter()
            .enumerate()
            .find(|(pi, player_shot)| {
                !cancelled_shots.contains(pi)
                    && within_hit_radius(&shot.sprite, &player_shot.sprite, radius)
            })
            .map(|(pi, _)| pi);

        if let Some(pi) = counter {
            spent_enemy_shots.push(si);
            cancelled_shots.push(pi);
            events.push(GameEvent::ProjectilesCancelled);
        }
    }

    compact(&mut state.enemy_projectiles, &spent_enemy_shots);
    compact(&mut state.player_projectiles, &cancelled_shots);

    if ship_hit {
        state.status = GameStatus::GameOver;
        events.push(GameEvent::ShipDestroyed);
        return;
    }

    // ── 6. Overrun ───────────────────────────────────────────────────────────
    let line = state.player.sprite.y + config.overrun_margin;
    if state.status == GameStatus::Playing && state.enemies.iter().any(|e| e.sprite.y <= line) {
        state.status = GameStatus::GameOver;
        events.push(GameEvent::Overrun);
    }
}

/// Drop the elements at `removed` (in any order), keeping the rest in order.
fn compact<T>(items: &mut Vec<T>, removed: &[usize]) {
    if removed.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed.contains(&index);
        index += 1;
        keep
    });
}
