//! Entity spawners
//!
//! Each spawner appends to a collection owned by [`GameState`] using the
//! state's seeded RNG. Spawn triggers (intervals, empty-wave checks, purchase
//! edges) live in the controller; this module only creates entities.

use glam::Vec2;
use rand::Rng;

use super::state::{Buddy, Enemy, Food, FoodKind, GameState};
use crate::consts::*;

/// Fixed wave formation: two per flank, one from below
pub const ENEMY_FORMATION: [Vec2; 5] = [
    Vec2::new(-100.0, 200.0),
    Vec2::new(-100.0, WINDOW_HEIGHT - 200.0),
    Vec2::new(WINDOW_WIDTH + 100.0, 200.0),
    Vec2::new(WINDOW_WIDTH + 100.0, WINDOW_HEIGHT - 200.0),
    Vec2::new(500.0, WINDOW_HEIGHT + 100.0),
];

/// Spawn one batch of falling food above the top edge. Each item draws a
/// 50/50 fresh/spoiled coin flip, a uniform variant and a fall speed from
/// the tuning range.
pub fn spawn_food_batch(state: &mut GameState) {
    let (speed_lo, speed_hi) = state.tuning.food_fall_speed;
    for _ in 0..state.spawn_batch {
        let x = state
            .rng
            .random_range(FOOD_SPAWN_MARGIN..=WINDOW_WIDTH - FOOD_SPAWN_MARGIN);
        let spoiled = state.rng.random_bool(0.5);
        let kind = FoodKind::ALL[state.rng.random_range(0..FoodKind::ALL.len())];
        let fall_speed = state.rng.random_range(speed_lo..=speed_hi);
        state
            .foods
            .push(Food::new(kind, spoiled, Vec2::new(x, SPAWN_Y), fall_speed));
    }
    log::debug!(
        "spawned {} food item(s), {} falling",
        state.spawn_batch,
        state.foods.len()
    );
}

/// Spawn a full wave at the fixed formation positions
pub fn spawn_enemy_wave(state: &mut GameState) {
    let (cd_lo, cd_hi) = state.tuning.enemy_fire_cooldown;
    for pos in ENEMY_FORMATION {
        let cooldown = state.rng.random_range(cd_lo..=cd_hi);
        state.enemies.push(Enemy::new(pos, cooldown, &state.tuning));
    }
    log::info!("enemy wave spawned ({} enemies)", ENEMY_FORMATION.len());
}

/// Spawn a purchased buddy at a random x above the top edge
pub fn spawn_buddy(state: &mut GameState) {
    let x = state.rng.random_range(100.0..=WINDOW_WIDTH - 200.0);
    let (cd_lo, cd_hi) = state.tuning.buddy_fire_cooldown;
    let cooldown = state.rng.random_range(cd_lo..=cd_hi);
    state
        .buddies
        .push(Buddy::new(Vec2::new(x, SPAWN_Y), cooldown, &state.tuning));
    log::info!("buddy purchased and spawned at x={x:.0}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyPhase;

    #[test]
    fn food_batch_respects_batch_size_and_ranges() {
        let mut state = GameState::new(7);
        state.spawn_batch = 4;
        spawn_food_batch(&mut state);

        assert_eq!(state.foods.len(), 4);
        let (lo, hi) = state.tuning.food_fall_speed;
        for food in &state.foods {
            assert_eq!(food.pos.y, SPAWN_Y);
            assert!(food.pos.x >= FOOD_SPAWN_MARGIN);
            assert!(food.pos.x <= WINDOW_WIDTH - FOOD_SPAWN_MARGIN);
            assert!(food.fall_speed >= lo && food.fall_speed <= hi);
        }
    }

    #[test]
    fn enemy_wave_uses_formation() {
        let mut state = GameState::new(7);
        spawn_enemy_wave(&mut state);

        assert_eq!(state.enemies.len(), 5);
        let (lo, hi) = state.tuning.enemy_fire_cooldown;
        for (enemy, pos) in state.enemies.iter().zip(ENEMY_FORMATION) {
            assert_eq!(enemy.pos, pos);
            assert_eq!(enemy.phase, EnemyPhase::Approaching { traveled: 0.0 });
            assert!(enemy.fire_cooldown >= lo && enemy.fire_cooldown <= hi);
        }
    }

    #[test]
    fn buddy_spawns_above_screen() {
        let mut state = GameState::new(7);
        spawn_buddy(&mut state);

        assert_eq!(state.buddies.len(), 1);
        let buddy = &state.buddies[0];
        assert_eq!(buddy.pos.y, SPAWN_Y);
        let (lo, hi) = state.tuning.buddy_fire_cooldown;
        assert!(buddy.fire_cooldown >= lo && buddy.fire_cooldown <= hi);
    }
}
