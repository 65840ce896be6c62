//! Per-frame simulation update
//!
//! [`tick`] advances the whole game by one frame: timers, spawners, entity
//! updates (owner before bow), shot resolution, power-up expiry, collision
//! resolution, off-screen marking, compaction, and death handling — in that
//! order. Collision and compaction are separate passes so no collection is
//! ever erased while something else still indexes into it.

use glam::Vec2;
use rand::Rng;

use super::spawn::{spawn_buddy, spawn_enemy_wave, spawn_food_batch};
use super::state::{Coin, GameEvent, GameMode, GameState, Projectile};
use crate::consts::*;

/// Input sampled by the front end for a single frame.
///
/// Movement fields reflect held keys; everything else is a just-pressed edge
/// (including the purchase buttons, which live in the external UI layer).
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire the player bow (edge, not held)
    pub fire: bool,
    /// Current pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Pause toggle
    pub pause: bool,
    /// Title-screen selections
    pub start_collecting: bool,
    pub start_fighting: bool,
    /// Return to the title screen without resetting the run
    pub to_title: bool,
    /// Purchase edges from the UI
    pub level_up: bool,
    pub buy_attraction: bool,
    pub buy_power_up: bool,
    pub buy_buddy: bool,
}

impl FrameInput {
    fn axis(&self) -> Vec2 {
        let x = f32::from(self.move_right) - f32::from(self.move_left);
        let y = f32::from(self.move_down) - f32::from(self.move_up);
        Vec2::new(x, y)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    if state.mode == GameMode::Title {
        if input.start_collecting {
            enter_play_mode(state, GameMode::Collecting);
        } else if input.start_fighting {
            enter_play_mode(state, GameMode::Fighting);
        }
        return;
    }

    if input.to_title {
        state.mode = GameMode::Title;
        state.paused = false;
        state.events.push(GameEvent::Click);
        return;
    }

    if input.pause {
        state.paused = !state.paused;
        state.events.push(GameEvent::Click);
    }
    if state.paused {
        return;
    }

    state.time += f64::from(dt);

    // Player moves first so every bow sees this frame's position
    state
        .player
        .update(dt, state.mode, input.axis(), input.pointer);

    match state.mode {
        GameMode::Collecting => tick_collecting(state, input, dt),
        GameMode::Fighting => tick_fighting(state, input, dt),
        GameMode::Title => unreachable!("title handled above"),
    }

    resolve_collisions(state);
    mark_out_of_bounds(state);
    compact(state);

    if state.player.is_dead {
        state.events.push(GameEvent::Fail);
        log::info!("player died, resetting run");
        state.reset();
    }
}

fn enter_play_mode(state: &mut GameState, mode: GameMode) {
    if state.last_play_mode != mode {
        state.player.swap_mode_position();
        state.last_play_mode = mode;
    }
    state.mode = mode;
    state.events.push(GameEvent::Click);
    log::info!("entering {mode:?} mode");
}

fn tick_collecting(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.collecting_time += f64::from(dt);
    let now = state.collecting_time;

    if input.buy_attraction && state.player.nutrition >= state.tuning.attraction_cost {
        state.player.nutrition -= state.tuning.attraction_cost;
        state.player.attracting = true;
        state.player.attraction_started = now;
        state.events.push(GameEvent::Kaching);
        log::info!("attraction purchased");
    }

    // Spawn cadence tightens as nutrition grows, down to a floor
    let t = &state.tuning;
    state.spawn_interval = (t.spawn_interval_base
        - state.player.nutrition / t.spawn_interval_scale)
        .max(t.spawn_interval_floor);
    state.spawn_batch = match state.player.nutrition {
        n if n > 5000.0 => 5,
        n if n > 2000.0 => 4,
        n if n > 800.0 => 3,
        n if n > 400.0 => 2,
        _ => 1,
    };
    if now - state.spawn_timer >= f64::from(state.spawn_interval) {
        spawn_food_batch(state);
        state.spawn_timer = now;
    }

    // Fall, then recompute side-of-player, then apply any attraction nudge
    let player_cx = state.player.center().x;
    let attracting = state.player.attracting;
    for food in &mut state.foods {
        food.update(dt);
        food.left_of_player = food.center().x <= player_cx;
        if !attracting {
            continue;
        }
        if food.spoiled {
            // Pushed away from the player
            if food.left_of_player {
                food.pos.x -= ATTRACTION_PULL_SPEED * dt;
            } else {
                food.pos.x += ATTRACTION_PULL_SPEED * dt;
            }
        } else {
            // Pulled toward the player's horizontal center, overshoot
            // corrected by one unit per frame
            if food.left_of_player {
                food.pos.x += ATTRACTION_PULL_SPEED * dt;
                if food.center().x > player_cx {
                    food.pos.x -= 1.0;
                }
            } else {
                food.pos.x -= ATTRACTION_PULL_SPEED * dt;
                if food.center().x < player_cx {
                    food.pos.x += 1.0;
                }
            }
        }
    }

    let duration = f64::from(state.tuning.power_up_duration);
    if state.player.attracting && now - state.player.attraction_started >= duration {
        state.player.attracting = false;
        log::debug!("attraction expired");
    }
}

fn tick_fighting(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.fighting_time += f64::from(dt);
    let now = state.fighting_time;

    // A cleared wave refills health and sweeps stray arrows
    if state.enemies.is_empty() {
        spawn_enemy_wave(state);
        state.player.health = state.player.max_health;
        state.projectiles.clear();
    }

    if input.level_up && state.player.nutrition > 0.0 {
        state.player.level += f64::from(state.player.nutrition) / state.tuning.level_nutrition_divisor;
        state.player.nutrition = 0.0;
        state.events.push(GameEvent::LevelUp);
        log::info!("leveled up to {:.2}", state.player.level);
    }

    if input.buy_power_up && state.player.coins >= state.tuning.power_up_cost {
        state.player.coins -= state.tuning.power_up_cost;
        state.events.push(GameEvent::Kaching);
        if state.rng.random_bool(0.5) {
            state.player.extra_fast = true;
            state.player.speed_started = now;
            log::info!("speed power-up purchased");
        } else {
            state.player.immune = true;
            state.player.immunity_started = now;
            log::info!("immunity power-up purchased");
        }
    }

    if input.buy_buddy && state.player.coins >= state.tuning.buddy_cost {
        state.player.coins -= state.tuning.buddy_cost;
        state.events.push(GameEvent::Kaching);
        spawn_buddy(state);
    }

    // Player bow follows the refreshed player, aims at the pointer
    state.player_bow.follow(state.player.pos);
    state.player_bow.aim_at(input.pointer);
    if input.fire {
        state.player_bow.should_shoot = true;
    }

    for projectile in &mut state.projectiles {
        projectile.update(dt);
    }

    let player_pos = state.player.pos;
    let player_center = state.player.center();
    for enemy in &mut state.enemies {
        enemy.update(dt, now, player_pos);
        enemy.bow.follow(enemy.pos);
        enemy.bow.aim_at(player_center);
    }

    for buddy in &mut state.buddies {
        buddy.update(dt, now, &state.enemies);
    }

    // Consume one-frame shot requests into new projectiles
    let mut shots: Vec<Projectile> = Vec::new();
    if state.player_bow.take_shot_request() {
        let damage = state.player_bow.damage(state.player.level);
        shots.push(Projectile::new(
            state.player_bow.pos,
            state.player_bow.angle_deg,
            true,
            damage,
        ));
    }
    for enemy in &mut state.enemies {
        if std::mem::take(&mut enemy.should_shoot) {
            shots.push(Projectile::new(enemy.bow.pos, enemy.bow.angle_deg, false, 0.0));
        }
    }
    let level = state.player.level;
    for buddy in &mut state.buddies {
        if buddy.bow.take_shot_request() {
            let damage = buddy.bow.damage(level);
            shots.push(Projectile::new(buddy.bow.pos, buddy.bow.angle_deg, true, damage));
        }
    }
    for _ in &shots {
        state.events.push(GameEvent::Shoot);
    }
    state.projectiles.extend(shots);

    let duration = f64::from(state.tuning.power_up_duration);
    if state.player.extra_fast && now - state.player.speed_started >= duration {
        state.player.extra_fast = false;
        log::debug!("speed power-up expired");
    }
    if state.player.immune && now - state.player.immunity_started >= duration {
        state.player.immune = false;
        log::debug!("immunity power-up expired");
    }
}

/// Mode-gated collision resolution. Hits only set destroy flags; nothing is
/// removed until [`compact`].
fn resolve_collisions(state: &mut GameState) {
    match state.mode {
        GameMode::Collecting => {
            let player_rect = state.player.rect();
            for food in &mut state.foods {
                if food.destroyed {
                    continue;
                }
                if food.rect().overlaps(&player_rect) {
                    state.player.eat(food.signed_value());
                    food.destroyed = true;
                    state.events.push(GameEvent::Bite);
                }
            }
        }
        GameMode::Fighting => {
            let player_rect = state.player.rect();

            // Hostile arrows vs player; skipped entirely under immunity so
            // arrows pass straight through
            if !state.player.immune {
                let (lo, hi) = state.tuning.hostile_damage;
                for projectile in &mut state.projectiles {
                    if projectile.destroyed || projectile.from_player {
                        continue;
                    }
                    if player_rect.overlaps_corners(&projectile.corners) {
                        let damage = state.rng.random_range(lo..=hi) as f32;
                        state.player.apply_damage(damage);
                        projectile.destroyed = true;
                        state.events.push(GameEvent::Hit);
                    }
                }
            }

            // Player-side arrows vs enemies; the first qualifying overlap in
            // entity order consumes the arrow
            for enemy in &mut state.enemies {
                let enemy_rect = enemy.rect();
                for projectile in &mut state.projectiles {
                    if projectile.destroyed || !projectile.from_player {
                        continue;
                    }
                    if enemy_rect.overlaps_corners(&projectile.corners) {
                        enemy.health = (enemy.health - projectile.damage).max(0.0);
                        projectile.destroyed = true;
                        state.events.push(GameEvent::Hit);
                    }
                }
            }

            for coin in &mut state.coins {
                if coin.destroyed {
                    continue;
                }
                if coin.rect().overlaps(&player_rect) {
                    state.player.coins += 1;
                    coin.destroyed = true;
                    state.events.push(GameEvent::Collect);
                }
            }
        }
        GameMode::Title => {}
    }
}

/// Flag entities that left the playfield
fn mark_out_of_bounds(state: &mut GameState) {
    match state.mode {
        GameMode::Collecting => {
            for food in &mut state.foods {
                if food.pos.y > WINDOW_HEIGHT {
                    food.destroyed = true;
                }
            }
        }
        GameMode::Fighting => {
            for projectile in &mut state.projectiles {
                if projectile.out_of_bounds() {
                    projectile.destroyed = true;
                }
            }
        }
        GameMode::Title => {}
    }
}

/// Compaction pass: filter every collection on its destroy flags. Dead
/// enemies convert into dropped coins here.
fn compact(state: &mut GameState) {
    state.foods.retain(|f| !f.destroyed);
    state.projectiles.retain(|p| !p.destroyed);

    let mut drops: Vec<Vec2> = Vec::new();
    state.enemies.retain(|e| {
        if e.is_dead() {
            drops.push(e.pos + COIN_DROP_OFFSET);
            false
        } else {
            true
        }
    });
    for pos in drops {
        state.coins.push(Coin::new(pos));
    }

    state.coins.retain(|c| !c.destroyed);
    state.buddies.retain(|b| !b.destroyed);
}
