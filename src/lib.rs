//! Falling Feast - a two-mode arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! The simulation is platform-free: a front end polls input into a
//! [`sim::FrameInput`], calls [`sim::tick`] once per frame, and reads public
//! state back for drawing. Audible actions surface as [`sim::GameEvent`]s
//! drained from the state each frame.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Frame timestep at the target 60 Hz rate
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions (world units match screen pixels, y grows downward)
    pub const WINDOW_WIDTH: f32 = 1000.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;
    /// Ground line the player stands on in collecting mode
    pub const GROUND_Y: f32 = 700.0;

    /// Player defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(96.0, 160.0);
    pub const PLAYER_SPEED: f32 = 480.0;
    pub const PLAYER_FAST_SPEED: f32 = 900.0;

    /// Bow mounting offset from its owner's top-left corner
    pub const BOW_OFFSET: Vec2 = Vec2::new(50.0, 125.0);

    /// Projectile defaults
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(100.0, 13.0);
    pub const PROJECTILE_SPEED: f32 = 600.0;
    /// Projectiles are culled this far past the playfield edges
    pub const PROJECTILE_CULL_MARGIN: f32 = 100.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: Vec2 = Vec2::new(120.0, 160.0);
    pub const ENEMY_SPEED: f32 = 480.0;
    /// Distance an enemy advances before holding position and shooting
    pub const ENEMY_ADVANCE_DISTANCE: f32 = 400.0;

    /// Broccoli buddy defaults
    pub const BUDDY_SIZE: Vec2 = Vec2::new(100.0, 140.0);
    pub const BUDDY_SPEED: f32 = 480.0;
    pub const BUDDY_DESCEND_DISTANCE: f32 = 400.0;

    /// Falling pickups
    pub const FOOD_SIZE: Vec2 = Vec2::new(80.0, 80.0);
    pub const COIN_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    /// Where a dead enemy drops its coin, relative to the enemy's corner
    pub const COIN_DROP_OFFSET: Vec2 = Vec2::new(60.0, 140.0);
    /// Falling entities spawn this far above the top edge
    pub const SPAWN_Y: f32 = -200.0;
    /// Horizontal margin kept clear of food spawns
    pub const FOOD_SPAWN_MARGIN: f32 = 100.0;

    /// Horizontal pull applied to food under the attraction power-up
    pub const ATTRACTION_PULL_SPEED: f32 = 60.0;
}

/// Unit vector for an angle in degrees (0 points right, y grows downward)
#[inline]
pub fn vec_from_angle_deg(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Aim angle in degrees from `from` toward `to`
#[inline]
pub fn angle_deg_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
