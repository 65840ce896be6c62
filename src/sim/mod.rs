//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Per-frame updates driven by a polled [`FrameInput`]
//! - Seeded RNG only
//! - Two-phase mark-and-compact entity removal
//! - No rendering, audio or windowing dependencies

pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geom::{Rect, corners_overlap, point_in_corners, point_in_triangle, rotated_corners};
pub use state::{
    Bow, BowOwner, Buddy, BuddyPhase, Coin, Enemy, EnemyPhase, Food, FoodKind, GameEvent,
    GameMode, GameState, Player, Projectile,
};
pub use tick::{FrameInput, tick};
