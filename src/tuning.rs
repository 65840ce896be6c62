//! Data-driven game balance
//!
//! Every balance number the simulation consults lives here so a front end can
//! override it from JSON without recompiling. Defaults reproduce the shipped
//! game feel.

use serde::{Deserialize, Serialize};

/// Balance table consulted by the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player vitals at a fresh run
    pub player_max_health: f32,
    pub starting_nutrition: f32,

    /// Bow damage: base plus per-whole-level bonus (player and buddy bows)
    pub bow_base_damage: f32,
    pub bow_damage_per_level: f32,
    /// Hostile hit damage, rolled per hit over this inclusive range
    pub hostile_damage: (u32, u32),

    pub enemy_health: f32,
    /// Enemy fire cooldown, drawn per spawn from this range (seconds)
    pub enemy_fire_cooldown: (f32, f32),

    /// Buddy fire cooldown, drawn per spawn from this range (seconds)
    pub buddy_fire_cooldown: (f32, f32),
    /// Seconds a buddy survives after it starts hovering
    pub buddy_lifetime: f32,

    /// Seconds every timed power-up lasts
    pub power_up_duration: f32,

    /// Food fall speed, drawn per spawn from this range (units/second)
    pub food_fall_speed: (f32, f32),
    /// Food spawn cadence: interval = max(base - nutrition / scale, floor)
    pub spawn_interval_base: f32,
    pub spawn_interval_floor: f32,
    pub spawn_interval_scale: f32,

    /// Purchase prices
    pub attraction_cost: f32,
    pub power_up_cost: u32,
    pub buddy_cost: u32,
    /// Level-up conversion: level += nutrition / divisor
    pub level_nutrition_divisor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_health: 100.0,
            starting_nutrition: 100.0,
            bow_base_damage: 10.0,
            bow_damage_per_level: 2.0,
            hostile_damage: (5, 10),
            enemy_health: 50.0,
            enemy_fire_cooldown: (2.0, 2.5),
            buddy_fire_cooldown: (0.2, 0.5),
            buddy_lifetime: 20.0,
            power_up_duration: 25.0,
            food_fall_speed: (300.0, 420.0),
            spawn_interval_base: 2.0,
            spawn_interval_floor: 1.2,
            spawn_interval_scale: 3500.0,
            attraction_cost: 1000.0,
            power_up_cost: 15,
            buddy_cost: 20,
            level_nutrition_divisor: 500.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_balance() {
        let t = Tuning::default();
        assert_eq!(t.power_up_duration, 25.0);
        assert_eq!(t.enemy_health, 50.0);
        assert_eq!(t.bow_base_damage, 10.0);
        assert_eq!(t.hostile_damage, (5, 10));
        assert_eq!(t.spawn_interval_floor, 1.2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{"enemy_health": 75.0, "buddy_cost": 30}"#)
            .expect("valid tuning json");
        assert_eq!(t.enemy_health, 75.0);
        assert_eq!(t.buddy_cost, 30);
        // Untouched fields fall back to defaults
        assert_eq!(t.power_up_duration, 25.0);
        assert_eq!(t.power_up_cost, 15);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Tuning::from_json("{not json").is_err());
    }
}
