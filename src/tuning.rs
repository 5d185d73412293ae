//! Data-driven game balance
//!
//! Every gameplay constant lives here so it can be tuned without a rebuild.
//! Missing keys in a JSON document fall back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Health ===
    /// Ship health at the start of a run
    pub max_health: u32,
    /// Damage taken per ship/asteroid contact
    pub ship_hit_damage: u32,
    /// Health fraction above which the bar is "safe"
    pub warning_threshold: f32,
    /// Health fraction above which the bar is "warning" (below is critical)
    pub critical_threshold: f32,

    // === Spawning ===
    /// Seconds between asteroid spawns
    pub spawn_interval: f32,
    /// Seconds before the first asteroid of a run
    pub initial_spawn_delay: f32,

    // === Asteroids ===
    /// Depth where asteroids appear
    pub asteroid_spawn_z: f32,
    /// Depth where unconsumed asteroids despawn
    pub asteroid_end_z: f32,
    /// Seconds to travel from spawn depth to end depth
    pub asteroid_travel_time: f32,

    // === Projectiles ===
    /// Distance travelled toward -z before expiring
    pub projectile_range: f32,
    /// Seconds of flight
    pub projectile_travel_time: f32,

    // === Ship ===
    /// Lateral units per second per unit of tilt input
    pub ship_speed_factor: f32,
    /// Gap kept between the ship and the lane edge (collision radius)
    pub ship_margin: f32,
    /// Where the ship enters from at the start of a run
    pub ship_spawn_point: Vec3,
    /// Where the introduction move ends
    pub ship_rest_point: Vec3,
    /// Seconds of the introduction move
    pub intro_duration: f32,

    // === Screens ===
    /// Whether the credits screen is reachable
    pub credits_enabled: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            ship_hit_damage: SHIP_HIT_DAMAGE,
            warning_threshold: HEALTH_WARNING_THRESHOLD,
            critical_threshold: HEALTH_CRITICAL_THRESHOLD,

            spawn_interval: SPAWN_INTERVAL,
            initial_spawn_delay: INITIAL_SPAWN_DELAY,

            asteroid_spawn_z: ASTEROID_SPAWN_Z,
            asteroid_end_z: ASTEROID_END_Z,
            asteroid_travel_time: ASTEROID_TRAVEL_TIME,

            projectile_range: PROJECTILE_RANGE,
            projectile_travel_time: PROJECTILE_TRAVEL_TIME,

            ship_speed_factor: SHIP_SPEED_FACTOR,
            ship_margin: SHIP_MARGIN,
            ship_spawn_point: SHIP_SPAWN_POINT,
            ship_rest_point: Vec3::ZERO,
            intro_duration: INTRO_DURATION,

            credits_enabled: false,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("asteroid_travel_time", self.asteroid_travel_time),
            ("projectile_travel_time", self.projectile_travel_time),
            ("intro_duration", self.intro_duration),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number of seconds",
                });
            }
        }
        if !(self.initial_spawn_delay.is_finite() && self.initial_spawn_delay >= 0.0) {
            return Err(TuningError::Invalid {
                field: "initial_spawn_delay",
                reason: "must not be negative",
            });
        }
        if self.max_health == 0 {
            return Err(TuningError::Invalid {
                field: "max_health",
                reason: "must be greater than zero",
            });
        }
        if self.ship_hit_damage == 0 {
            return Err(TuningError::Invalid {
                field: "ship_hit_damage",
                reason: "must be greater than zero",
            });
        }
        if !(0.0..=1.0).contains(&self.critical_threshold)
            || !(0.0..=1.0).contains(&self.warning_threshold)
            || self.critical_threshold >= self.warning_threshold
        {
            return Err(TuningError::Invalid {
                field: "critical_threshold",
                reason: "thresholds must lie in [0, 1] with critical below warning",
            });
        }
        if !(self.ship_margin.is_finite() && self.ship_margin >= 0.0) {
            return Err(TuningError::Invalid {
                field: "ship_margin",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
