//! Space Master - game session core for an arcade 3D space shooter
//!
//! The ship slides along a lane dodging and shooting asteroids. Rendering,
//! audio, physics contact detection and platform services live outside this
//! crate and talk to it through the collaborator traits in [`sim::events`] and
//! [`platform`].
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, screens)
//! - `platform`: Input collaborator seam
//! - `tuning`: Data-driven game balance
//! - `achievements` / `highscores`: Game-over milestones and local leaderboard
//!
//! # Threading
//!
//! A [`sim::GameSession`] is driven from a single logical thread: the per-frame
//! `tick` and the contact callback must never run concurrently. The session
//! does no internal locking.

pub mod achievements;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use achievements::Milestone;
pub use error::{SessionError, TuningError};
pub use highscores::HighScores;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep used by the demo driver (60 Hz, matches the display)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Health defaults
    pub const MAX_HEALTH: u32 = 100;
    pub const SHIP_HIT_DAMAGE: u32 = 25;
    pub const HEALTH_WARNING_THRESHOLD: f32 = 0.6;
    pub const HEALTH_CRITICAL_THRESHOLD: f32 = 0.3;

    /// Spawn cadence (seconds)
    pub const SPAWN_INTERVAL: f32 = 0.25;
    pub const INITIAL_SPAWN_DELAY: f32 = 1.0;

    /// Asteroid travel: spawn depth to despawn depth
    pub const ASTEROID_SPAWN_Z: f32 = -100.0;
    pub const ASTEROID_END_Z: f32 = 50.0;
    pub const ASTEROID_TRAVEL_TIME: f32 = 3.0;

    /// Shots fly toward -z
    pub const PROJECTILE_RANGE: f32 = 150.0;
    pub const PROJECTILE_TRAVEL_TIME: f32 = 1.0;

    /// Ship lateral speed per unit of tilt (units/s)
    pub const SHIP_SPEED_FACTOR: f32 = 200.0;
    /// Ship collision radius kept clear of the lane edge
    pub const SHIP_MARGIN: f32 = 2.0;
    /// Ship enters from above and behind the camera
    pub const SHIP_SPAWN_POINT: Vec3 = Vec3::new(0.0, 50.0, 50.0);
    pub const INTRO_DURATION: f32 = 1.0;
}

/// Linear interpolation between two points, `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from.lerp(to, t.clamp(0.0, 1.0))
}
