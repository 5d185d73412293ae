//! Screen state, ship and lane geometry

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen, waiting for a tap
    Title,
    /// Ship flying in from its spawn point; no spawning yet
    Introduction,
    /// Active gameplay
    Playing,
    /// Run ended, final score shown
    GameOver,
    /// Credits screen (only when enabled in tuning)
    Credits,
}

impl GameState {
    /// Whether entities may be created and collisions resolved
    pub fn is_simulating(self) -> bool {
        self == GameState::Playing
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub position: Vec3,
    /// Last tilt-derived lateral input
    pub velocity_input: f32,
    pub alive: bool,
}

impl Ship {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity_input: 0.0,
            alive: true,
        }
    }

    /// Put the ship back at `position`, alive and still
    pub fn respawn_at(&mut self, position: Vec3) {
        self.position = position;
        self.velocity_input = 0.0;
        self.alive = true;
    }

    /// Integrate lateral movement and clamp to `[-limit, limit]`.
    /// Returns true if the position changed.
    pub fn steer(&mut self, velocity_input: f32, speed_factor: f32, dt: f32, limit: f32) -> bool {
        self.velocity_input = velocity_input;
        let old_x = self.position.x;
        let new_x = (old_x + velocity_input * speed_factor * dt).clamp(-limit, limit);
        self.position.x = new_x;
        new_x != old_x
    }
}

/// Viewport/projection parameters the lane width is derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width over height
    pub aspect: f32,
    /// Vertical field of view
    pub fov_y_degrees: f32,
    /// Distance from the camera to the ship's plane
    pub camera_distance: f32,
}

/// Lane rectangle: lateral extent plus the depth band asteroids travel through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub half_width: f32,
    /// Spawn depth (farthest from the camera)
    pub far_z: f32,
    /// Despawn depth (behind the ship)
    pub near_z: f32,
}

impl Bounds {
    pub fn new(half_width: f32, far_z: f32, near_z: f32) -> Self {
        Self {
            half_width: half_width.abs(),
            far_z,
            near_z,
        }
    }

    /// Half-width of the visible plane at the camera distance
    pub fn from_viewport(viewport: &Viewport, tuning: &Tuning) -> Self {
        let half_fov = viewport.fov_y_degrees.to_radians() / 2.0;
        let half_width = viewport.camera_distance * half_fov.tan() * viewport.aspect;
        Self::new(half_width, tuning.asteroid_spawn_z, tuning.asteroid_end_z)
    }

    pub fn min_x(&self) -> f32 {
        -self.half_width
    }

    pub fn max_x(&self) -> f32 {
        self.half_width
    }

    /// Furthest the ship center may go from the lane center
    pub fn ship_limit(&self, margin: f32) -> f32 {
        (self.half_width - margin).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_clamps_to_limit() {
        let mut ship = Ship::new(Vec3::ZERO);
        assert!(ship.steer(1.0, 200.0, 1.0, 18.0));
        assert_eq!(ship.position.x, 18.0);
        assert!(ship.steer(-1.0, 200.0, 1.0, 18.0));
        assert_eq!(ship.position.x, -18.0);
        // Already at the wall: no change
        assert!(!ship.steer(-1.0, 200.0, 1.0, 18.0));
    }

    #[test]
    fn test_steer_integrates_velocity() {
        let mut ship = Ship::new(Vec3::ZERO);
        ship.steer(0.5, 200.0, 0.01, 100.0);
        assert!((ship.position.x - 1.0).abs() < 1e-5);
        assert_eq!(ship.velocity_input, 0.5);
    }

    #[test]
    fn test_bounds_from_viewport() {
        let viewport = Viewport {
            aspect: 2.0,
            fov_y_degrees: 90.0,
            camera_distance: 10.0,
        };
        let bounds = Bounds::from_viewport(&viewport, &Tuning::default());
        assert!((bounds.half_width - 20.0).abs() < 1e-4);
        assert_eq!(bounds.far_z, -100.0);
        assert_eq!(bounds.near_z, 50.0);
    }

    #[test]
    fn test_ship_limit_never_negative() {
        let bounds = Bounds::new(1.0, -100.0, 50.0);
        assert_eq!(bounds.ship_limit(2.0), 0.0);
        assert_eq!(Bounds::new(20.0, -100.0, 50.0).ship_limit(2.0), 18.0);
    }
}
