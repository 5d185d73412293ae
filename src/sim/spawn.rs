//! Asteroid spawn timing

use glam::Vec3;

use super::rng::RandomSource;
use super::state::Bounds;

/// Where the next asteroid enters play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub x: f32,
    pub z: f32,
}

impl SpawnRequest {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }
}

/// Countdown that emits one spawn each time it runs out.
///
/// The caller only ticks it while playing.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    time_to_spawn: f32,
    spawn_interval: f32,
}

impl SpawnScheduler {
    /// First spawn fires one full interval after creation
    pub fn new(spawn_interval: f32) -> Self {
        Self {
            time_to_spawn: spawn_interval,
            spawn_interval,
        }
    }

    /// Restart the countdown with a custom first delay
    pub fn reset(&mut self, initial_delay: f32) {
        self.time_to_spawn = initial_delay;
    }

    pub fn time_to_spawn(&self) -> f32 {
        self.time_to_spawn
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Advance the countdown. At most one spawn per call; overshoot is dropped.
    pub fn tick(
        &mut self,
        dt: f32,
        bounds: &Bounds,
        rng: &mut dyn RandomSource,
    ) -> Option<SpawnRequest> {
        self.time_to_spawn -= dt;
        if self.time_to_spawn > 0.0 {
            return None;
        }
        self.time_to_spawn = self.spawn_interval;
        let x = rng.uniform(bounds.min_x(), bounds.max_x());
        Some(SpawnRequest { x, z: bounds.far_z })
    }
}
