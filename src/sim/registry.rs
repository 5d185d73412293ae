//! Live asteroid and projectile bookkeeping
//!
//! Entities are identified by [`EntityId`]; the renderer keeps its own
//! id -> visual mapping. Ids come from a single counter that is never rewound
//! during the registry's lifetime, so no two entities ever share one.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque identity of an asteroid or projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Straight-line travel: `displacement` covered over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub displacement: Vec3,
    pub duration: f32,
}

/// Progress of one entity along its [`Motion`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Travel {
    pub origin: Vec3,
    pub motion: Motion,
    pub elapsed: f32,
    /// Spawned this tick; starts moving on the next advance
    fresh: bool,
}

impl Travel {
    fn new(origin: Vec3, motion: Motion) -> Self {
        Self {
            origin,
            motion,
            elapsed: 0.0,
            fresh: true,
        }
    }

    /// Fraction of the path covered, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.motion.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.motion.duration).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec3 {
        self.origin + self.motion.displacement * self.progress()
    }

    /// Returns true once the full duration has elapsed
    fn advance(&mut self, dt: f32) -> bool {
        if self.fresh {
            self.fresh = false;
            return false;
        }
        self.elapsed += dt;
        self.elapsed >= self.motion.duration
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub travel: Travel,
}

impl Asteroid {
    pub fn position(&self) -> Vec3 {
        self.travel.position()
    }
}

/// A shot fired from the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub travel: Travel,
}

impl Projectile {
    pub fn position(&self) -> Vec3 {
        self.travel.position()
    }
}

/// Which set an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Asteroid,
    Projectile,
}

/// Owns the alive sets. Pure bookkeeping, no collision tests.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    asteroid_motion: Motion,
    projectile_motion: Motion,
    /// Sorted by id (spawn order) for deterministic iteration
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new(asteroid_motion: Motion, projectile_motion: Motion) -> Self {
        Self {
            asteroid_motion,
            projectile_motion,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    /// Path for asteroids spawned from now on. Live asteroids keep theirs.
    pub fn set_asteroid_motion(&mut self, motion: Motion) {
        self.asteroid_motion = motion;
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_asteroid(&mut self, position: Vec3) -> EntityId {
        let id = self.next_entity_id();
        self.asteroids.push(Asteroid {
            id,
            travel: Travel::new(position, self.asteroid_motion),
        });
        id
    }

    pub fn spawn_projectile(&mut self, origin: Vec3) -> EntityId {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            travel: Travel::new(origin, self.projectile_motion),
        });
        id
    }

    /// Remove an entity from whichever set holds it.
    /// Returns the kind removed, or `None` if it was already gone.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityKind> {
        if let Some(idx) = self.asteroids.iter().position(|a| a.id == id) {
            self.asteroids.remove(idx);
            return Some(EntityKind::Asteroid);
        }
        if let Some(idx) = self.projectiles.iter().position(|p| p.id == id) {
            self.projectiles.remove(idx);
            return Some(EntityKind::Projectile);
        }
        None
    }

    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        if self.asteroids.iter().any(|a| a.id == id) {
            Some(EntityKind::Asteroid)
        } else if self.projectiles.iter().any(|p| p.id == id) {
            Some(EntityKind::Projectile)
        } else {
            None
        }
    }

    pub fn asteroid(&self, id: EntityId) -> Option<&Asteroid> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn all_asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn all_projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.asteroids.len() + self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty() && self.projectiles.is_empty()
    }

    /// Remove everything, returning the ids that were alive
    pub fn clear(&mut self) -> Vec<EntityId> {
        self.asteroids
            .drain(..)
            .map(|a| a.id)
            .chain(self.projectiles.drain(..).map(|p| p.id))
            .collect()
    }

    /// Move every entity along its path and drop the ones whose travel ran out.
    /// Returns the expired ids.
    pub fn advance(&mut self, dt: f32) -> Vec<EntityId> {
        let mut expired = Vec::new();
        self.asteroids.retain_mut(|a| {
            let done = a.travel.advance(dt);
            if done {
                expired.push(a.id);
            }
            !done
        });
        self.projectiles.retain_mut(|p| {
            let done = p.travel.advance(dt);
            if done {
                expired.push(p.id);
            }
            !done
        });
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> EntityRegistry {
        EntityRegistry::new(
            Motion {
                displacement: Vec3::new(0.0, 0.0, 150.0),
                duration: 3.0,
            },
            Motion {
                displacement: Vec3::new(0.0, 0.0, -150.0),
                duration: 1.0,
            },
        )
    }

    #[test]
    fn test_zero_duration_travel_lands_at_end() {
        let mut reg = EntityRegistry::new(
            Motion {
                displacement: Vec3::new(0.0, 0.0, 150.0),
                duration: 0.0,
            },
            Motion {
                displacement: Vec3::new(0.0, 0.0, -150.0),
                duration: 1.0,
            },
        );
        let a = reg.spawn_asteroid(Vec3::new(1.0, 0.0, -100.0));
        let pos = reg.asteroid(a).unwrap().position();
        assert!(pos.is_finite());
        assert_eq!(pos.z, 50.0);
    }

    #[test]
    fn test_new_motion_applies_to_later_spawns() {
        let mut reg = registry();
        let old = reg.spawn_asteroid(Vec3::ZERO);
        reg.set_asteroid_motion(Motion {
            displacement: Vec3::new(0.0, 0.0, 100.0),
            duration: 3.0,
        });
        let new = reg.spawn_asteroid(Vec3::ZERO);
        assert_eq!(reg.asteroid(old).unwrap().travel.motion.displacement.z, 150.0);
        assert_eq!(reg.asteroid(new).unwrap().travel.motion.displacement.z, 100.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut reg = registry();
        let a = reg.spawn_asteroid(Vec3::ZERO);
        let b = reg.spawn_projectile(Vec3::ZERO);
        let c = reg.spawn_asteroid(Vec3::ZERO);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut reg = registry();
        let a = reg.spawn_asteroid(Vec3::ZERO);
        reg.clear();
        let b = reg.spawn_asteroid(Vec3::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut reg = registry();
        let a = reg.spawn_asteroid(Vec3::ZERO);
        let p = reg.spawn_projectile(Vec3::ZERO);
        assert_eq!(reg.remove(a), Some(EntityKind::Asteroid));
        assert_eq!(reg.remove(a), None);
        assert_eq!(reg.remove(p), Some(EntityKind::Projectile));
        assert_eq!(reg.remove(p), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_clear_returns_alive_ids() {
        let mut reg = registry();
        let a = reg.spawn_asteroid(Vec3::ZERO);
        let p = reg.spawn_projectile(Vec3::ZERO);
        let mut cleared = reg.clear();
        cleared.sort();
        assert_eq!(cleared, vec![a, p]);
        assert!(reg.is_empty());
        assert!(reg.clear().is_empty());
    }

    #[test]
    fn test_fresh_entity_waits_one_advance() {
        let mut reg = registry();
        let a = reg.spawn_asteroid(Vec3::new(4.0, 0.0, -100.0));
        assert!(reg.advance(0.5).is_empty());
        assert_eq!(reg.asteroid(a).unwrap().position().z, -100.0);
        reg.advance(1.5);
        let pos = reg.asteroid(a).unwrap().position();
        assert!((pos.z - -25.0).abs() < 1e-4);
        assert_eq!(pos.x, 4.0);
    }

    #[test]
    fn test_expiry_by_travel_time() {
        let mut reg = registry();
        let a = reg.spawn_asteroid(Vec3::ZERO);
        let p = reg.spawn_projectile(Vec3::ZERO);
        reg.advance(0.0);

        // Projectile lasts 1.0s, asteroid 3.0s
        assert_eq!(reg.advance(1.0), vec![p]);
        assert_eq!(reg.all_asteroids().len(), 1);
        assert!(reg.advance(1.5).is_empty());
        assert_eq!(reg.advance(0.5), vec![a]);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut travel = Travel::new(
            Vec3::ZERO,
            Motion {
                displacement: Vec3::X,
                duration: 1.0,
            },
        );
        travel.advance(0.0);
        travel.advance(5.0);
        assert_eq!(travel.progress(), 1.0);
        assert_eq!(travel.position(), Vec3::X);
    }
}
