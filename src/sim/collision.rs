//! Contact resolution
//!
//! Geometric detection belongs to the physics collaborator. It reports pairs
//! of tagged bodies; this module decides what each pair means for the game.
//! Pairs are order-independent and unknown pairs are ignored.

use super::health::HealthModel;
use super::registry::{EntityId, EntityKind, EntityRegistry};

/// One participant of a contact, tagged by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Ship,
    Shot(EntityId),
    Asteroid(EntityId),
    /// Anything else the physics world reports (walls, debris, ...)
    Other,
}

impl Body {
    /// Build a body from a physics tag string. `id` is ignored for the ship.
    pub fn from_tag(tag: &str, id: EntityId) -> Self {
        match tag {
            "ship" => Body::Ship,
            "shot" | "bullet" => Body::Shot(id),
            "asteroid" => Body::Asteroid(id),
            _ => Body::Other,
        }
    }
}

/// What a resolved contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// A shot destroyed an asteroid; `score` is the new total
    AsteroidDestroyed {
        asteroid: EntityId,
        shot: EntityId,
        /// False if the shot had already been consumed by an earlier contact
        shot_removed: bool,
        score: u32,
    },
    /// An asteroid struck the ship
    ShipHit {
        asteroid: EntityId,
        health: u32,
        /// Health reached zero for the first time since the last reset
        ship_destroyed: bool,
    },
}

/// Order a pair so the recognised combinations have one canonical form
fn classify(a: Body, b: Body) -> Option<(Body, EntityId)> {
    match (a, b) {
        (Body::Shot(_), Body::Asteroid(asteroid)) => Some((a, asteroid)),
        (Body::Asteroid(asteroid), Body::Shot(_)) => Some((b, asteroid)),
        (Body::Ship, Body::Asteroid(asteroid)) | (Body::Asteroid(asteroid), Body::Ship) => {
            Some((Body::Ship, asteroid))
        }
        _ => None,
    }
}

/// Applies contact rules to the registry, health and score
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    ship_hit_damage: u32,
}

impl CollisionResolver {
    pub fn new(ship_hit_damage: u32) -> Self {
        Self { ship_hit_damage }
    }

    /// Resolve one contact.
    ///
    /// The asteroid must still be alive for anything to happen: physics may
    /// report several contacts for the same asteroid within one frame, and only
    /// the first one counts.
    pub fn resolve(
        &self,
        a: Body,
        b: Body,
        registry: &mut EntityRegistry,
        health: &mut HealthModel,
        score: &mut u32,
    ) -> Option<CollisionOutcome> {
        let (other, asteroid) = classify(a, b)?;
        if registry.kind_of(asteroid) != Some(EntityKind::Asteroid) {
            return None;
        }

        match other {
            Body::Shot(shot) => {
                // A shot id that names a live asteroid is a mis-tagged body
                if registry.kind_of(shot) == Some(EntityKind::Asteroid) {
                    return None;
                }
                registry.remove(asteroid);
                let shot_removed = registry.remove(shot).is_some();
                *score += 1;
                Some(CollisionOutcome::AsteroidDestroyed {
                    asteroid,
                    shot,
                    shot_removed,
                    score: *score,
                })
            }
            Body::Ship => {
                registry.remove(asteroid);
                let ship_destroyed = health.apply_damage(self.ship_hit_damage);
                Some(CollisionOutcome::ShipHit {
                    asteroid,
                    health: health.current(),
                    ship_destroyed,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::Motion;
    use glam::Vec3;
    use proptest::prelude::*;

    fn world() -> (EntityRegistry, HealthModel, u32) {
        let motion = Motion {
            displacement: Vec3::Z,
            duration: 1.0,
        };
        (
            EntityRegistry::new(motion, motion),
            HealthModel::new(100, 0.6, 0.3),
            0,
        )
    }

    #[test]
    fn test_shot_destroys_asteroid() {
        let (mut reg, mut health, mut score) = world();
        let resolver = CollisionResolver::new(25);
        let rock = reg.spawn_asteroid(Vec3::ZERO);
        let shot = reg.spawn_projectile(Vec3::ZERO);

        let outcome = resolver.resolve(
            Body::Shot(shot),
            Body::Asteroid(rock),
            &mut reg,
            &mut health,
            &mut score,
        );
        assert_eq!(
            outcome,
            Some(CollisionOutcome::AsteroidDestroyed {
                asteroid: rock,
                shot,
                shot_removed: true,
                score: 1
            })
        );
        assert!(reg.is_empty());
        assert_eq!(health.current(), 100);
    }

    #[test]
    fn test_ship_hit_damages_without_scoring() {
        let (mut reg, mut health, mut score) = world();
        let resolver = CollisionResolver::new(25);
        let rock = reg.spawn_asteroid(Vec3::ZERO);

        let outcome = resolver.resolve(
            Body::Asteroid(rock),
            Body::Ship,
            &mut reg,
            &mut health,
            &mut score,
        );
        assert_eq!(
            outcome,
            Some(CollisionOutcome::ShipHit {
                asteroid: rock,
                health: 75,
                ship_destroyed: false
            })
        );
        assert_eq!(score, 0);
        assert!(reg.all_asteroids().is_empty());
    }

    #[test]
    fn test_dead_asteroid_is_ignored() {
        let (mut reg, mut health, mut score) = world();
        let resolver = CollisionResolver::new(25);
        let rock = reg.spawn_asteroid(Vec3::ZERO);
        let shot = reg.spawn_projectile(Vec3::ZERO);
        reg.remove(rock);

        assert!(resolver
            .resolve(Body::Ship, Body::Asteroid(rock), &mut reg, &mut health, &mut score)
            .is_none());
        assert!(resolver
            .resolve(Body::Shot(shot), Body::Asteroid(rock), &mut reg, &mut health, &mut score)
            .is_none());
        assert_eq!(score, 0);
        assert_eq!(health.current(), 100);
        assert_eq!(reg.all_projectiles().len(), 1);
    }

    #[test]
    fn test_spent_shot_still_scores_once() {
        let (mut reg, mut health, mut score) = world();
        let resolver = CollisionResolver::new(25);
        let a = reg.spawn_asteroid(Vec3::ZERO);
        let b = reg.spawn_asteroid(Vec3::ZERO);
        let shot = reg.spawn_projectile(Vec3::ZERO);

        resolver.resolve(Body::Shot(shot), Body::Asteroid(a), &mut reg, &mut health, &mut score);
        let second =
            resolver.resolve(Body::Shot(shot), Body::Asteroid(b), &mut reg, &mut health, &mut score);
        assert!(matches!(
            second,
            Some(CollisionOutcome::AsteroidDestroyed {
                shot_removed: false,
                score: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_unrecognised_pairs_are_noops() {
        let (mut reg, mut health, mut score) = world();
        let resolver = CollisionResolver::new(25);
        let rock = reg.spawn_asteroid(Vec3::ZERO);
        let other_rock = reg.spawn_asteroid(Vec3::ZERO);
        let shot = reg.spawn_projectile(Vec3::ZERO);

        let pairs = [
            (Body::Ship, Body::Shot(shot)),
            (Body::Ship, Body::Ship),
            (Body::Asteroid(rock), Body::Asteroid(other_rock)),
            (Body::Other, Body::Asteroid(rock)),
            (Body::Shot(shot), Body::Other),
        ];
        for (a, b) in pairs {
            assert!(resolver.resolve(a, b, &mut reg, &mut health, &mut score).is_none());
        }
        assert_eq!(reg.len(), 3);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_from_tag() {
        let id = EntityId(9);
        assert_eq!(Body::from_tag("ship", id), Body::Ship);
        assert_eq!(Body::from_tag("shot", id), Body::Shot(id));
        assert_eq!(Body::from_tag("bullet", id), Body::Shot(id));
        assert_eq!(Body::from_tag("asteroid", id), Body::Asteroid(id));
        assert_eq!(Body::from_tag("camera", id), Body::Other);
    }

    proptest! {
        #[test]
        fn prop_pair_order_does_not_matter(ship_contact in any::<bool>(), swap in any::<bool>()) {
            let resolve = |first_shot_then_rock: bool| {
                let (mut reg, mut health, mut score) = world();
                let resolver = CollisionResolver::new(25);
                let rock = reg.spawn_asteroid(Vec3::ZERO);
                let shot = reg.spawn_projectile(Vec3::ZERO);
                let other = if ship_contact { Body::Ship } else { Body::Shot(shot) };
                let (a, b) = if first_shot_then_rock {
                    (other, Body::Asteroid(rock))
                } else {
                    (Body::Asteroid(rock), other)
                };
                let outcome = resolver.resolve(a, b, &mut reg, &mut health, &mut score);
                (outcome, score, health.current(), reg.len())
            };
            prop_assert_eq!(resolve(swap), resolve(!swap));
        }
    }
}
