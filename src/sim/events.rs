//! Outbound notifications
//!
//! The session never renders, plays sounds or talks to platform services.
//! It announces what happened through these traits; collaborators react
//! (fire-and-forget, nothing is returned to the session).

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use super::health::ColorBand;
use super::registry::EntityId;
use super::state::GameState;
use crate::achievements::Milestone;

/// Render/scene collaborator. All methods default to no-ops.
pub trait SessionObserver {
    fn on_state_changed(&mut self, _state: GameState) {}
    fn on_asteroid_spawned(&mut self, _id: EntityId, _position: Vec3) {}
    fn on_projectile_spawned(&mut self, _id: EntityId, _origin: Vec3) {}
    /// Entity left play (destroyed, expired or cleared)
    fn on_entity_removed(&mut self, _id: EntityId) {}
    fn on_ship_position_changed(&mut self, _position: Vec3) {}
    fn on_health_changed(&mut self, _percentage: f32, _band: ColorBand) {}
    fn on_score_changed(&mut self, _score: u32) {}
    /// A shot destroyed an asteroid (explosion/sound hook)
    fn on_asteroid_destroyed(&mut self, _id: EntityId) {}
    /// An asteroid struck the ship (impact hook)
    fn on_ship_hit(&mut self, _asteroid: EntityId) {}
    /// Health ran out
    fn on_ship_destroyed(&mut self) {}
}

/// Achievement/leaderboard collaborator
pub trait AchievementReporter {
    fn on_game_over(&mut self, final_score: u32);
    fn on_milestone(&mut self, _milestone: Milestone) {}
}

/// Flat record of every notification, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StateChanged(GameState),
    AsteroidSpawned(EntityId, Vec3),
    ProjectileSpawned(EntityId, Vec3),
    EntityRemoved(EntityId),
    ShipMoved(Vec3),
    HealthChanged(f32, ColorBand),
    ScoreChanged(u32),
    AsteroidDestroyed(EntityId),
    ShipHit(EntityId),
    ShipDestroyed,
    GameOver(u32),
    MilestoneReached(Milestone),
}

/// Observer that appends every notification to a shared buffer.
///
/// Clones share the buffer, so one handle can be given to the session and
/// another kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Take all recorded events, leaving the log empty
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl SessionObserver for EventLog {
    fn on_state_changed(&mut self, state: GameState) {
        self.push(GameEvent::StateChanged(state));
    }

    fn on_asteroid_spawned(&mut self, id: EntityId, position: Vec3) {
        self.push(GameEvent::AsteroidSpawned(id, position));
    }

    fn on_projectile_spawned(&mut self, id: EntityId, origin: Vec3) {
        self.push(GameEvent::ProjectileSpawned(id, origin));
    }

    fn on_entity_removed(&mut self, id: EntityId) {
        self.push(GameEvent::EntityRemoved(id));
    }

    fn on_ship_position_changed(&mut self, position: Vec3) {
        self.push(GameEvent::ShipMoved(position));
    }

    fn on_health_changed(&mut self, percentage: f32, band: ColorBand) {
        self.push(GameEvent::HealthChanged(percentage, band));
    }

    fn on_score_changed(&mut self, score: u32) {
        self.push(GameEvent::ScoreChanged(score));
    }

    fn on_asteroid_destroyed(&mut self, id: EntityId) {
        self.push(GameEvent::AsteroidDestroyed(id));
    }

    fn on_ship_hit(&mut self, asteroid: EntityId) {
        self.push(GameEvent::ShipHit(asteroid));
    }

    fn on_ship_destroyed(&mut self) {
        self.push(GameEvent::ShipDestroyed);
    }
}

impl AchievementReporter for EventLog {
    fn on_game_over(&mut self, final_score: u32) {
        self.push(GameEvent::GameOver(final_score));
    }

    fn on_milestone(&mut self, milestone: Milestone) {
        self.push(GameEvent::MilestoneReached(milestone));
    }
}
