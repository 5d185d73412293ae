//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `GameSession::tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod events;
pub mod health;
pub mod registry;
pub mod rng;
pub mod session;
pub mod spawn;
pub mod state;

pub use collision::{Body, CollisionOutcome, CollisionResolver};
pub use events::{AchievementReporter, EventLog, GameEvent, SessionObserver};
pub use health::{ColorBand, HealthModel};
pub use registry::{Asteroid, EntityId, EntityKind, EntityRegistry, Motion, Projectile, Travel};
pub use rng::{RandomSource, SeededRandom};
pub use session::GameSession;
pub use spawn::{SpawnRequest, SpawnScheduler};
pub use state::{Bounds, GameState, Ship, Viewport};
