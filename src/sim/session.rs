//! Game session state machine
//!
//! Owns every piece of mutable game state and advances it through two entry
//! points: the per-frame [`GameSession::tick`] and the physics contact
//! callback [`GameSession::handle_contact`]. Both must be called from the same
//! thread, one at a time.
//!
//! Within a playing tick the order is fixed: spawn scheduling, ship movement,
//! then entity travel/expiry. A freshly spawned asteroid sits at the spawn
//! depth until the next tick.

use std::collections::HashSet;
use std::mem::Discriminant;

use glam::Vec3;

use super::collision::{Body, CollisionOutcome, CollisionResolver};
use super::events::{AchievementReporter, SessionObserver};
use super::health::HealthModel;
use super::registry::{EntityId, EntityRegistry, Motion};
use super::rng::{RandomSource, SeededRandom};
use super::spawn::SpawnScheduler;
use super::state::{Bounds, GameState, Ship};
use crate::achievements::milestones_for;
use crate::error::SessionError;
use crate::lerp_clamped;
use crate::platform::InputSource;
use crate::tuning::Tuning;

/// Slack for accumulated float time when comparing against a duration
const TIME_EPSILON: f32 = 1e-4;

pub struct GameSession {
    tuning: Tuning,
    state: GameState,
    bounds: Option<Bounds>,
    ship: Ship,
    health: HealthModel,
    registry: EntityRegistry,
    spawner: SpawnScheduler,
    resolver: CollisionResolver,
    /// Asteroids destroyed by shots this run
    score: u32,
    /// Score frozen at the moment of game over
    final_score: Option<u32>,
    /// Seconds into the introduction move
    intro_elapsed: f32,
    /// Playing ticks simulated this run
    time_ticks: u64,
    rng: Box<dyn RandomSource>,
    input: Box<dyn InputSource>,
    observers: Vec<Box<dyn SessionObserver>>,
    achievements: Vec<Box<dyn AchievementReporter>>,
    /// Misuse kinds already logged
    reported: HashSet<Discriminant<SessionError>>,
}

impl GameSession {
    /// New session on the title screen, seeded from OS entropy
    pub fn new(tuning: Tuning) -> Self {
        let rng = SeededRandom::from_entropy();
        log::info!("Session created with seed: {}", rng.seed());
        Self::with_random(tuning, Box::new(rng))
    }

    /// New session with a fixed seed (reproducible runs)
    pub fn with_seed(tuning: Tuning, seed: u64) -> Self {
        Self::with_random(tuning, Box::new(SeededRandom::new(seed)))
    }

    fn with_random(tuning: Tuning, rng: Box<dyn RandomSource>) -> Self {
        if let Err(e) = tuning.validate() {
            log::warn!("Session created with invalid tuning: {}", e);
        }
        let registry = EntityRegistry::new(
            Motion {
                displacement: Vec3::new(0.0, 0.0, tuning.asteroid_end_z - tuning.asteroid_spawn_z),
                duration: tuning.asteroid_travel_time,
            },
            Motion {
                displacement: Vec3::new(0.0, 0.0, -tuning.projectile_range),
                duration: tuning.projectile_travel_time,
            },
        );
        let mut spawner = SpawnScheduler::new(tuning.spawn_interval);
        spawner.reset(tuning.initial_spawn_delay);

        Self {
            state: GameState::Title,
            bounds: None,
            ship: Ship::new(tuning.ship_spawn_point),
            health: HealthModel::new(
                tuning.max_health,
                tuning.warning_threshold,
                tuning.critical_threshold,
            ),
            registry,
            spawner,
            resolver: CollisionResolver::new(tuning.ship_hit_damage),
            score: 0,
            final_score: None,
            intro_elapsed: 0.0,
            time_ticks: 0,
            rng,
            input: Box::new(()),
            observers: Vec::new(),
            achievements: Vec::new(),
            reported: HashSet::new(),
            tuning,
        }
    }

    /// Replace the random source
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn with_achievements(mut self, reporter: impl AchievementReporter + 'static) -> Self {
        self.achievements.push(Box::new(reporter));
        self
    }

    /// Set the lane computed from the current viewport
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.set_bounds(bounds);
        self
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        log::info!(
            "Lane bounds: half_width={:.2}, depth {}..{}",
            bounds.half_width,
            bounds.far_z,
            bounds.near_z
        );
        self.registry.set_asteroid_motion(Motion {
            displacement: Vec3::new(0.0, 0.0, bounds.near_z - bounds.far_z),
            duration: self.tuning.asteroid_travel_time,
        });
        self.bounds = Some(bounds);
    }

    // === Accessors ===

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn health(&self) -> &HealthModel {
        &self.health
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Fraction of the introduction move completed
    pub fn intro_progress(&self) -> f32 {
        if self.tuning.intro_duration <= 0.0 {
            return 1.0;
        }
        (self.intro_elapsed / self.tuning.intro_duration).clamp(0.0, 1.0)
    }

    // === Input actions ===

    /// Screen tap. Meaning depends on the current screen.
    pub fn tap(&mut self) -> Result<(), SessionError> {
        match self.state {
            GameState::Title => self.start(),
            GameState::Playing => {
                self.shoot();
                Ok(())
            }
            GameState::Credits => {
                self.return_to_title();
                Ok(())
            }
            GameState::Introduction | GameState::GameOver => Ok(()),
        }
    }

    /// Leave the title screen and begin a run
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != GameState::Title {
            log::debug!("start ignored in {:?}", self.state);
            return Ok(());
        }
        self.begin_run()
    }

    /// Begin a fresh run from game over (or abandon the current one)
    pub fn restart(&mut self) -> Result<(), SessionError> {
        match self.state {
            GameState::GameOver | GameState::Playing | GameState::Introduction => self.begin_run(),
            GameState::Title | GameState::Credits => {
                log::debug!("restart ignored in {:?}", self.state);
                Ok(())
            }
        }
    }

    /// Fire a shot from the ship. No-op unless playing.
    pub fn shoot(&mut self) -> Option<EntityId> {
        if !self.state.is_simulating() {
            return None;
        }
        let origin = self.ship.position;
        let id = self.registry.spawn_projectile(origin);
        log::debug!("Shot {} fired from x={:.2}", id, origin.x);
        self.emit(|o| o.on_projectile_spawned(id, origin));
        Some(id)
    }

    /// Abandon whatever is happening and go back to the title screen.
    /// Valid from every state; calling it twice is the same as once.
    pub fn return_to_title(&mut self) {
        self.clear_entities();
        self.ship.respawn_at(self.tuning.ship_spawn_point);
        self.intro_elapsed = 0.0;
        self.final_score = None;
        self.set_score(0);
        self.set_state(GameState::Title);
    }

    /// Open the credits screen (when enabled)
    pub fn show_credits(&mut self) {
        if !self.tuning.credits_enabled {
            log::debug!("credits disabled");
            return;
        }
        if matches!(self.state, GameState::Title | GameState::GameOver) {
            self.set_state(GameState::Credits);
        }
    }

    // === Simulation ===

    /// Advance the session by `dt` seconds.
    ///
    /// Only the introduction move and active play are simulated; every other
    /// screen is frozen.
    pub fn tick(&mut self, dt: f32) -> Result<(), SessionError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(self.report_misuse(SessionError::InvalidDelta(dt)));
        }
        match self.state {
            GameState::Introduction => {
                self.tick_introduction(dt);
                Ok(())
            }
            GameState::Playing => self.tick_playing(dt),
            GameState::Title | GameState::GameOver | GameState::Credits => Ok(()),
        }
    }

    /// Physics contact callback. Ignored outside active play.
    pub fn handle_contact(&mut self, a: Body, b: Body) -> Option<CollisionOutcome> {
        if !self.state.is_simulating() {
            return None;
        }
        let outcome = self.resolver.resolve(
            a,
            b,
            &mut self.registry,
            &mut self.health,
            &mut self.score,
        )?;

        match outcome {
            CollisionOutcome::AsteroidDestroyed {
                asteroid,
                shot,
                shot_removed,
                score,
            } => {
                log::debug!("Asteroid {} destroyed by {}, score {}", asteroid, shot, score);
                self.emit(|o| {
                    o.on_entity_removed(asteroid);
                    o.on_asteroid_destroyed(asteroid);
                });
                if shot_removed {
                    self.emit(|o| o.on_entity_removed(shot));
                }
                self.emit(|o| o.on_score_changed(score));
            }
            CollisionOutcome::ShipHit {
                asteroid,
                health,
                ship_destroyed,
            } => {
                log::debug!("Ship hit by {}, health {}", asteroid, health);
                let pct = self.health.percentage();
                let band = self.health.color_band();
                self.emit(|o| {
                    o.on_entity_removed(asteroid);
                    o.on_ship_hit(asteroid);
                    o.on_health_changed(pct, band);
                });
                if ship_destroyed {
                    self.game_over();
                }
            }
        }
        Some(outcome)
    }

    /// Contact callback for physics layers that only know string tags
    pub fn handle_tagged_contact(
        &mut self,
        a: (&str, EntityId),
        b: (&str, EntityId),
    ) -> Option<CollisionOutcome> {
        self.handle_contact(Body::from_tag(a.0, a.1), Body::from_tag(b.0, b.1))
    }

    fn tick_introduction(&mut self, dt: f32) {
        self.intro_elapsed += dt;
        let finished = self.intro_elapsed >= self.tuning.intro_duration - TIME_EPSILON;
        self.ship.position = if finished {
            self.tuning.ship_rest_point
        } else {
            lerp_clamped(
                self.tuning.ship_spawn_point,
                self.tuning.ship_rest_point,
                self.intro_progress(),
            )
        };
        let position = self.ship.position;
        self.emit(|o| o.on_ship_position_changed(position));

        if finished {
            self.set_state(GameState::Playing);
        }
    }

    fn tick_playing(&mut self, dt: f32) -> Result<(), SessionError> {
        let Some(bounds) = self.bounds else {
            return Err(self.report_misuse(SessionError::BoundsNotSet));
        };
        self.time_ticks += 1;

        // 1. Spawn
        if let Some(request) = self.spawner.tick(dt, &bounds, self.rng.as_mut()) {
            let position = request.position();
            let id = self.registry.spawn_asteroid(position);
            log::debug!("Asteroid {} spawned at x={:.2}", id, position.x);
            self.emit(|o| o.on_asteroid_spawned(id, position));
        }

        // 2. Ship
        let velocity = self.input.velocity();
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let limit = bounds.ship_limit(self.tuning.ship_margin);
        if self
            .ship
            .steer(velocity, self.tuning.ship_speed_factor, dt, limit)
        {
            let position = self.ship.position;
            self.emit(|o| o.on_ship_position_changed(position));
        }

        // 3. Travel and expiry (no damage, no score)
        for id in self.registry.advance(dt) {
            self.emit(|o| o.on_entity_removed(id));
        }

        Ok(())
    }

    /// Reset everything a run owns and enter the introduction
    fn begin_run(&mut self) -> Result<(), SessionError> {
        if self.bounds.is_none() {
            return Err(self.report_misuse(SessionError::BoundsNotSet));
        }
        self.clear_entities();

        self.health.reset();
        let pct = self.health.percentage();
        let band = self.health.color_band();
        self.emit(|o| o.on_health_changed(pct, band));

        self.final_score = None;
        self.set_score(0);
        self.time_ticks = 0;
        self.spawner.reset(self.tuning.initial_spawn_delay);

        self.ship.respawn_at(self.tuning.ship_spawn_point);
        let position = self.ship.position;
        self.emit(|o| o.on_ship_position_changed(position));

        self.intro_elapsed = 0.0;
        log::info!("Run started");
        self.set_state(GameState::Introduction);
        Ok(())
    }

    fn game_over(&mut self) {
        let score = self.score;
        self.ship.alive = false;
        self.final_score = Some(score);
        log::info!("Game over: {} asteroids destroyed", score);

        self.emit(|o| o.on_ship_destroyed());
        self.set_state(GameState::GameOver);

        let milestones = milestones_for(score);
        for reporter in &mut self.achievements {
            reporter.on_game_over(score);
            for milestone in &milestones {
                reporter.on_milestone(*milestone);
            }
        }
    }

    fn clear_entities(&mut self) {
        for id in self.registry.clear() {
            self.emit(|o| o.on_entity_removed(id));
        }
    }

    fn set_score(&mut self, score: u32) {
        if self.score != score {
            self.score = score;
            self.emit(|o| o.on_score_changed(score));
        }
    }

    fn set_state(&mut self, state: GameState) {
        if self.state == state {
            return;
        }
        log::info!("State {:?} -> {:?}", self.state, state);
        self.state = state;
        self.emit(|o| o.on_state_changed(state));
    }

    fn emit(&mut self, mut notify: impl FnMut(&mut dyn SessionObserver)) {
        for observer in &mut self.observers {
            notify(observer.as_mut());
        }
    }

    /// Log a misuse the first time each kind occurs, then hand it back
    fn report_misuse(&mut self, err: SessionError) -> SessionError {
        if self.reported.insert(std::mem::discriminant(&err)) {
            log::error!("{}", err);
        }
        err
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("health", &self.health.current())
            .field("ship", &self.ship.position)
            .field("entities", &self.registry.len())
            .finish()
    }
}
