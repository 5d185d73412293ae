//! Space Master headless driver
//!
//! Runs the session core without a renderer: a fixed-timestep loop, an
//! autopilot on the tilt input, and a crude proximity check standing in for
//! the physics engine's contact reports.
//!
//! Usage: `space-master [tuning.json] [seed]`

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use space_master::consts::{MAX_SUBSTEPS, SIM_DT};
use space_master::platform::TiltInput;
use space_master::sim::{
    Body, Bounds, ColorBand, GameSession, GameState, SessionObserver, Viewport,
};
use space_master::{HighScores, Tuning};

/// Contact extents used by the stand-in detector. Depth reach covers a
/// shot and an asteroid closing on each other for one tick.
const SHIP_REACH: Vec3 = Vec3::new(3.0, 3.0, 2.0);
const SHOT_REACH: Vec3 = Vec3::new(2.0, 2.0, 4.0);

/// Runs to play before exiting
const RUNS: u32 = 3;
/// Give up on a run after this much simulated time
const MAX_RUN_SECONDS: f32 = 300.0;
/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 50.0;
/// Autopilot fires every this many frames
const FIRE_EVERY: u32 = 12;

/// Logs the notifications a renderer would act on
struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_state_changed(&mut self, state: GameState) {
        log::info!("[scene] show {:?} screen", state);
    }

    fn on_health_changed(&mut self, percentage: f32, band: ColorBand) {
        log::info!("[hud] health bar {:.0}% ({:?})", percentage * 100.0, band);
    }

    fn on_score_changed(&mut self, score: u32) {
        log::debug!("[hud] {} HITS", score);
    }

    fn on_ship_destroyed(&mut self) {
        log::info!("[scene] ship explodes");
    }
}

/// Steer toward the closest asteroid's lane
fn autopilot(session: &GameSession) -> f32 {
    let ship_x = session.ship().position.x;
    let target = session
        .registry()
        .all_asteroids()
        .iter()
        .map(|a| a.position())
        .filter(|p| p.z < 0.0)
        .max_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(std::cmp::Ordering::Equal));

    match target {
        Some(p) => ((p.x - ship_x) * 0.05).clamp(-0.5, 0.5),
        None => 0.0,
    }
}

fn touching(a: Vec3, b: Vec3, reach: Vec3) -> bool {
    (a - b).abs().cmple(reach).all()
}

/// Find overlapping pairs the way a physics engine would report them
fn detect_contacts(session: &GameSession) -> Vec<(Body, Body)> {
    let registry = session.registry();
    let ship = session.ship().position;
    let mut contacts = Vec::new();

    for asteroid in registry.all_asteroids() {
        let pos = asteroid.position();
        if touching(ship, pos, SHIP_REACH) {
            contacts.push((Body::Ship, Body::Asteroid(asteroid.id)));
        }
        for shot in registry.all_projectiles() {
            if touching(shot.position(), pos, SHOT_REACH) {
                contacts.push((Body::Asteroid(asteroid.id), Body::Shot(shot.id)));
            }
        }
    }
    contacts
}

fn play_run(session: &mut GameSession, tilt: &TiltInput) {
    let mut accumulator = 0.0;
    let mut elapsed = 0.0;
    let mut frame: u32 = 0;

    while session.state() != GameState::GameOver && elapsed < MAX_RUN_SECONDS {
        accumulator += FRAME_DT;
        elapsed += FRAME_DT;
        frame += 1;

        tilt.set(autopilot(session));
        if session.state() == GameState::Playing && frame % FIRE_EVERY == 0 {
            if let Err(e) = session.tap() {
                log::warn!("tap failed: {}", e);
            }
        }

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Err(e) = session.tick(SIM_DT) {
                log::warn!("tick failed: {}", e);
            }
            accumulator -= SIM_DT;
            substeps += 1;

            for (a, b) in detect_contacts(session) {
                session.handle_contact(a, b);
            }
        }
    }

    if session.state() != GameState::GameOver {
        log::warn!("Run cut off after {:.0}s", elapsed);
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Space Master (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("Using default tuning");
            Tuning::default()
        }
    };
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let viewport = Viewport {
        aspect: 16.0 / 9.0,
        fov_y_degrees: 60.0,
        camera_distance: 30.0,
    };
    let bounds = Bounds::from_viewport(&viewport, &tuning);
    let tilt = TiltInput::new();
    let scores = Rc::new(RefCell::new(HighScores::new()));

    let mut session = GameSession::with_seed(tuning, seed)
        .with_bounds(bounds)
        .with_input(tilt.clone())
        .with_observer(LogObserver)
        .with_achievements(scores.clone());

    log::info!("Game initialized with seed: {}", seed);

    for run in 1..=RUNS {
        let started = if run == 1 {
            session.tap()
        } else {
            session.restart()
        };
        if let Err(e) = started {
            log::error!("Could not start run {}: {}", run, e);
            return;
        }
        play_run(&mut session, &tilt);
        println!(
            "Run {}: {} ASTEROIDS DESTROYED",
            run,
            session.final_score().unwrap_or(session.score())
        );
    }

    session.return_to_title();

    let board = scores.borrow();
    println!("High scores:");
    for (rank, entry) in board.entries.iter().enumerate() {
        println!("  {:>2}. {:>4}  (run {})", rank + 1, entry.score, entry.run);
    }
    let unlocked: Vec<&str> = board.unlocked.iter().map(|m| m.as_str()).collect();
    println!("Achievements: {}", unlocked.join(", "));
}
