//! Headless demo: a scripted player fights the boss to a verdict

use std::path::Path;

use arena_engine::foundation::math::Vec3;
use arena_engine::foundation::time::FRAMES_PER_SECOND;
use arena_engine::input::{Button, InputSnapshot};
use arena_engine::ports::audio::{AudioError, NullAudio};
use arena_engine::ports::particles::NullParticles;
use arena_engine::ports::render::NullRenderer;
use bossrush::config::GameConfig;
use bossrush::world::{GameWorld, Outcome};
use log::{error, info};

const MAX_FRAMES: u64 = 60 * 60 * FRAMES_PER_SECOND as u64;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        error!("startup failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AudioError> {
    let config = GameConfig::load_or_default(Path::new("config/game.ron"));
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);

    let mut audio = NullAudio::default();
    let mut particles = NullParticles;
    let mut renderer = NullRenderer;
    let mut world = GameWorld::new(config, seed, &mut audio)?;

    loop {
        let snapshot = scripted_input(&world);
        let outcome = world.step(snapshot, &mut audio, &mut particles);
        world.render(&mut renderer);

        let frame = world.frame_count();
        if frame % u64::from(FRAMES_PER_SECOND) == 0 {
            info!(
                "t={:>4}s player hp {:>5.1} boss hp {:>5.1} boss {}",
                frame / u64::from(FRAMES_PER_SECOND),
                world.player().health().current,
                world.boss().health().current,
                world.boss().state_name(),
            );
        }

        match outcome {
            Outcome::Running => {}
            Outcome::Cleared => {
                info!("boss defeated after {frame} frames");
                return Ok(());
            }
            Outcome::GameOver => {
                info!("player defeated after {frame} frames");
                return Ok(());
            }
        }
        if frame >= MAX_FRAMES {
            info!("fight timed out after {frame} frames");
            return Ok(());
        }
    }
}

/// Chase the boss and mash attack once in range
fn scripted_input(world: &GameWorld) -> InputSnapshot {
    let player_pos = world.player().position(world.arena());
    let mut to_boss = world.boss().position() - player_pos;
    to_boss.y = 0.0;
    let distance = to_boss.magnitude();

    if distance > 5.0 {
        let dir = to_boss.try_normalize(1e-6).unwrap_or_else(Vec3::z);
        InputSnapshot::new().with_left_stick(dir.x, dir.z)
    } else if world.frame_count() % 2 == 0 {
        InputSnapshot::new().with_button(Button::Attack)
    } else {
        InputSnapshot::new()
    }
}
