//! End-to-end fight scenarios driven through the public API

use arena_engine::foundation::math::Vec3;
use arena_engine::input::{Button, InputSnapshot};
use arena_engine::ports::audio::{NullAudio, SoundHandle};
use arena_engine::ports::particles::NullParticles;
use bossrush::boss::Boss;
use bossrush::config::{BossConfig, GameConfig, ProjectileConfig};
use bossrush::player::PlayerView;
use bossrush::world::{GameWorld, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn idle_player() -> PlayerView {
    PlayerView {
        position: Vec3::new(0.0, 1.0, 0.0),
        combo_index: 0,
        damage: 8.0,
        attack_frames_remaining: 0,
        swing_velocity: Vec3::zeros(),
    }
}

fn step_boss(boss: &mut Boss, rng: &mut StdRng, frames: u32) {
    let player = idle_player();
    let mut audio = NullAudio::default();
    let mut particles = NullParticles;
    for _ in 0..frames {
        boss.update(&player, rng, &mut audio, SoundHandle(0), &mut particles);
    }
}

/// Find a seed whose first attack roll lands in the wanted state
fn boss_in_state(wanted: &str) -> (Boss, StdRng) {
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut boss = Boss::new(
            BossConfig::default(),
            ProjectileConfig::default(),
            Vec3::new(0.0, 0.0, 20.0),
            &mut rng,
        );
        for _ in 0..400 {
            step_boss(&mut boss, &mut rng, 1);
            if boss.state_name() == wanted {
                return (boss, rng);
            }
            if boss.state_name() != "normal" {
                break;
            }
        }
    }
    panic!("no seed under 64 rolled {wanted} as its first attack");
}

#[test]
fn test_first_attack_fires_at_seeded_delay() {
    let seed = 123;
    let config = GameConfig::default();

    // A twin rng with the same seed predicts both draws the world makes:
    // the attack delay, then the branch selector
    let mut twin = StdRng::seed_from_u64(seed);
    let expected_delay: u32 = twin.gen_range(
        config.boss.attack_interval_min..=config.boss.attack_interval_max,
    );
    let expected_branch = match twin.gen_range(0..4) {
        0 => "tackle",
        1 => "crash_down",
        2 => "missile_attack",
        _ => "laser_attack",
    };

    let mut audio = NullAudio::default();
    let mut particles = NullParticles;
    let mut world = GameWorld::new(config, seed, &mut audio).unwrap();

    for _ in 0..expected_delay {
        world.step(InputSnapshot::new(), &mut audio, &mut particles);
    }
    assert_eq!(world.boss().state_name(), "normal");
    world.step(InputSnapshot::new(), &mut audio, &mut particles);
    assert_eq!(world.boss().state_name(), expected_branch);
}

#[test]
fn test_missile_attack_fires_three_volleys_of_two() {
    let (mut boss, mut rng) = boss_in_state("missile_attack");
    let config = BossConfig::default();

    let mut max_id_seen = None;
    let budget = config.missile_attack.wait_frames
        + config.missile_attack.fire_interval * (config.missile_attack.volleys + 1);
    for _ in 0..budget {
        step_boss(&mut boss, &mut rng, 1);
        for missile in boss.missiles() {
            let seen = max_id_seen.get_or_insert(missile.id());
            *seen = (*seen).max(missile.id());
        }
    }
    // Three two-missile volleys means ids 0 through 5 were issued
    assert_eq!(max_id_seen, Some(5));
}

#[test]
fn test_laser_lives_exactly_its_lifetime() {
    let (mut boss, mut rng) = boss_in_state("laser_attack");
    let projectile = ProjectileConfig::default();

    // Approach plus charge: wait for the beam to appear
    let mut fired_at = None;
    for frame in 0..2000 {
        step_boss(&mut boss, &mut rng, 1);
        if !boss.lasers().is_empty() {
            fired_at = Some(frame);
            break;
        }
    }
    assert!(fired_at.is_some(), "laser never fired");

    // The beam stays alive for its whole sweep
    step_boss(&mut boss, &mut rng, projectile.laser_lifetime - 1);
    assert_eq!(boss.lasers().len(), 1);

    // The owning state kills it at the end of the sweep; the boss prunes it
    step_boss(&mut boss, &mut rng, 3);
    assert!(boss.lasers().is_empty());

    // And the attack winds down into the seek state
    step_boss(&mut boss, &mut rng, BossConfig::default().laser_attack.recovery_frames + 2);
    assert_eq!(boss.state_name(), "normal");
}

#[test]
fn test_scripted_attacker_clears_a_one_hp_boss() {
    let mut config = GameConfig::default();
    config.boss.max_hp = 1.0;

    let mut audio = NullAudio::default();
    let mut particles = NullParticles;
    let mut world = GameWorld::new(config, 7, &mut audio).unwrap();

    for frame in 0..1800u64 {
        let player_pos = world.player().position(world.arena());
        let mut to_boss = world.boss().position() - player_pos;
        to_boss.y = 0.0;
        let snapshot = if to_boss.magnitude() > 5.0 {
            let dir = to_boss.normalize();
            InputSnapshot::new().with_left_stick(dir.x, dir.z)
        } else if frame % 2 == 0 {
            InputSnapshot::new().with_button(Button::Attack)
        } else {
            InputSnapshot::new()
        };
        if world.step(snapshot, &mut audio, &mut particles) == Outcome::Cleared {
            return;
        }
    }
    panic!("scripted attacker never landed a hit");
}

#[test]
fn test_idle_one_hp_player_eventually_loses() {
    // Attack selection is random per seed; some fraction of early attacks
    // can whiff an idle target, so scan a handful of seeds
    for seed in 0..16 {
        let mut config = GameConfig::default();
        config.player.max_hp = 1.0;

        let mut audio = NullAudio::default();
        let mut particles = NullParticles;
        let mut world = GameWorld::new(config, seed, &mut audio).unwrap();

        for _ in 0..10_800 {
            if world.step(InputSnapshot::new(), &mut audio, &mut particles)
                == Outcome::GameOver
            {
                return;
            }
        }
    }
    panic!("no boss attack connected with an idle player across 16 seeds");
}

#[test]
fn test_both_fighters_stay_inside_the_arena() {
    let config = GameConfig::default();
    let boss_limit = config.boss.move_limit;
    let player_limit = config.player.move_limit;

    let mut audio = NullAudio::default();
    let mut particles = NullParticles;
    let mut world = GameWorld::new(config, 31, &mut audio).unwrap();

    for frame in 0..3600u64 {
        // Run at the wall the whole time
        let snapshot = if frame % 240 < 120 {
            InputSnapshot::new().with_left_stick(1.0, 0.0)
        } else {
            InputSnapshot::new().with_left_stick(0.0, 1.0)
        };
        world.step(snapshot, &mut audio, &mut particles);

        let p = world.player().position(world.arena());
        assert!(p.x.abs() <= player_limit + 1e-3 && p.z.abs() <= player_limit + 1e-3);
        let b = world.boss().position();
        assert!(b.x.abs() <= boss_limit + 1e-3 && b.z.abs() <= boss_limit + 1e-3);
    }
}
