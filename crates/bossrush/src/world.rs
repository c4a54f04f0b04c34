//! Frame orchestration: input, entity updates, collision, and outcome
//!
//! One `step` is one 60 Hz frame. The order is fixed: input, player, boss
//! (skipped during hit-stop), then a collision pass rebuilt from scratch and
//! dispatched to both sides of every contact.

use arena_engine::foundation::time::FrameClock;
use arena_engine::input::{Button, InputSnapshot, InputState};
use arena_engine::physics::collision_world::CollisionWorld;
use arena_engine::physics::groups::CollisionGroup;
use arena_engine::ports::audio::{AudioError, AudioPort, SoundHandle};
use arena_engine::ports::particles::{EmitterSpec, ParticlePort};
use arena_engine::ports::render::RenderPort;
use arena_engine::scene::transform::TransformArena;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boss::Boss;
use crate::combo::COMBO_LENGTH;
use crate::config::GameConfig;
use crate::player::{Player, PlayerCtx};

/// Frames the boss freezes when a finisher lands
const HIT_STOP_FINISHER: u32 = 10;
/// Frames the boss freezes when any other combo step lands
const HIT_STOP_NORMAL: u32 = 2;

/// Collider ids for the collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColliderTag {
    /// Player body
    Player,
    /// Player weapon, registered only on hit-window frames
    Weapon,
    /// Boss body
    Boss,
    /// A live missile
    Missile(u32),
    /// A live laser beam
    Laser(u32),
}

/// Result of the fight so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both sides still standing
    Running,
    /// The boss is down
    Cleared,
    /// The player is down
    GameOver,
}

/// Sounds loaded once at startup
struct Sfx {
    explosion: SoundHandle,
    weapon_hit: SoundHandle,
}

impl Sfx {
    fn load(audio: &mut dyn AudioPort) -> Result<Self, AudioError> {
        Ok(Self {
            explosion: audio.load("assets/sounds/explosion.ogg")?,
            weapon_hit: audio.load("assets/sounds/weapon_hit.ogg")?,
        })
    }
}

/// The whole simulation
pub struct GameWorld {
    config: GameConfig,
    arena: TransformArena,
    player: Player,
    boss: Boss,
    collision: CollisionWorld<ColliderTag>,
    input: InputState,
    rng: StdRng,
    clock: FrameClock,
    hit_stop: u32,
    lock_on: bool,
    camera_yaw: f32,
    outcome: Outcome,
    sfx: Sfx,
}

impl GameWorld {
    /// Build the world, spawning both fighters and loading sounds
    pub fn new(
        config: GameConfig,
        seed: u64,
        audio: &mut dyn AudioPort,
    ) -> Result<Self, AudioError> {
        let mut arena = TransformArena::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let player = Player::new(config.player.clone(), &mut arena);
        let boss = Boss::new(
            config.boss.clone(),
            config.projectile.clone(),
            config.boss.spawn_position,
            &mut rng,
        );
        let sfx = Sfx::load(audio)?;
        info!("world seeded with {seed}");
        Ok(Self {
            config,
            arena,
            player,
            boss,
            collision: CollisionWorld::new(),
            input: InputState::new(),
            rng,
            clock: FrameClock::new(),
            hit_stop: 0,
            lock_on: false,
            camera_yaw: 0.0,
            outcome: Outcome::Running,
            sfx,
        })
    }

    /// Advance one frame
    pub fn step(
        &mut self,
        snapshot: InputSnapshot,
        audio: &mut dyn AudioPort,
        particles: &mut dyn ParticlePort,
    ) -> Outcome {
        if self.outcome != Outcome::Running {
            return self.outcome;
        }
        self.clock.tick();
        self.input.update(snapshot);
        if self.input.pressed(Button::LockOn) {
            self.lock_on = !self.lock_on;
            debug!("lock-on {}", if self.lock_on { "engaged" } else { "released" });
        }

        let boss_view = self.boss.view();
        {
            let mut ctx = PlayerCtx {
                arena: &mut self.arena,
                input: &self.input,
                boss: &boss_view,
                camera_yaw: self.camera_yaw,
                lock_on: self.lock_on,
            };
            self.player.update(&mut ctx);
        }

        // Hit-stop freezes the boss and the combat pass; the player keeps
        // moving so the pause reads as impact, not lag
        if self.hit_stop > 0 {
            self.hit_stop -= 1;
            return self.outcome;
        }

        let player_view = self.player.view(&self.arena);
        self.boss.update(
            &player_view,
            &mut self.rng,
            audio,
            self.sfx.explosion,
            particles,
        );

        self.run_collision_pass();
        self.dispatch_contacts(audio, particles);

        if self.boss.health().is_dead() {
            info!("boss defeated on frame {}", self.clock.frame_count());
            self.outcome = Outcome::Cleared;
        } else if self.player.health().is_dead() {
            info!("player defeated on frame {}", self.clock.frame_count());
            self.outcome = Outcome::GameOver;
        }
        self.outcome
    }

    /// Rebuild the collider list from the live entities and detect pairs
    fn run_collision_pass(&mut self) {
        self.collision.clear();

        self.collision.register(
            ColliderTag::Player,
            self.player.body_shape(&self.arena),
            CollisionGroup::PLAYER,
            CollisionGroup::ENEMY | CollisionGroup::MISSILE | CollisionGroup::LASER,
        );
        if self.player.hitbox_active() {
            self.collision.register(
                ColliderTag::Weapon,
                self.player.weapon_shape(&self.arena),
                CollisionGroup::WEAPON,
                CollisionGroup::ENEMY,
            );
        }
        self.collision.register(
            ColliderTag::Boss,
            self.boss.body_shape(),
            CollisionGroup::ENEMY,
            CollisionGroup::PLAYER | CollisionGroup::WEAPON,
        );
        for missile in self.boss.missiles() {
            if missile.is_dead() {
                continue;
            }
            self.collision.register(
                ColliderTag::Missile(missile.id()),
                missile.world_shape(&self.config.projectile),
                CollisionGroup::MISSILE,
                CollisionGroup::PLAYER,
            );
        }
        for laser in self.boss.lasers() {
            // A beam still growing to full length passes through the player
            if laser.is_solid(&self.config.projectile) {
                self.collision.register(
                    ColliderTag::Laser(laser.id()),
                    laser.world_shape(),
                    CollisionGroup::LASER,
                    CollisionGroup::PLAYER,
                );
            }
        }

        self.collision.detect();
    }

    /// Resolve every contact on both sides
    fn dispatch_contacts(
        &mut self,
        audio: &mut dyn AudioPort,
        particles: &mut dyn ParticlePort,
    ) {
        let contacts: Vec<_> = self.collision.contacts().to_vec();
        for contact in contacts {
            match (contact.a, contact.b) {
                (ColliderTag::Player, ColliderTag::Boss) => {
                    let view = self.boss.view();
                    self.player.on_boss_contact(&mut self.arena, &view);
                }
                (ColliderTag::Weapon, ColliderTag::Boss) => {
                    let view = self.player.view(&self.arena);
                    if self.boss.on_weapon_hit(&view) {
                        let impact = self.player.weapon_shape(&self.arena).center();
                        particles.spawn(EmitterSpec::at(impact).with_count(16));
                        audio.play(self.sfx.weapon_hit, false, 1.0);
                        self.hit_stop = if view.combo_index == COMBO_LENGTH - 1 {
                            HIT_STOP_FINISHER
                        } else {
                            HIT_STOP_NORMAL
                        };
                    }
                }
                (ColliderTag::Player, ColliderTag::Missile(id)) => {
                    self.player.on_projectile_hit(self.config.projectile.missile_damage);
                    self.boss.detonate_missile(id, audio, self.sfx.explosion);
                }
                (ColliderTag::Player, ColliderTag::Laser(_)) => {
                    self.player.on_projectile_hit(self.config.projectile.laser_damage);
                }
                _ => {}
            }
        }
    }

    /// Publish every entity's world matrix to the renderer
    pub fn render(&self, renderer: &mut dyn RenderPort) {
        if let Some(tf) = self.arena.get(self.player.transform_key()) {
            renderer.draw("player", &tf.world);
        }
        if let Some(tf) = self.arena.get(self.player.weapon_key()) {
            renderer.draw("weapon", &tf.world);
        }
        renderer.draw("boss", self.boss.world());
        for missile in self.boss.missiles() {
            renderer.draw("missile", missile.world());
        }
        for laser in self.boss.lasers() {
            renderer.draw("laser", laser.world());
        }
    }

    /// Point the camera; stick input is rotated by this yaw
    pub fn set_camera_yaw(&mut self, yaw: f32) {
        self.camera_yaw = yaw;
    }

    /// Result so far
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Frames simulated
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Whether lock-on is engaged
    pub fn lock_on(&self) -> bool {
        self.lock_on
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The boss
    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    /// The shared transform storage
    pub fn arena(&self) -> &TransformArena {
        &self.arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::ports::audio::NullAudio;
    use arena_engine::ports::particles::NullParticles;

    fn make_world(seed: u64) -> (GameWorld, NullAudio, NullParticles) {
        let mut audio = NullAudio::default();
        let world = GameWorld::new(GameConfig::default(), seed, &mut audio)
            .expect("null audio never fails to load");
        (world, audio, NullParticles)
    }

    #[test]
    fn test_idle_world_keeps_running() {
        let (mut world, mut audio, mut particles) = make_world(1);
        for _ in 0..600 {
            let outcome = world.step(InputSnapshot::new(), &mut audio, &mut particles);
            assert_eq!(outcome, Outcome::Running);
        }
        assert_eq!(world.frame_count(), 600);
    }

    #[test]
    fn test_lock_on_toggles_on_press_edge() {
        let (mut world, mut audio, mut particles) = make_world(1);
        assert!(!world.lock_on());
        world.step(
            InputSnapshot::new().with_button(Button::LockOn),
            &mut audio,
            &mut particles,
        );
        assert!(world.lock_on());
        // Holding the button is not a second press
        world.step(
            InputSnapshot::new().with_button(Button::LockOn),
            &mut audio,
            &mut particles,
        );
        assert!(world.lock_on());
        world.step(InputSnapshot::new(), &mut audio, &mut particles);
        world.step(
            InputSnapshot::new().with_button(Button::LockOn),
            &mut audio,
            &mut particles,
        );
        assert!(!world.lock_on());
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let (mut a, mut audio_a, mut particles_a) = make_world(99);
        let (mut b, mut audio_b, mut particles_b) = make_world(99);
        for _ in 0..1200 {
            a.step(InputSnapshot::new(), &mut audio_a, &mut particles_a);
            b.step(InputSnapshot::new(), &mut audio_b, &mut particles_b);
        }
        assert_eq!(a.boss().state_name(), b.boss().state_name());
        let pa = a.boss().position();
        let pb = b.boss().position();
        assert!((pa - pb).magnitude() < 1e-6);
    }
}
