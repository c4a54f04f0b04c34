//! The boss: shell, state machine, and its projectiles
//!
//! The shell owns hit points, contact flags, and the projectile lists; the
//! active state owns the authoritative transform. Every frame the shell runs
//! the state, prunes and updates projectiles, then republishes the state's
//! transform as its own.

pub mod states;

use arena_engine::foundation::math::{Mat4, Vec3};
use arena_engine::physics::shape::{CollisionShape, WorldShape};
use arena_engine::ports::audio::{AudioPort, SoundHandle};
use arena_engine::ports::particles::ParticlePort;
use arena_engine::scene::transform::WorldTransform;
use log::debug;
use rand::rngs::StdRng;

use crate::combo::COMBO_LENGTH;
use crate::config::{BossConfig, ProjectileConfig};
use crate::health::Health;
use crate::laser::Laser;
use crate::missile::Missile;
use crate::player::PlayerView;

use self::states::{BossState, NormalState, StunState};

/// Read-only snapshot of the boss for the player and the collision pass
#[derive(Debug, Clone, Copy)]
pub struct BossView {
    /// World position
    pub position: Vec3,
    /// World matrix, used to orient knockback
    pub world: Mat4,
    /// Whether contact with the body currently hurts
    pub is_attack: bool,
    /// Damage dealt on attacking contact
    pub contact_damage: f32,
    /// Body collider half extents
    pub half_extents: Vec3,
}

/// Per-frame context handed to the active state
pub struct BossCtx<'a> {
    /// Snapshot of the player taken before the boss update
    pub player: &'a PlayerView,
    /// World rng; owned by the world so runs are reproducible
    pub rng: &'a mut StdRng,
    /// Boss tuning
    pub config: &'a BossConfig,
    /// Projectile tuning
    pub projectile_config: &'a ProjectileConfig,
    /// Whether body contact hurts; states raise this during active attacks
    pub is_attack: &'a mut bool,
    /// Damage dealt on attacking contact; set alongside `is_attack`
    pub contact_damage: &'a mut f32,
    /// Live missiles; states push into this
    pub missiles: &'a mut Vec<Missile>,
    /// Live lasers; states push into this and mark them dead
    pub lasers: &'a mut Vec<Laser>,
    /// Id source for newly spawned projectiles
    pub next_projectile_id: &'a mut u32,
    /// Particle backend for telegraphs
    pub particles: &'a mut dyn ParticlePort,
}

/// The boss
pub struct Boss {
    config: BossConfig,
    projectile_config: ProjectileConfig,
    transform: WorldTransform,
    state: BossState,
    health: Health,
    is_attack: bool,
    contact_damage: f32,
    weapon_contact: bool,
    pre_weapon_contact: bool,
    stun_requested: bool,
    missiles: Vec<Missile>,
    lasers: Vec<Laser>,
    next_projectile_id: u32,
}

impl Boss {
    /// Create the boss at `spawn`, starting in the seek state
    pub fn new(
        config: BossConfig,
        projectile_config: ProjectileConfig,
        spawn: Vec3,
        rng: &mut StdRng,
    ) -> Self {
        let mut transform = WorldTransform::from_translation(spawn);
        transform.refresh_from_quaternion(None);
        let state = BossState::Normal(NormalState::enter(transform.clone(), rng, &config));
        Self {
            health: Health::new(config.max_hp),
            config,
            projectile_config,
            transform,
            state,
            is_attack: false,
            contact_damage: 0.0,
            weapon_contact: false,
            pre_weapon_contact: false,
            stun_requested: false,
            missiles: Vec::new(),
            lasers: Vec::new(),
            next_projectile_id: 0,
        }
    }

    /// Run one simulation frame
    pub fn update(
        &mut self,
        player: &PlayerView,
        rng: &mut StdRng,
        audio: &mut dyn AudioPort,
        explosion: SoundHandle,
        particles: &mut dyn ParticlePort,
    ) {
        self.pre_weapon_contact = self.weapon_contact;
        self.weapon_contact = false;

        if self.stun_requested {
            self.stun_requested = false;
            self.is_attack = false;
            debug!("boss state {} -> stun (parried)", self.state.name());
            self.state = BossState::Stun(StunState::enter(self.state.transform().clone()));
        }

        let next = {
            let mut ctx = BossCtx {
                player,
                rng,
                config: &self.config,
                projectile_config: &self.projectile_config,
                is_attack: &mut self.is_attack,
                contact_damage: &mut self.contact_damage,
                missiles: &mut self.missiles,
                lasers: &mut self.lasers,
                next_projectile_id: &mut self.next_projectile_id,
                particles,
            };
            self.state.update(&mut ctx)
        };
        if let Some(next) = next {
            debug!("boss state {} -> {}", self.state.name(), next.name());
            self.state = next;
        }

        // Lazy deletion: prune the dead, then advance the survivors
        self.missiles.retain(|m| !m.is_dead());
        for missile in &mut self.missiles {
            missile.update(player.position, &self.projectile_config, audio, explosion);
        }
        self.lasers.retain(|l| !l.is_dead());
        let owner = self.state.transform().clone();
        for laser in &mut self.lasers {
            laser.update(&owner, &self.projectile_config);
        }

        self.transform = owner;
        self.transform.refresh_from_quaternion(None);
    }

    /// Resolve a weapon contact. Damage lands only on the rising edge of the
    /// contact-flag pair; a finisher landed during a telegraph parries the
    /// boss into a stun on its next update.
    pub fn on_weapon_hit(&mut self, player: &PlayerView) -> bool {
        self.weapon_contact = true;
        if self.pre_weapon_contact {
            return false;
        }
        self.health.take_damage(player.damage);
        debug!(
            "boss took {} damage from combo step {}, hp {}",
            player.damage, player.combo_index, self.health.current
        );
        if self.state.is_telegraphing() && player.combo_index == COMBO_LENGTH - 1 {
            self.stun_requested = true;
        } else {
            self.state.on_weapon_hit(player, &self.config);
        }
        true
    }

    /// Detonate the missile that hit something; pruned next frame
    pub fn detonate_missile(
        &mut self,
        id: u32,
        audio: &mut dyn AudioPort,
        explosion: SoundHandle,
    ) {
        if let Some(missile) = self.missiles.iter_mut().find(|m| m.id() == id) {
            missile.detonate(audio, explosion);
        }
    }

    /// Current world position
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Current world matrix
    pub fn world(&self) -> &Mat4 {
        &self.transform.world
    }

    /// Snapshot for the player and the collision pass
    pub fn view(&self) -> BossView {
        BossView {
            position: self.transform.translation,
            world: self.transform.world,
            is_attack: self.is_attack,
            contact_damage: self.contact_damage,
            half_extents: self.config.half_extents,
        }
    }

    /// Body collider for the collision pass
    pub fn body_shape(&self) -> WorldShape {
        CollisionShape::Aabb { half_extents: self.config.half_extents }
            .to_world_space(&self.transform.world)
    }

    /// Current health
    pub fn health(&self) -> Health {
        self.health
    }

    /// Whether body contact currently hurts
    pub fn is_attack(&self) -> bool {
        self.is_attack
    }

    /// Live missiles
    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    /// Live lasers
    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    /// Name of the active state, for logs and tests
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }
}
