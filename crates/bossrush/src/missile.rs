//! Homing missiles fired by the boss

use arena_engine::foundation::math::utils::slerp_vec3;
use arena_engine::foundation::math::{Mat4, Vec3};
use arena_engine::physics::shape::{CollisionShape, WorldShape};
use arena_engine::ports::audio::{AudioPort, SoundHandle};
use arena_engine::scene::transform::WorldTransform;

use crate::config::ProjectileConfig;

/// A single homing missile
#[derive(Debug)]
pub struct Missile {
    id: u32,
    transform: WorldTransform,
    velocity: Vec3,
    blend: f32,
    tracking_timer: u32,
    tracking_complete: bool,
    dead: bool,
}

impl Missile {
    /// Spawn a missile at `position` with an initial velocity
    pub fn new(id: u32, position: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            transform: WorldTransform::from_translation(position),
            velocity,
            blend: 0.0,
            tracking_timer: 0,
            tracking_complete: false,
            dead: false,
        }
    }

    /// Stable id, used to route collision contacts back to this missile
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Steer toward the player and integrate one frame
    pub fn update(
        &mut self,
        player_position: Vec3,
        config: &ProjectileConfig,
        audio: &mut dyn AudioPort,
        explosion: SoundHandle,
    ) {
        // Homing tightens slowly, then cuts out entirely
        if self.blend < config.missile_blend_cap {
            self.blend += config.missile_blend_rate;
        }
        if self.tracking_timer < config.missile_tracking_frames {
            self.tracking_timer += 1;
        } else {
            self.tracking_complete = true;
        }

        let to_player = player_position - self.transform.translation;
        if !self.tracking_complete {
            self.velocity = slerp_vec3(self.velocity, to_player, self.blend);
        }
        if let Some(dir) = self.velocity.try_normalize(1e-6) {
            self.velocity = dir * config.missile_speed;
        }
        self.transform.translation += self.velocity;
        self.transform.refresh_from_quaternion(None);

        let pos = self.transform.translation;
        if pos.x.abs() >= config.missile_bound
            || pos.z.abs() >= config.missile_bound
            || pos.y <= config.missile_floor
        {
            self.detonate(audio, explosion);
        }
    }

    /// Kill the missile and play its explosion
    pub fn detonate(&mut self, audio: &mut dyn AudioPort, explosion: SoundHandle) {
        if !self.dead {
            self.dead = true;
            audio.play(explosion, false, 0.5);
        }
    }

    /// Whether the missile should be pruned
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Current world position
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Current world matrix
    pub fn world(&self) -> &Mat4 {
        &self.transform.world
    }

    /// World-space collider for this frame
    pub fn world_shape(&self, config: &ProjectileConfig) -> WorldShape {
        CollisionShape::Aabb { half_extents: config.missile_half_extents }
            .to_world_space(&self.transform.world)
    }
}
