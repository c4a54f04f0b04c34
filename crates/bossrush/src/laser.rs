//! Sweeping beam laser fired by the boss
//!
//! The beam never times itself out; the laser attack state that owns it
//! marks it dead when the sweep finishes, and the boss prunes it.

use arena_engine::foundation::math::utils::lerp_vec3;
use arena_engine::foundation::math::{Mat4, Vec3};
use arena_engine::physics::shape::{CollisionShape, WorldShape};
use arena_engine::scene::transform::WorldTransform;

use crate::config::ProjectileConfig;

/// A live laser beam
#[derive(Debug)]
pub struct Laser {
    id: u32,
    transform: WorldTransform,
    dead: bool,
}

impl Laser {
    /// Spawn a beam at the owner's position; it grows to full length over
    /// the next frames
    pub fn new(id: u32, origin: Vec3) -> Self {
        let mut transform = WorldTransform::from_translation(origin);
        transform.scale = Vec3::new(0.1, 0.1, 0.1);
        Self { id, transform, dead: false }
    }

    /// Stable id, used to route collision contacts back to this laser
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Follow the owner's yaw and grow toward the target scale
    pub fn update(&mut self, owner: &WorldTransform, config: &ProjectileConfig) {
        self.transform.quaternion = owner.quaternion;
        self.transform.scale =
            lerp_vec3(self.transform.scale, config.laser_target_scale, config.laser_grow_lerp);

        // The beam extends forward from the owner, not through it
        let forward = self.transform.quaternion * Vec3::z();
        self.transform.translation =
            owner.translation + forward * (self.transform.scale.z * 0.5);
        self.transform.refresh_from_quaternion(None);
    }

    /// Whether the beam has grown enough to hurt
    pub fn is_solid(&self, config: &ProjectileConfig) -> bool {
        self.transform.scale.z >= config.laser_target_scale.z * 0.9
    }

    /// Mark the beam for pruning; called by the owning attack state
    pub fn kill(&mut self) {
        self.dead = true;
    }

    /// Whether the beam should be pruned
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Current world matrix
    pub fn world(&self) -> &Mat4 {
        &self.transform.world
    }

    /// World-space collider for this frame; the transform scale carries the
    /// beam's dimensions
    pub fn world_shape(&self) -> WorldShape {
        CollisionShape::Obb { half_extents: Vec3::new(0.5, 0.5, 0.5) }
            .to_world_space(&self.transform.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::physics::shape::WorldShape;

    #[test]
    fn test_laser_grows_to_target_scale() {
        let config = ProjectileConfig::default();
        let owner = WorldTransform::from_translation(Vec3::new(0.0, 3.0, 0.0));
        let mut laser = Laser::new(0, owner.translation);
        assert!(!laser.is_solid(&config));
        for _ in 0..60 {
            laser.update(&owner, &config);
        }
        assert!(laser.is_solid(&config));
        assert!((laser.transform.scale.z - config.laser_target_scale.z).abs() < 1.0);
    }

    #[test]
    fn test_laser_extends_forward_from_owner() {
        let config = ProjectileConfig::default();
        let owner = WorldTransform::from_translation(Vec3::zeros());
        let mut laser = Laser::new(0, owner.translation);
        for _ in 0..120 {
            laser.update(&owner, &config);
        }
        // Owner faces +z; the beam center sits half a length ahead
        assert!(laser.transform.translation.z > 30.0);
        let WorldShape::Obb(obb) = laser.world_shape() else {
            panic!("laser collider should be an obb");
        };
        assert!((obb.half_extents.z - config.laser_target_scale.z * 0.5).abs() < 1.0);
    }

    #[test]
    fn test_kill_marks_dead() {
        let mut laser = Laser::new(0, Vec3::zeros());
        assert!(!laser.is_dead());
        laser.kill();
        assert!(laser.is_dead());
    }
}
