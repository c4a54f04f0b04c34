//! Game configuration
//!
//! Every tunable lives here so a build can rebalance the fight from a RON
//! file without touching code. The `Default` impls are the shipped values;
//! the loader falls back to them when no file is present.

use std::path::Path;

use arena_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file was not valid RON
    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Top-level game configuration
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player tuning
    pub player: PlayerConfig,
    /// Boss tuning
    pub boss: BossConfig,
    /// Projectile tuning
    pub projectile: ProjectileConfig,
}

impl GameConfig {
    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::de::from_str(&text)?)
    }

    /// Load from a RON file, falling back to defaults if it is missing or
    /// malformed
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default config ({err})");
                Self::default()
            }
        }
    }
}

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum hit points
    pub max_hp: f32,
    /// Ground movement speed per frame
    pub move_speed: f32,
    /// Stick deflection below which movement is ignored
    pub stick_dead_zone: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Resting height of the player center
    pub ground_height: f32,
    /// Arena half width; x and z are clamped to ±this
    pub move_limit: f32,
    /// Slerp factor easing the model toward its destination orientation
    pub turn_rate: f32,
    /// Invincibility window after taking a hit, in frames
    pub invincible_frames: u32,
    /// Dash duration in frames
    pub dash_frames: u32,
    /// Dash speed per frame
    pub dash_speed: f32,
    /// Frames before another dash is allowed
    pub dash_cooldown: u32,
    /// Initial upward speed of a jump
    pub jump_speed: f32,
    /// Fraction of ground speed available while airborne
    pub air_control: f32,
    /// Multiplier applied to damage taken while guarding
    pub guard_damage_scale: f32,
    /// Distance within which attacks turn the player toward the boss
    pub attack_face_distance: f32,
    /// Distance within which attack steps stop moving the player forward
    pub attack_stop_distance: f32,
    /// Body collider half extents
    pub half_extents: Vec3,
    /// Weapon hitbox half extents
    pub weapon_half_extents: Vec3,
    /// Weapon hitbox offset from the player origin
    pub weapon_offset: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_hp: 40.0,
            move_speed: 0.6,
            stick_dead_zone: 0.7,
            gravity: 0.05,
            ground_height: 1.0,
            move_limit: 49.0,
            turn_rate: 0.4,
            invincible_frames: 60,
            dash_frames: 10,
            dash_speed: 1.0,
            dash_cooldown: 30,
            jump_speed: 0.7,
            air_control: 0.3,
            guard_damage_scale: 0.25,
            attack_face_distance: 16.0,
            attack_stop_distance: 6.0,
            half_extents: Vec3::new(1.0, 1.0, 1.0),
            weapon_half_extents: Vec3::new(0.5, 0.5, 2.0),
            weapon_offset: Vec3::new(0.0, 0.0, 2.0),
        }
    }
}

/// Boss tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossConfig {
    /// Maximum hit points
    pub max_hp: f32,
    /// World position the boss spawns at
    pub spawn_position: Vec3,
    /// Arena half width for the boss; x and z clamped to ±this
    pub move_limit: f32,
    /// Seek speed toward the player per frame
    pub seek_speed: f32,
    /// Distance at which the boss stops closing in
    pub seek_stop_distance: f32,
    /// Slerp factor easing toward the player
    pub turn_rate: f32,
    /// Minimum frames between attacks
    pub attack_interval_min: u32,
    /// Maximum frames between attacks
    pub attack_interval_max: u32,
    /// Body collider half extents
    pub half_extents: Vec3,
    /// Frames spent stunned after a parry
    pub stun_frames: u32,
    /// Knockback speed per frame when the combo finisher lands
    pub finisher_knockback: f32,
    /// Tackle attack tuning
    pub tackle: TackleConfig,
    /// Crash-down attack tuning
    pub crash_down: CrashDownConfig,
    /// Missile volley tuning
    pub missile_attack: MissileAttackConfig,
    /// Laser sweep tuning
    pub laser_attack: LaserAttackConfig,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_hp: 800.0,
            spawn_position: Vec3::new(0.0, 0.0, 20.0),
            move_limit: 47.0,
            seek_speed: 0.1,
            seek_stop_distance: 10.0,
            turn_rate: 0.4,
            attack_interval_min: 120,
            attack_interval_max: 240,
            half_extents: Vec3::new(2.0, 2.0, 2.0),
            stun_frames: 120,
            finisher_knockback: 2.0,
            tackle: TackleConfig::default(),
            crash_down: CrashDownConfig::default(),
            missile_attack: MissileAttackConfig::default(),
            laser_attack: LaserAttackConfig::default(),
        }
    }
}

/// Tackle attack tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TackleConfig {
    /// Telegraph duration in frames
    pub wait_frames: u32,
    /// Recovery duration in frames
    pub recovery_frames: u32,
    /// Lerp factor toward the tackle target per frame
    pub rush_lerp: f32,
    /// Distance ahead of the boss to the tackle target
    pub reach: f32,
    /// Contact damage while tackling
    pub damage: f32,
}

impl Default for TackleConfig {
    fn default() -> Self {
        Self {
            wait_frames: 120,
            recovery_frames: 120,
            rush_lerp: 0.2,
            reach: 6.0,
            damage: 15.0,
        }
    }
}

/// Crash-down attack tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashDownConfig {
    /// Telegraph duration in frames
    pub wait_frames: u32,
    /// Recovery duration in frames
    pub recovery_frames: u32,
    /// Lerp factor toward the hover point per frame
    pub ascend_lerp: f32,
    /// Hover height above the captured target
    pub hover_height: f32,
    /// Fall speed per frame during the drop
    pub drop_speed: f32,
    /// Contact damage while dropping
    pub damage: f32,
}

impl Default for CrashDownConfig {
    fn default() -> Self {
        Self {
            wait_frames: 60,
            recovery_frames: 120,
            ascend_lerp: 0.2,
            hover_height: 8.0,
            drop_speed: 2.0,
            damage: 20.0,
        }
    }
}

/// Missile volley tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileAttackConfig {
    /// Telegraph duration in frames
    pub wait_frames: u32,
    /// Frames between volleys
    pub fire_interval: u32,
    /// Number of two-missile volleys per attack
    pub volleys: u32,
    /// Recovery duration in frames
    pub recovery_frames: u32,
    /// Muzzle position of the right-side missile in boss space; the left
    /// side mirrors x
    pub launch_offset: Vec3,
    /// Launch velocity of the left/right missiles in boss space
    pub launch_velocity: Vec3,
}

impl Default for MissileAttackConfig {
    fn default() -> Self {
        Self {
            wait_frames: 60,
            fire_interval: 30,
            volleys: 3,
            recovery_frames: 120,
            launch_offset: Vec3::new(1.0, 2.5, 0.0),
            launch_velocity: Vec3::new(0.2, 0.2, 0.0),
        }
    }
}

/// Laser sweep tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserAttackConfig {
    /// Lerp factor toward the hover point per frame
    pub approach_lerp: f32,
    /// World-space hover point the boss charges from
    pub hover_point: Vec3,
    /// Charge duration in frames before the beam fires
    pub charge_frames: u32,
    /// Yaw swept per frame while the beam is live, in radians
    pub sweep_rate: f32,
    /// Contact damage of the boss body while the beam sweeps
    pub contact_damage: f32,
    /// Recovery duration in frames
    pub recovery_frames: u32,
}

impl Default for LaserAttackConfig {
    fn default() -> Self {
        Self {
            approach_lerp: 0.1,
            hover_point: Vec3::new(0.0, 3.0, 0.0),
            charge_frames: 300,
            sweep_rate: 0.02,
            contact_damage: 10.0,
            recovery_frames: 120,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Missile speed per frame
    pub missile_speed: f32,
    /// Frames of homing before a missile flies straight
    pub missile_tracking_frames: u32,
    /// Per-frame increment of the homing blend parameter
    pub missile_blend_rate: f32,
    /// Upper bound of the homing blend parameter
    pub missile_blend_cap: f32,
    /// Damage dealt by a missile hit
    pub missile_damage: f32,
    /// Missile collider half extents
    pub missile_half_extents: Vec3,
    /// Playfield bound; missiles die past ±this on x and z
    pub missile_bound: f32,
    /// Height below which missiles detonate
    pub missile_floor: f32,
    /// Damage dealt by the laser per hit
    pub laser_damage: f32,
    /// Scale the laser grows toward
    pub laser_target_scale: Vec3,
    /// Per-frame lerp factor of the laser's growth
    pub laser_grow_lerp: f32,
    /// Frames the beam stays live once fired
    pub laser_lifetime: u32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            missile_speed: 0.8,
            missile_tracking_frames: 120,
            missile_blend_rate: 1.0 / 600.0,
            missile_blend_cap: 0.1,
            missile_damage: 10.0,
            missile_half_extents: Vec3::new(0.5, 0.5, 0.5),
            missile_bound: 100.0,
            missile_floor: 1.0,
            laser_damage: 10.0,
            laser_target_scale: Vec3::new(2.0, 2.0, 70.0),
            laser_grow_lerp: 0.2,
            laser_lifetime: 600,
        }
    }
}
