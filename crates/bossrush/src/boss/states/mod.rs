//! Boss attack states
//!
//! Each state owns a full copy of the boss transform and is the authority
//! over it while active. Transitions replace the state wholesale: `update`
//! returns the successor, already seeded with the outgoing state's transform,
//! so the boss's world position is identical across the swap.

mod crash_down;
mod laser_attack;
mod missile_attack;
mod normal;
mod stun;
mod tackle;

pub use crash_down::CrashDownState;
pub use laser_attack::LaserAttackState;
pub use missile_attack::MissileAttackState;
pub use normal::NormalState;
pub use stun::StunState;
pub use tackle::TackleState;

use arena_engine::foundation::math::utils::clamp;
use arena_engine::foundation::math::Vec3;
use arena_engine::scene::transform::WorldTransform;

use crate::boss::BossCtx;
use crate::config::BossConfig;
use crate::player::PlayerView;

/// The boss state machine, replaced wholesale on every transition
#[derive(Debug)]
pub enum BossState {
    /// Seeking the player between attacks
    Normal(NormalState),
    /// Forward rush after a telegraph
    Tackle(TackleState),
    /// Rise above the player and slam down
    CrashDown(CrashDownState),
    /// Volleys of homing missiles
    MissileAttack(MissileAttackState),
    /// Charge and sweep a beam across the arena
    LaserAttack(LaserAttackState),
    /// Parried: motionless and harmless
    Stun(StunState),
}

impl BossState {
    /// Run one frame; `Some` replaces this state
    pub fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        match self {
            Self::Normal(s) => s.update(ctx),
            Self::Tackle(s) => s.update(ctx),
            Self::CrashDown(s) => s.update(ctx),
            Self::MissileAttack(s) => s.update(ctx),
            Self::LaserAttack(s) => s.update(ctx),
            Self::Stun(s) => s.update(ctx),
        }
    }

    /// The authoritative boss transform
    pub fn transform(&self) -> &WorldTransform {
        match self {
            Self::Normal(s) => s.transform(),
            Self::Tackle(s) => s.transform(),
            Self::CrashDown(s) => s.transform(),
            Self::MissileAttack(s) => s.transform(),
            Self::LaserAttack(s) => s.transform(),
            Self::Stun(s) => s.transform(),
        }
    }

    /// State name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal(_) => "normal",
            Self::Tackle(_) => "tackle",
            Self::CrashDown(_) => "crash_down",
            Self::MissileAttack(_) => "missile_attack",
            Self::LaserAttack(_) => "laser_attack",
            Self::Stun(_) => "stun",
        }
    }

    /// Whether the boss is winding up an attack; a finisher landed now
    /// parries it into a stun
    pub fn is_telegraphing(&self) -> bool {
        match self {
            Self::Normal(_) | Self::Stun(_) => false,
            Self::Tackle(s) => s.is_telegraphing(),
            Self::CrashDown(s) => s.is_telegraphing(),
            Self::MissileAttack(s) => s.is_telegraphing(),
            Self::LaserAttack(s) => s.is_telegraphing(),
        }
    }

    /// React to a weapon hit; only the seek state gets pushed around
    pub fn on_weapon_hit(&mut self, player: &PlayerView, config: &BossConfig) {
        if let Self::Normal(s) = self {
            s.absorb_hit(player, config);
        }
    }
}

/// Clamp a position to the boss's arena bounds on x and z
pub(crate) fn clamp_to_arena(translation: &mut Vec3, limit: f32) {
    translation.x = clamp(translation.x, -limit, limit);
    translation.z = clamp(translation.z, -limit, limit);
}
