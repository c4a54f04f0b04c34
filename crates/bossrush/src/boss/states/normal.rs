//! Seek state between attacks

use arena_engine::foundation::math::utils::face_direction;
use arena_engine::foundation::math::Vec3;
use arena_engine::scene::transform::WorldTransform;
use rand::rngs::StdRng;
use rand::Rng;

use crate::boss::states::{
    clamp_to_arena, BossState, CrashDownState, LaserAttackState, MissileAttackState, TackleState,
};
use crate::boss::BossCtx;
use crate::combo::COMBO_LENGTH;
use crate::config::BossConfig;
use crate::player::PlayerView;

/// Walking toward the player until the next attack timer expires
#[derive(Debug)]
pub struct NormalState {
    transform: WorldTransform,
    attack_timer: u32,
    attack_delay: u32,
    knockback_velocity: Vec3,
    knockback_frames: u32,
}

impl NormalState {
    /// Enter the state, drawing the next attack delay from the rng
    pub fn enter(transform: WorldTransform, rng: &mut StdRng, config: &BossConfig) -> Self {
        let attack_delay =
            rng.gen_range(config.attack_interval_min..=config.attack_interval_max);
        Self {
            transform,
            attack_timer: 0,
            attack_delay,
            knockback_velocity: Vec3::zeros(),
            knockback_frames: 0,
        }
    }

    /// Frames until the next attack fires, given no interruptions
    pub fn attack_delay(&self) -> u32 {
        self.attack_delay
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        *ctx.is_attack = false;
        *ctx.contact_damage = 0.0;

        if self.knockback_frames > 0 {
            self.transform.translation += self.knockback_velocity;
            self.knockback_frames -= 1;
        } else {
            let mut to_player = ctx.player.position - self.transform.translation;
            to_player.y = 0.0;
            if to_player.magnitude() >= ctx.config.seek_stop_distance {
                if let Some(dir) = to_player.try_normalize(1e-6) {
                    self.transform.translation += dir * ctx.config.seek_speed;
                }
            }
            self.transform.quaternion = self
                .transform
                .quaternion
                .slerp(&face_direction(to_player), ctx.config.turn_rate);

            self.attack_timer += 1;
            if self.attack_timer > self.attack_delay {
                let transform = self.transform.clone();
                let next = match ctx.rng.gen_range(0..4) {
                    0 => BossState::Tackle(TackleState::enter(transform, ctx)),
                    1 => BossState::CrashDown(CrashDownState::enter(transform, ctx)),
                    2 => BossState::MissileAttack(MissileAttackState::enter(transform)),
                    _ => BossState::LaserAttack(LaserAttackState::enter(transform)),
                };
                return Some(next);
            }
        }

        clamp_to_arena(&mut self.transform.translation, ctx.config.move_limit);
        self.transform.refresh_from_quaternion(None);
        None
    }

    /// Take knockback from a weapon hit: the finisher launches the boss away,
    /// earlier steps shove it along the swing, in both cases for the rest of
    /// the player's attack step
    pub(crate) fn absorb_hit(&mut self, player: &PlayerView, config: &BossConfig) {
        if player.combo_index == COMBO_LENGTH - 1 {
            let mut away = self.transform.translation - player.position;
            away.y = 0.0;
            self.knockback_velocity = away
                .try_normalize(1e-6)
                .map_or_else(Vec3::zeros, |d| d * config.finisher_knockback);
        } else {
            self.knockback_velocity = player.swing_velocity;
        }
        self.knockback_frames = player.attack_frames_remaining;
    }

    pub(crate) fn transform(&self) -> &WorldTransform {
        &self.transform
    }
}
