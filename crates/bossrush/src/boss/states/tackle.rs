//! Tackle: telegraph, rush forward, recover

use arena_engine::foundation::math::utils::lerp_vec3;
use arena_engine::foundation::math::{Vec3, Vec4};
use arena_engine::ports::particles::EmitterSpec;
use arena_engine::scene::transform::WorldTransform;

use crate::boss::states::{clamp_to_arena, BossState, NormalState};
use crate::boss::BossCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Wait,
    Rush,
    Recovery,
}

/// Rush toward a point ahead of the boss after a long telegraph
#[derive(Debug)]
pub struct TackleState {
    transform: WorldTransform,
    phase: Phase,
    timer: u32,
    target: Vec3,
}

impl TackleState {
    /// Enter the state; the target is fixed at entry and telegraphed
    pub fn enter(transform: WorldTransform, ctx: &mut BossCtx) -> Self {
        let forward = transform.quaternion * Vec3::z();
        let mut target = transform.translation + forward * ctx.config.tackle.reach;
        clamp_to_arena(&mut target, ctx.config.move_limit);

        // Telegraph strip between the boss and the target
        let midpoint = (transform.translation + target) * 0.5;
        ctx.particles.spawn(
            EmitterSpec::at(midpoint)
                .with_area((target - transform.translation).abs() * 0.5)
                .with_color(Vec4::new(1.0, 0.2, 0.2, 0.6))
                .with_delete_time(ctx.config.tackle.wait_frames),
        );

        Self { transform, phase: Phase::Wait, timer: 0, target }
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        match self.phase {
            Phase::Wait => {
                self.timer += 1;
                if self.timer >= ctx.config.tackle.wait_frames {
                    self.phase = Phase::Rush;
                    *ctx.is_attack = true;
                    *ctx.contact_damage = ctx.config.tackle.damage;
                }
            }
            Phase::Rush => {
                self.transform.translation =
                    lerp_vec3(self.transform.translation, self.target, ctx.config.tackle.rush_lerp);
                if (self.target - self.transform.translation).magnitude() < 1e-3 {
                    self.phase = Phase::Recovery;
                    self.timer = 0;
                    *ctx.is_attack = false;
                }
            }
            Phase::Recovery => {
                self.timer += 1;
                if self.timer >= ctx.config.tackle.recovery_frames {
                    return Some(BossState::Normal(NormalState::enter(
                        self.transform.clone(),
                        ctx.rng,
                        ctx.config,
                    )));
                }
            }
        }

        self.transform.refresh_from_quaternion(None);
        None
    }

    pub(crate) fn is_telegraphing(&self) -> bool {
        self.phase == Phase::Wait
    }

    pub(crate) fn transform(&self) -> &WorldTransform {
        &self.transform
    }
}
