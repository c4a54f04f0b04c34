//! Missile attack: fire paired homing volleys

use arena_engine::foundation::math::Vec3;
use arena_engine::scene::transform::WorldTransform;

use crate::boss::states::{BossState, NormalState};
use crate::boss::BossCtx;
use crate::missile::Missile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Wait,
    Fire,
    Recovery,
}

/// Stand still and launch missile pairs at a fixed cadence
#[derive(Debug)]
pub struct MissileAttackState {
    transform: WorldTransform,
    phase: Phase,
    timer: u32,
    fire_timer: u32,
    volleys_fired: u32,
}

impl MissileAttackState {
    /// Enter the state
    pub fn enter(transform: WorldTransform) -> Self {
        Self {
            transform,
            phase: Phase::Wait,
            timer: 0,
            fire_timer: 0,
            volleys_fired: 0,
        }
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        match self.phase {
            Phase::Wait => {
                self.timer += 1;
                if self.timer >= ctx.config.missile_attack.wait_frames {
                    self.phase = Phase::Fire;
                }
            }
            Phase::Fire => {
                self.fire_timer += 1;
                if self.fire_timer >= ctx.config.missile_attack.fire_interval {
                    self.fire_timer = 0;
                    self.fire_volley(ctx);
                    self.volleys_fired += 1;
                    if self.volleys_fired >= ctx.config.missile_attack.volleys {
                        self.phase = Phase::Recovery;
                        self.timer = 0;
                    }
                }
            }
            Phase::Recovery => {
                self.timer += 1;
                if self.timer >= ctx.config.missile_attack.recovery_frames {
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

    /// Launch one missile out of each shoulder
    fn fire_volley(&self, ctx: &mut BossCtx) {
        let muzzle = ctx.config.missile_attack.launch_offset;
        let launch = ctx.config.missile_attack.launch_velocity;
        for side in [-1.0, 1.0] {
            let offset = self.transform.quaternion
                * Vec3::new(side * muzzle.x, muzzle.y, muzzle.z);
            let velocity =
                self.transform.quaternion * Vec3::new(side * launch.x, launch.y, launch.z);
            let id = *ctx.next_projectile_id;
            *ctx.next_projectile_id += 1;
            ctx.missiles
                .push(Missile::new(id, self.transform.translation + offset, velocity));
        }
    }

    pub(crate) fn is_telegraphing(&self) -> bool {
        self.phase == Phase::Wait
    }

    pub(crate) fn transform(&self) -> &WorldTransform {
        &self.transform
    }
}
