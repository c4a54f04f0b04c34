//! Laser attack: hover, charge, and sweep a beam across the arena
//!
//! The beam entity never times itself out; this state owns its lifetime and
//! marks it dead when the sweep timer expires.

use arena_engine::foundation::math::utils::{face_direction, lerp_vec3};
use arena_engine::foundation::math::{Quat, Vec3, Vec4};
use arena_engine::ports::particles::EmitterSpec;
use arena_engine::scene::transform::WorldTransform;

use crate::boss::states::{BossState, NormalState};
use crate::boss::BossCtx;
use crate::laser::Laser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Approach,
    Charge,
    Sweep,
    Recovery,
}

/// Hover at the arena center, charge, then sweep the beam by yawing
#[derive(Debug)]
pub struct LaserAttackState {
    transform: WorldTransform,
    phase: Phase,
    timer: u32,
    laser_id: Option<u32>,
}

impl LaserAttackState {
    /// Enter the state
    pub fn enter(transform: WorldTransform) -> Self {
        Self {
            transform,
            phase: Phase::Approach,
            timer: 0,
            laser_id: None,
        }
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        match self.phase {
            Phase::Approach => {
                let hover = ctx.config.laser_attack.hover_point;
                self.transform.translation =
                    lerp_vec3(self.transform.translation, hover, ctx.config.laser_attack.approach_lerp);
                if (hover - self.transform.translation).magnitude() < 5e-2 {
                    self.phase = Phase::Charge;
                    self.timer = 0;
                    ctx.particles.spawn(
                        EmitterSpec::at(self.transform.translation)
                            .with_color(Vec4::new(0.4, 0.8, 1.0, 1.0))
                            .with_delete_time(ctx.config.laser_attack.charge_frames)
                            .with_scale(0.2, 0.6),
                    );
                }
            }
            Phase::Charge => {
                let mut to_player = ctx.player.position - self.transform.translation;
                to_player.y = 0.0;
                self.transform.quaternion = self
                    .transform
                    .quaternion
                    .slerp(&face_direction(to_player), ctx.config.turn_rate);

                self.timer += 1;
                if self.timer > ctx.config.laser_attack.charge_frames {
                    let id = *ctx.next_projectile_id;
                    *ctx.next_projectile_id += 1;
                    ctx.lasers.push(Laser::new(id, self.transform.translation));
                    self.laser_id = Some(id);
                    *ctx.is_attack = true;
                    *ctx.contact_damage = ctx.config.laser_attack.contact_damage;
                    self.phase = Phase::Sweep;
                    self.timer = 0;
                }
            }
            Phase::Sweep => {
                self.transform.quaternion =
                    Quat::from_axis_angle(&Vec3::y_axis(), ctx.config.laser_attack.sweep_rate)
                        * self.transform.quaternion;
                self.timer += 1;
                if self.timer >= ctx.projectile_config.laser_lifetime {
                    if let Some(id) = self.laser_id.take() {
                        if let Some(laser) = ctx.lasers.iter_mut().find(|l| l.id() == id) {
                            laser.kill();
                        }
                    }
                    *ctx.is_attack = false;
                    *ctx.contact_damage = 0.0;
                    self.phase = Phase::Recovery;
                    self.timer = 0;
                }
            }
            Phase::Recovery => {
                self.timer += 1;
                if self.timer >= ctx.config.laser_attack.recovery_frames {
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
        matches!(self.phase, Phase::Approach | Phase::Charge)
    }

    pub(crate) fn transform(&self) -> &WorldTransform {
        &self.transform
    }
}
