//! Crash down: rise above the player's position, hang, then slam

use arena_engine::foundation::math::utils::{face_direction, lerp_vec3};
use arena_engine::foundation::math::{Vec3, Vec4};
use arena_engine::ports::particles::EmitterSpec;
use arena_engine::scene::transform::WorldTransform;

use crate::boss::states::{clamp_to_arena, BossState, NormalState};
use crate::boss::BossCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ascend,
    Hang,
    Fall,
    Recovery,
}

/// Slam attack aimed at where the player stood when it started
#[derive(Debug)]
pub struct CrashDownState {
    transform: WorldTransform,
    phase: Phase,
    timer: u32,
    hover: Vec3,
}

impl CrashDownState {
    /// Enter the state; the target is the player's position at entry
    pub fn enter(transform: WorldTransform, ctx: &mut BossCtx) -> Self {
        let mut hover = ctx.player.position;
        hover.y = ctx.config.crash_down.hover_height;
        clamp_to_arena(&mut hover, ctx.config.move_limit);

        // Telegraph decal on the impact point
        let mut impact = hover;
        impact.y = 0.0;
        ctx.particles.spawn(
            EmitterSpec::at(impact)
                .with_area(Vec3::new(2.0, 0.1, 2.0))
                .with_color(Vec4::new(1.0, 0.2, 0.2, 0.6))
                .with_delete_time(ctx.config.crash_down.wait_frames),
        );

        Self { transform, phase: Phase::Ascend, timer: 0, hover }
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        match self.phase {
            Phase::Ascend => {
                let mut toward = self.hover - self.transform.translation;
                toward.y = 0.0;
                self.transform.quaternion = self
                    .transform
                    .quaternion
                    .slerp(&face_direction(toward), ctx.config.turn_rate);
                self.transform.translation = lerp_vec3(
                    self.transform.translation,
                    self.hover,
                    ctx.config.crash_down.ascend_lerp,
                );
                if (self.hover - self.transform.translation).magnitude() < 1e-2 {
                    self.phase = Phase::Hang;
                    self.timer = 0;
                }
            }
            Phase::Hang => {
                self.timer += 1;
                if self.timer >= ctx.config.crash_down.wait_frames {
                    self.phase = Phase::Fall;
                    *ctx.is_attack = true;
                    *ctx.contact_damage = ctx.config.crash_down.damage;
                }
            }
            Phase::Fall => {
                self.transform.translation.y -= ctx.config.crash_down.drop_speed;
                if self.transform.translation.y <= 0.0 {
                    self.transform.translation.y = 0.0;
                    self.phase = Phase::Recovery;
                    self.timer = 0;
                    *ctx.is_attack = false;
                }
            }
            Phase::Recovery => {
                self.timer += 1;
                if self.timer >= ctx.config.crash_down.recovery_frames {
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
        matches!(self.phase, Phase::Ascend | Phase::Hang)
    }

    pub(crate) fn transform(&self) -> &WorldTransform {
        &self.transform
    }
}
