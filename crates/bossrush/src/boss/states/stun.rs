//! Stun: parried, motionless, and harmless

use arena_engine::scene::transform::WorldTransform;

use crate::boss::states::{BossState, NormalState};
use crate::boss::BossCtx;

/// Frozen in place after a parry
#[derive(Debug)]
pub struct StunState {
    transform: WorldTransform,
    timer: u32,
}

impl StunState {
    /// Enter the state
    pub fn enter(transform: WorldTransform) -> Self {
        Self { transform, timer: 0 }
    }

    pub(crate) fn update(&mut self, ctx: &mut BossCtx) -> Option<BossState> {
        *ctx.is_attack = false;
        *ctx.contact_damage = 0.0;

        self.timer += 1;
        if self.timer >= ctx.config.stun_frames {
            return Some(BossState::Normal(NormalState::enter(
                self.transform.clone(),
                ctx.rng,
                ctx.config,
            )));
        }

        self.transform.refresh_from_quaternion(None);
        None
    }

    pub(crate) fn transform(&self) -> &WorldTransform {
        &self.transform
    }
}
