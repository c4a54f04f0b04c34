//! Player character: behavior state machine, movement, and combat resolution
//!
//! Behaviors never switch themselves mid-frame. Anything that wants a
//! transition writes `behavior_request`; the request is consumed exactly once
//! at the top of the next update, which runs the new behavior's enter logic
//! before its per-frame body. A later write in the same frame overwrites an
//! earlier one.

use arena_engine::foundation::math::utils::{clamp, face_direction};
use arena_engine::foundation::math::{Mat4, Mat4Ext, Quat, Vec3};
use arena_engine::input::{Button, InputState};
use arena_engine::physics::shape::{Aabb, CollisionShape, WorldShape};
use arena_engine::scene::transform::{TransformArena, TransformKey, WorldTransform};
use log::debug;

use crate::boss::BossView;
use crate::combo::{AttackPhase, ComboStep, AIR_COMBO, COMBO_LENGTH, GROUND_COMBO};
use crate::config::PlayerConfig;
use crate::health::{Health, Invincibility};

/// Player behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Grounded movement and the hub for every trigger
    Root,
    /// Short burst of speed with projectile immunity
    Dash,
    /// Airborne, with reduced steering
    Jump,
    /// Ground melee combo
    Attack,
    /// Air melee combo
    AirAttack,
    /// Held guard; mitigates damage and suppresses knockback
    Guard,
    /// Launched by a boss hit; no steering until grounded
    KnockBack,
}

/// Per-frame context handed to the player update
pub struct PlayerCtx<'a> {
    /// Transform storage shared by the whole world
    pub arena: &'a mut TransformArena,
    /// This frame's input
    pub input: &'a InputState,
    /// Snapshot of the boss taken before this update
    pub boss: &'a BossView,
    /// Camera yaw used to rotate stick input into world space
    pub camera_yaw: f32,
    /// Whether lock-on is engaged
    pub lock_on: bool,
}

#[derive(Debug, Default)]
struct WorkDash {
    frames_left: u32,
    cooldown: u32,
    direction: Vec3,
}

#[derive(Debug, Default)]
struct WorkAttack {
    parameter: u32,
    combo_index: usize,
    combo_next: bool,
    in_combo: bool,
    hitbox_active: bool,
}

/// Read-only snapshot of the player for the boss and the collision pass
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    /// World position
    pub position: Vec3,
    /// Current combo step index
    pub combo_index: usize,
    /// Damage of the current combo step
    pub damage: f32,
    /// Frames left in the current attack step, zero when not attacking
    pub attack_frames_remaining: u32,
    /// Forward velocity of the current swing
    pub swing_velocity: Vec3,
}

/// The player character
pub struct Player {
    config: PlayerConfig,
    transform_key: TransformKey,
    weapon_key: TransformKey,
    behavior: Behavior,
    behavior_request: Option<Behavior>,
    destination: Quat,
    velocity: Vec3,
    health: Health,
    invincibility: Invincibility,
    dash: WorkDash,
    attack: WorkAttack,
    knockback_velocity: Vec3,
}

impl Player {
    /// Create the player at the arena origin, with its weapon parented under
    /// its transform
    pub fn new(config: PlayerConfig, arena: &mut TransformArena) -> Self {
        let spawn = Vec3::new(0.0, config.ground_height, 0.0);
        let transform_key = arena.insert(WorldTransform::from_translation(spawn));
        arena.refresh_from_quaternion(transform_key);

        let weapon_key = arena.insert(WorldTransform::from_translation(
            spawn + config.weapon_offset,
        ));
        arena.set_parent(weapon_key, transform_key);
        arena.refresh_from_euler(weapon_key);

        Self {
            health: Health::new(config.max_hp),
            config,
            transform_key,
            weapon_key,
            behavior: Behavior::Root,
            behavior_request: None,
            destination: Quat::identity(),
            velocity: Vec3::zeros(),
            invincibility: Invincibility::default(),
            dash: WorkDash::default(),
            attack: WorkAttack::default(),
            knockback_velocity: Vec3::zeros(),
        }
    }

    /// Run one simulation frame
    pub fn update(&mut self, ctx: &mut PlayerCtx) {
        if let Some(request) = self.behavior_request.take() {
            debug!("player behavior {:?} -> {:?}", self.behavior, request);
            self.behavior = request;
            match request {
                Behavior::Root => {}
                Behavior::Dash => self.enter_dash(ctx),
                Behavior::Jump => self.enter_jump(),
                Behavior::Attack | Behavior::AirAttack => self.enter_attack(ctx),
                Behavior::Guard => {}
                Behavior::KnockBack => self.enter_knockback(),
            }
        }

        if self.dash.cooldown > 0 && self.behavior != Behavior::Dash {
            self.dash.cooldown -= 1;
        }

        match self.behavior {
            Behavior::Root => self.update_root(ctx),
            Behavior::Dash => self.update_dash(ctx),
            Behavior::Jump => self.update_jump(ctx),
            Behavior::Attack => self.update_attack(ctx, false),
            Behavior::AirAttack => self.update_attack(ctx, true),
            Behavior::Guard => self.update_guard(ctx),
            Behavior::KnockBack => self.update_knockback(ctx),
        }

        self.invincibility.tick(self.config.invincible_frames);
        self.finish_frame(ctx);
    }

    fn finish_frame(&mut self, ctx: &mut PlayerCtx) {
        let limit = self.config.move_limit;
        let turn_rate = self.config.turn_rate;
        if let Some(tf) = ctx.arena.get_mut(self.transform_key) {
            tf.translation.x = clamp(tf.translation.x, -limit, limit);
            tf.translation.z = clamp(tf.translation.z, -limit, limit);
            tf.quaternion = tf.quaternion.slerp(&self.destination, turn_rate);
        }
        ctx.arena.refresh_from_quaternion(self.transform_key);

        let pitch = if self.is_attacking() {
            self.current_step().weapon_pitch(self.attack.parameter)
        } else {
            0.0
        };
        if let Some(weapon) = ctx.arena.get_mut(self.weapon_key) {
            weapon.rotation.x = pitch;
        }
        ctx.arena.refresh_from_euler(self.weapon_key);
    }

    // --- behaviors ---

    fn update_root(&mut self, ctx: &mut PlayerCtx) {
        let stick = ctx.input.left_stick();
        let stick_move = Vec3::new(stick.x, 0.0, stick.y);
        if stick_move.magnitude() > self.config.stick_dead_zone {
            let move_dir = Mat4::rotation_y(ctx.camera_yaw)
                .transform_normal(stick_move.normalize());
            if let Some(tf) = ctx.arena.get_mut(self.transform_key) {
                tf.translation += move_dir * self.config.move_speed;
            }
            self.destination = face_direction(move_dir);
        }

        self.apply_gravity(ctx);

        if ctx.input.pressed(Button::Attack) {
            self.behavior_request = Some(Behavior::Attack);
        } else if ctx.input.pressed(Button::Jump) {
            self.behavior_request = Some(Behavior::Jump);
        } else if ctx.input.pressed(Button::Dash) && self.dash.cooldown == 0 {
            self.behavior_request = Some(Behavior::Dash);
        } else if ctx.input.held(Button::Guard) && self.is_grounded(ctx.arena) {
            self.behavior_request = Some(Behavior::Guard);
        }
    }

    fn enter_dash(&mut self, ctx: &PlayerCtx) {
        self.dash.frames_left = self.config.dash_frames;
        self.dash.direction = self.facing_forward(ctx.arena);
    }

    fn update_dash(&mut self, ctx: &mut PlayerCtx) {
        if let Some(tf) = ctx.arena.get_mut(self.transform_key) {
            tf.translation += self.dash.direction * self.config.dash_speed;
        }
        self.dash.frames_left = self.dash.frames_left.saturating_sub(1);
        if ctx.input.pressed(Button::Attack) {
            // Dash attack: cut the dash short and chain straight into the combo
            self.dash.cooldown = self.config.dash_cooldown;
            self.behavior_request = Some(Behavior::Attack);
        } else if self.dash.frames_left == 0 {
            self.dash.cooldown = self.config.dash_cooldown;
            self.behavior_request = Some(Behavior::Root);
        }
    }

    fn enter_jump(&mut self) {
        self.velocity.y = self.config.jump_speed;
    }

    fn update_jump(&mut self, ctx: &mut PlayerCtx) {
        let stick = ctx.input.left_stick();
        let stick_move = Vec3::new(stick.x, 0.0, stick.y);
        if stick_move.magnitude() > self.config.stick_dead_zone {
            let move_dir = Mat4::rotation_y(ctx.camera_yaw)
                .transform_normal(stick_move.normalize());
            let speed = self.config.move_speed * self.config.air_control;
            if let Some(tf) = ctx.arena.get_mut(self.transform_key) {
                tf.translation += move_dir * speed;
            }
            self.destination = face_direction(move_dir);
        }

        if self.apply_gravity(ctx) {
            self.behavior_request = Some(Behavior::Root);
            return;
        }

        if ctx.input.pressed(Button::Attack) {
            self.behavior_request = Some(Behavior::AirAttack);
        } else if ctx.input.pressed(Button::Dash) && self.dash.cooldown == 0 {
            self.behavior_request = Some(Behavior::Dash);
        }
    }

    fn enter_attack(&mut self, ctx: &PlayerCtx) {
        self.attack.parameter = 0;
        if !self.attack.in_combo {
            self.attack.combo_index = 0;
        }
        self.attack.in_combo = true;
        self.attack.combo_next = false;
        self.face_boss_if_close(ctx);
    }

    fn update_attack(&mut self, ctx: &mut PlayerCtx, air: bool) {
        let step = self.current_step_for(air);
        let (phase, _, _) = step.phase_at(self.attack.parameter);

        if ctx.input.pressed(Button::Attack) {
            self.attack.combo_next = true;
            if phase == AttackPhase::Recovery {
                // Buffered input: skip the rest of the recovery
                self.attack.parameter = step.total();
            }
        }

        if phase == AttackPhase::Swing {
            let position = self.position(ctx.arena);
            let mut to_boss = ctx.boss.position - position;
            to_boss.y = 0.0;
            if to_boss.magnitude() >= self.config.attack_stop_distance {
                let forward = self.facing_forward(ctx.arena);
                if let Some(tf) = ctx.arena.get_mut(self.transform_key) {
                    tf.translation += forward * step.forward_speed;
                }
            }
        }

        self.attack.hitbox_active = step.hit_window(self.attack.parameter);

        if air && self.apply_gravity(ctx) {
            // Landing cancels the air combo
            self.reset_attack();
            self.behavior_request = Some(Behavior::Root);
            return;
        }

        self.attack.parameter += 1;
        if self.attack.parameter >= step.total() {
            if self.attack.combo_next && self.attack.combo_index + 1 < COMBO_LENGTH {
                self.attack.combo_index += 1;
                self.attack.parameter = 0;
                self.attack.combo_next = false;
                self.face_boss_if_close(ctx);
            } else {
                self.reset_attack();
                self.behavior_request = Some(Behavior::Root);
            }
        }
    }

    fn update_guard(&mut self, ctx: &mut PlayerCtx) {
        let position = self.position(ctx.arena);
        let mut to_boss = ctx.boss.position - position;
        to_boss.y = 0.0;
        self.destination = face_direction(to_boss);

        if ctx.input.pressed(Button::Attack) {
            self.behavior_request = Some(Behavior::Attack);
        } else if ctx.input.pressed(Button::Jump) {
            self.behavior_request = Some(Behavior::Jump);
        } else if ctx.input.pressed(Button::Dash) && self.dash.cooldown == 0 {
            self.behavior_request = Some(Behavior::Dash);
        } else if !ctx.input.held(Button::Guard) {
            self.behavior_request = Some(Behavior::Root);
        }
    }

    fn enter_knockback(&mut self) {
        self.velocity = self.knockback_velocity;
        self.reset_attack();
    }

    fn update_knockback(&mut self, ctx: &mut PlayerCtx) {
        self.velocity.y -= self.config.gravity;
        let mut landed = false;
        if let Some(tf) = ctx.arena.get_mut(self.transform_key) {
            tf.translation += self.velocity;
            if tf.translation.y <= self.config.ground_height {
                tf.translation.y = self.config.ground_height;
                landed = true;
            }
        }
        if landed {
            self.velocity = Vec3::zeros();
            self.behavior_request = Some(Behavior::Root);
        }
    }

    // --- combat resolution ---

    /// Resolve contact with the boss body
    pub fn on_boss_contact(&mut self, arena: &mut TransformArena, boss: &BossView) {
        if boss.is_attack {
            if self.apply_damage(boss.contact_damage) && self.behavior != Behavior::Guard {
                self.knockback_velocity = boss.world.transform_normal(Vec3::new(0.0, 0.2, 0.4));
                self.behavior_request = Some(Behavior::KnockBack);
            }
        } else {
            self.push_out_of(arena, boss);
        }
    }

    /// Resolve a projectile hit
    pub fn on_projectile_hit(&mut self, damage: f32) {
        self.apply_damage(damage);
    }

    /// Apply incoming damage through the dash/invincibility/guard gates.
    /// Returns true when the hit actually landed.
    fn apply_damage(&mut self, amount: f32) -> bool {
        if self.behavior == Behavior::Dash || self.invincibility.is_active() {
            return false;
        }
        let amount = if self.behavior == Behavior::Guard {
            amount * self.config.guard_damage_scale
        } else {
            amount
        };
        self.health.take_damage(amount);
        self.invincibility.trigger();
        debug!("player took {amount} damage, hp {}", self.health.current);
        true
    }

    /// Separate the player from the boss along the axis of least overlap
    fn push_out_of(&mut self, arena: &mut TransformArena, boss: &BossView) {
        let Some(tf) = arena.get_mut(self.transform_key) else {
            return;
        };
        let player_box = Aabb {
            min: tf.translation - self.config.half_extents,
            max: tf.translation + self.config.half_extents,
        };
        let boss_box = Aabb {
            min: boss.position - boss.half_extents,
            max: boss.position + boss.half_extents,
        };
        let overlap = player_box.overlap(&boss_box);
        if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
            return;
        }
        let offset = tf.translation - boss.position;
        if overlap.x <= overlap.y && overlap.x <= overlap.z {
            tf.translation.x += overlap.x.copysign(offset.x);
        } else if overlap.y <= overlap.z {
            tf.translation.y += overlap.y.copysign(offset.y);
        } else {
            tf.translation.z += overlap.z.copysign(offset.z);
        }
    }

    // --- helpers ---

    fn apply_gravity(&mut self, ctx: &mut PlayerCtx) -> bool {
        self.velocity.y -= self.config.gravity;
        let Some(tf) = ctx.arena.get_mut(self.transform_key) else {
            return false;
        };
        tf.translation.y += self.velocity.y;
        if tf.translation.y <= self.config.ground_height {
            tf.translation.y = self.config.ground_height;
            self.velocity.y = 0.0;
            return true;
        }
        false
    }

    fn face_boss_if_close(&mut self, ctx: &PlayerCtx) {
        let position = self.position(ctx.arena);
        let mut to_boss = ctx.boss.position - position;
        to_boss.y = 0.0;
        if ctx.lock_on || to_boss.magnitude() < self.config.attack_face_distance {
            self.destination = face_direction(to_boss);
        }
    }

    fn reset_attack(&mut self) {
        self.attack.parameter = 0;
        self.attack.combo_index = 0;
        self.attack.combo_next = false;
        self.attack.in_combo = false;
        self.attack.hitbox_active = false;
    }

    fn is_attacking(&self) -> bool {
        matches!(self.behavior, Behavior::Attack | Behavior::AirAttack)
    }

    fn current_step(&self) -> ComboStep {
        self.current_step_for(self.behavior == Behavior::AirAttack)
    }

    fn current_step_for(&self, air: bool) -> ComboStep {
        let table = if air { &AIR_COMBO } else { &GROUND_COMBO };
        table[self.attack.combo_index.min(COMBO_LENGTH - 1)]
    }

    fn is_grounded(&self, arena: &TransformArena) -> bool {
        arena
            .get(self.transform_key)
            .is_some_and(|tf| tf.translation.y <= self.config.ground_height + 1e-4)
    }

    fn facing_forward(&self, arena: &TransformArena) -> Vec3 {
        arena
            .get(self.transform_key)
            .map_or_else(Vec3::z, |tf| tf.quaternion * Vec3::z())
    }

    /// Current world position
    pub fn position(&self, arena: &TransformArena) -> Vec3 {
        arena
            .get(self.transform_key)
            .map_or_else(Vec3::zeros, |tf| tf.translation)
    }

    /// Key of the body transform in the shared arena
    pub fn transform_key(&self) -> TransformKey {
        self.transform_key
    }

    /// Key of the weapon transform in the shared arena
    pub fn weapon_key(&self) -> TransformKey {
        self.weapon_key
    }

    /// Current behavior
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Current health
    pub fn health(&self) -> Health {
        self.health
    }

    /// Whether the invincibility window is open
    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    /// Current combo step index
    pub fn combo_index(&self) -> usize {
        self.attack.combo_index
    }

    /// Whether the weapon hitbox is asserted this frame
    pub fn hitbox_active(&self) -> bool {
        self.attack.hitbox_active
    }

    /// Body collider for the collision pass
    pub fn body_shape(&self, arena: &TransformArena) -> WorldShape {
        let world = arena
            .get(self.transform_key)
            .map_or_else(Mat4::identity, |tf| tf.world);
        CollisionShape::Aabb { half_extents: self.config.half_extents }.to_world_space(&world)
    }

    /// Weapon collider for the collision pass
    pub fn weapon_shape(&self, arena: &TransformArena) -> WorldShape {
        let world = arena
            .get(self.weapon_key)
            .map_or_else(Mat4::identity, |tf| tf.world);
        CollisionShape::Obb { half_extents: self.config.weapon_half_extents }
            .to_world_space(&world)
    }

    /// Snapshot for the boss and the collision pass
    pub fn view(&self, arena: &TransformArena) -> PlayerView {
        let step = self.current_step();
        let attacking = self.is_attacking();
        PlayerView {
            position: self.position(arena),
            combo_index: self.attack.combo_index,
            damage: step.damage,
            attack_frames_remaining: if attacking {
                step.total().saturating_sub(self.attack.parameter)
            } else {
                0
            },
            swing_velocity: if attacking {
                self.facing_forward(arena) * step.forward_speed
            } else {
                Vec3::zeros()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::BossView;
    use arena_engine::input::InputSnapshot;

    fn far_boss() -> BossView {
        BossView {
            position: Vec3::new(0.0, 0.0, 40.0),
            world: Mat4::new_translation(&Vec3::new(0.0, 0.0, 40.0)),
            is_attack: false,
            contact_damage: 0.0,
            half_extents: Vec3::new(2.0, 2.0, 2.0),
        }
    }

    fn attacking_boss_at(position: Vec3, damage: f32) -> BossView {
        BossView {
            position,
            world: Mat4::new_translation(&position),
            is_attack: true,
            contact_damage: damage,
            half_extents: Vec3::new(2.0, 2.0, 2.0),
        }
    }

    struct Rig {
        arena: TransformArena,
        player: Player,
        input: InputState,
    }

    impl Rig {
        fn new() -> Self {
            let mut arena = TransformArena::new();
            let player = Player::new(PlayerConfig::default(), &mut arena);
            Self { arena, player, input: InputState::new() }
        }

        fn step(&mut self, snapshot: arena_engine::input::InputSnapshot, boss: &BossView) {
            self.input.update(snapshot);
            let mut ctx = PlayerCtx {
                arena: &mut self.arena,
                input: &self.input,
                boss,
                camera_yaw: 0.0,
                lock_on: false,
            };
            self.player.update(&mut ctx);
        }
    }

    #[test]
    fn test_request_consumed_at_top_of_next_update() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.step(InputSnapshot::new().with_button(Button::Attack), &boss);
        // The press only queued the request this frame
        assert_eq!(rig.player.behavior(), Behavior::Root);
        rig.step(InputSnapshot::new(), &boss);
        assert_eq!(rig.player.behavior(), Behavior::Attack);
    }

    #[test]
    fn test_attack_returns_to_root_without_combo() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.step(InputSnapshot::new().with_button(Button::Attack), &boss);
        let total = GROUND_COMBO[0].total();
        for _ in 0..=total {
            rig.step(InputSnapshot::new(), &boss);
        }
        assert_eq!(rig.player.behavior(), Behavior::Root);
        assert_eq!(rig.player.combo_index(), 0);
    }

    #[test]
    fn test_combo_advances_on_buffered_press() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.step(InputSnapshot::new().with_button(Button::Attack), &boss);
        // Press again early in the step to queue the next one
        rig.step(InputSnapshot::new(), &boss);
        rig.step(InputSnapshot::new().with_button(Button::Attack), &boss);
        let total = GROUND_COMBO[0].total();
        for _ in 0..total {
            rig.step(InputSnapshot::new(), &boss);
        }
        assert_eq!(rig.player.behavior(), Behavior::Attack);
        assert_eq!(rig.player.combo_index(), 1);
    }

    #[test]
    fn test_combo_index_never_overflows() {
        let mut rig = Rig::new();
        let boss = far_boss();
        // Mash attack for a long time
        for frame in 0..600 {
            let snapshot = if frame % 2 == 0 {
                InputSnapshot::new().with_button(Button::Attack)
            } else {
                InputSnapshot::new()
            };
            rig.step(snapshot, &boss);
            assert!(rig.player.combo_index() < COMBO_LENGTH);
        }
    }

    #[test]
    fn test_movement_clamped_to_arena() {
        let mut rig = Rig::new();
        let boss = far_boss();
        for _ in 0..300 {
            rig.step(InputSnapshot::new().with_left_stick(1.0, 0.0), &boss);
            let pos = rig.player.position(&rig.arena);
            assert!(pos.x.abs() <= PlayerConfig::default().move_limit + 1e-4);
        }
        // Long enough to hit the wall
        let pos = rig.player.position(&rig.arena);
        assert!((pos.x - PlayerConfig::default().move_limit).abs() < 1.0);
    }

    #[test]
    fn test_out_of_bounds_spawn_clamped_in_one_update() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.arena
            .get_mut(rig.player.transform_key())
            .unwrap()
            .translation = Vec3::new(80.0, 1.0, -80.0);
        rig.step(InputSnapshot::new(), &boss);
        let limit = PlayerConfig::default().move_limit;
        let pos = rig.player.position(&rig.arena);
        assert!(pos.x.abs() <= limit && pos.z.abs() <= limit);
    }

    #[test]
    fn test_dash_chains_into_attack() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.step(InputSnapshot::new().with_button(Button::Dash), &boss);
        rig.step(InputSnapshot::new(), &boss);
        assert_eq!(rig.player.behavior(), Behavior::Dash);
        rig.step(InputSnapshot::new().with_button(Button::Attack), &boss);
        rig.step(InputSnapshot::new(), &boss);
        assert_eq!(rig.player.behavior(), Behavior::Attack);
    }

    #[test]
    fn test_invincibility_gates_second_hit() {
        let mut rig = Rig::new();
        let boss = attacking_boss_at(Vec3::new(0.0, 1.0, 1.0), 10.0);
        rig.player.on_boss_contact(&mut rig.arena, &boss);
        let hp_after_first = rig.player.health().current;
        rig.player.on_boss_contact(&mut rig.arena, &boss);
        assert!((rig.player.health().current - hp_after_first).abs() < f32::EPSILON);

        // Ride out the window, then a hit lands again
        let far = far_boss();
        for _ in 0..PlayerConfig::default().invincible_frames + 60 {
            rig.step(InputSnapshot::new(), &far);
            if rig.player.behavior() == Behavior::Root && !rig.player.is_invincible() {
                break;
            }
        }
        assert!(!rig.player.is_invincible());
        rig.player.on_boss_contact(&mut rig.arena, &boss);
        assert!(rig.player.health().current < hp_after_first);
    }

    #[test]
    fn test_guard_scales_damage_and_suppresses_knockback() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.step(InputSnapshot::new().with_button(Button::Guard), &boss);
        rig.step(InputSnapshot::new().with_button(Button::Guard), &boss);
        assert_eq!(rig.player.behavior(), Behavior::Guard);

        let hit = attacking_boss_at(Vec3::new(0.0, 1.0, 1.0), 20.0);
        rig.player.on_boss_contact(&mut rig.arena, &hit);
        let expected = PlayerConfig::default().max_hp
            - 20.0 * PlayerConfig::default().guard_damage_scale;
        assert!((rig.player.health().current - expected).abs() < 1e-4);
        // Still guarding: the hit never queued a knockback
        rig.step(InputSnapshot::new().with_button(Button::Guard), &boss);
        assert_eq!(rig.player.behavior(), Behavior::Guard);
    }

    #[test]
    fn test_dash_immune_to_damage() {
        let mut rig = Rig::new();
        let boss = far_boss();
        rig.step(InputSnapshot::new().with_button(Button::Dash), &boss);
        // The press only queues the dash; it starts on the next update
        rig.step(InputSnapshot::new(), &boss);
        assert_eq!(rig.player.behavior(), Behavior::Dash);
        let hit = attacking_boss_at(Vec3::new(0.0, 1.0, 1.0), 20.0);
        rig.player.on_boss_contact(&mut rig.arena, &hit);
        assert!((rig.player.health().current - PlayerConfig::default().max_hp).abs()
            < f32::EPSILON);
    }

    #[test]
    fn test_push_out_moves_player_outside_boss() {
        let mut rig = Rig::new();
        let boss = BossView {
            position: Vec3::new(0.0, 1.0, 2.5),
            world: Mat4::new_translation(&Vec3::new(0.0, 1.0, 2.5)),
            is_attack: false,
            contact_damage: 0.0,
            half_extents: Vec3::new(2.0, 2.0, 2.0),
        };
        rig.player.on_boss_contact(&mut rig.arena, &boss);
        let pos = rig.player.position(&rig.arena);
        // Pushed back along z, the axis of least overlap
        assert!(pos.z < 0.0 - 0.4);
        assert!((pos.x).abs() < 1e-4);
    }

    #[test]
    fn test_knockback_grounds_back_to_root() {
        let mut rig = Rig::new();
        let hit = attacking_boss_at(Vec3::new(0.0, 1.0, 1.0), 5.0);
        rig.player.on_boss_contact(&mut rig.arena, &hit);
        let far = far_boss();
        rig.step(InputSnapshot::new(), &far);
        assert_eq!(rig.player.behavior(), Behavior::KnockBack);
        for _ in 0..300 {
            rig.step(InputSnapshot::new(), &far);
            if rig.player.behavior() == Behavior::Root {
                break;
            }
        }
        assert_eq!(rig.player.behavior(), Behavior::Root);
        assert!((rig.player.position(&rig.arena).y - PlayerConfig::default().ground_height).abs() < 1e-4);
    }

    #[test]
    fn test_weapon_follows_player() {
        let mut rig = Rig::new();
        let boss = far_boss();
        for _ in 0..20 {
            rig.step(InputSnapshot::new().with_left_stick(0.0, 1.0), &boss);
        }
        let player_pos = rig.player.position(&rig.arena);
        let weapon_center = rig.player.weapon_shape(&rig.arena).center();
        // Weapon rides ahead of the player along its facing
        assert!(weapon_center.z > player_pos.z);
    }
}
