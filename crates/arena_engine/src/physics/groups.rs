//! Collision group filtering
//!
//! Every collider carries an attribute (what it is) and a mask (what it
//! reacts to). A pair is only tested for overlap when the filter passes in
//! both directions.

use bitflags::bitflags;

bitflags! {
    /// Collision attribute/mask bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionGroup: u32 {
        /// Player character
        const PLAYER = 1 << 0;
        /// Enemy characters (the boss)
        const ENEMY = 1 << 1;
        /// Static floor geometry
        const FLOOR = 1 << 2;
        /// Goal trigger volumes
        const GOAL = 1 << 3;
        /// Player melee weapon hitbox
        const WEAPON = 1 << 4;
        /// Homing missiles
        const MISSILE = 1 << 5;
        /// Beam lasers
        const LASER = 1 << 6;
    }
}

impl CollisionGroup {
    /// Check whether two colliders should be tested against each other.
    ///
    /// The rule is symmetric: A's attribute must be in B's mask AND B's
    /// attribute must be in A's mask. A one-way match never collides.
    pub fn should_collide(
        attr_a: Self,
        mask_a: Self,
        attr_b: Self,
        mask_b: Self,
    ) -> bool {
        attr_a.intersects(mask_b) && attr_b.intersects(mask_a)
    }
}
