//! Collision detection: shapes, filter groups, and the pair manager

pub mod collision_world;
pub mod groups;
pub mod shape;
