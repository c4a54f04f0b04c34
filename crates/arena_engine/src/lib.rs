//! # Arena Engine
//!
//! A simulation engine for 3D arena action games.
//!
//! ## Features
//!
//! - **Hierarchical Transforms**: Parent/child world transforms with
//!   generation-checked handles
//! - **Collision**: Sphere, AABB, and OBB shapes with bitmask group filtering
//! - **Fixed Timestep**: Frame-count based timing at 60 Hz
//! - **Ports**: Renderer, audio, and particle interfaces consumed as traits
//!   so the simulation runs headless

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod input;
pub mod physics;
pub mod ports;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Mat4, Quat, Vec2, Vec3},
            time::FrameClock,
        },
        input::{Button, InputSnapshot, InputState},
        physics::{
            collision_world::{CollisionWorld, Contact},
            groups::CollisionGroup,
            shape::{CollisionShape, WorldShape},
        },
        ports::{
            audio::{AudioPort, NullAudio, SoundHandle},
            particles::{EmitterSpec, NullParticles, ParticlePort},
            render::{NullRenderer, RenderPort},
        },
        scene::transform::{TransformArena, TransformKey, WorldTransform},
    };
}
