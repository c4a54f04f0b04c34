//! Outward-facing interfaces consumed as traits
//!
//! Rendering, audio, and particle effects are not simulated here; the game
//! drives them through these ports. Null implementations keep the whole
//! simulation runnable headless, which is also how the tests run it.

pub mod audio;
pub mod particles;
pub mod render;
