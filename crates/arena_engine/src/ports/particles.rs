//! Particle port
//!
//! Emitters are described declaratively with [`EmitterSpec`] and handed to
//! the backend; the simulation never steps particles itself.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec3, Vec4};

/// Inclusive range of values randomized per particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl SpawnRange {
    /// Range covering a single value
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }
}

/// Declarative description of a particle emitter; serializable so effect
/// definitions can live in data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterSpec {
    /// World-space spawn center
    pub translation: Vec3,
    /// Half extents of the spawn volume around the center
    pub area: Vec3,
    /// Emission azimuth range in degrees
    pub azimuth: SpawnRange,
    /// Particle color (RGBA)
    pub color: Vec4,
    /// Particles spawned per emission
    pub count: u32,
    /// Frames between emissions
    pub frequency: u32,
    /// Frames until the emitter removes itself
    pub delete_time: u32,
    /// Particle lifetime range in frames
    pub lifetime: SpawnRange,
    /// Particle scale range
    pub scale: SpawnRange,
    /// Particle speed range
    pub velocity: SpawnRange,
}

impl Default for EmitterSpec {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            area: Vec3::zeros(),
            azimuth: SpawnRange { min: 0.0, max: 360.0 },
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            count: 10,
            frequency: 4,
            delete_time: 60,
            lifetime: SpawnRange { min: 30.0, max: 60.0 },
            scale: SpawnRange::fixed(0.5),
            velocity: SpawnRange { min: 0.1, max: 0.3 },
        }
    }
}

impl EmitterSpec {
    /// Emitter at a world position with defaults everywhere else
    pub fn at(translation: Vec3) -> Self {
        Self { translation, ..Default::default() }
    }

    /// Builder-style spawn volume
    #[must_use]
    pub fn with_area(mut self, area: Vec3) -> Self {
        self.area = area;
        self
    }

    /// Builder-style color
    #[must_use]
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Builder-style particle count per emission
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Builder-style emitter lifetime in frames
    #[must_use]
    pub fn with_delete_time(mut self, frames: u32) -> Self {
        self.delete_time = frames;
        self
    }

    /// Builder-style particle scale range
    #[must_use]
    pub fn with_scale(mut self, min: f32, max: f32) -> Self {
        self.scale = SpawnRange { min, max };
        self
    }

    /// Builder-style particle speed range
    #[must_use]
    pub fn with_velocity(mut self, min: f32, max: f32) -> Self {
        self.velocity = SpawnRange { min, max };
        self
    }
}

/// Interface to a particle backend
pub trait ParticlePort {
    /// Hand an emitter to the backend
    fn spawn(&mut self, spec: EmitterSpec);
}

/// Particle backend that discards every emitter
#[derive(Debug, Default)]
pub struct NullParticles;

impl ParticlePort for NullParticles {
    fn spawn(&mut self, _spec: EmitterSpec) {}
}

/// Recording backend for tests: remembers what was spawned
#[derive(Debug, Default)]
pub struct RecordingParticles {
    /// Every spec spawned, in order
    pub spawned: Vec<EmitterSpec>,
}

impl ParticlePort for RecordingParticles {
    fn spawn(&mut self, spec: EmitterSpec) {
        self.spawned.push(spec);
    }
}
