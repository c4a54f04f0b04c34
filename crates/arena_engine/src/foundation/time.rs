//! Frame timing utilities
//!
//! The simulation runs on a fixed 60 Hz timestep; durations everywhere are
//! integer frame counts, not wall-clock seconds.

/// Frames per second of the fixed timestep
pub const FRAMES_PER_SECOND: u32 = 60;

/// Seconds covered by one simulation frame
pub const FRAME_DT: f32 = 1.0 / FRAMES_PER_SECOND as f32;

/// Fixed-timestep frame counter
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock at frame zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame
    pub fn tick(&mut self) {
        self.frame_count += 1;
    }

    /// Total frames elapsed
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total simulated time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.frame_count as f32 * FRAME_DT
    }
}
