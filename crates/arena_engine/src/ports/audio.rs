//! Audio port

use thiserror::Error;

/// Opaque handle to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Errors from an audio backend
#[derive(Debug, Error)]
pub enum AudioError {
    /// The sound asset could not be read
    #[error("failed to load sound '{path}': {reason}")]
    Load {
        /// Asset path that failed
        path: String,
        /// Backend-specific reason
        reason: String,
    },
    /// A handle that was never issued by this backend
    #[error("unknown sound handle {0:?}")]
    UnknownHandle(SoundHandle),
}

/// Interface to an audio backend
pub trait AudioPort {
    /// Load a sound, returning a handle for playback
    fn load(&mut self, path: &str) -> Result<SoundHandle, AudioError>;

    /// Play a loaded sound at the given volume in [0, 1], optionally looping
    fn play(&mut self, handle: SoundHandle, looped: bool, volume: f32);

    /// Stop a playing sound
    fn stop(&mut self, handle: SoundHandle);
}

/// Audio backend that accepts everything and does nothing
#[derive(Debug, Default)]
pub struct NullAudio {
    next_handle: u32,
}

impl AudioPort for NullAudio {
    fn load(&mut self, _path: &str) -> Result<SoundHandle, AudioError> {
        let handle = SoundHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn play(&mut self, _handle: SoundHandle, _looped: bool, _volume: f32) {}

    fn stop(&mut self, _handle: SoundHandle) {}
}
