//! Input snapshots and edge detection
//!
//! The simulation consumes one [`InputSnapshot`] per frame. [`InputState`]
//! double-buffers snapshots so behaviors can distinguish a press edge from a
//! held button.

use crate::foundation::math::Vec2;

/// Gameplay buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Melee attack
    Attack,
    /// Jump
    Jump,
    /// Dash
    Dash,
    /// Guard (held)
    Guard,
    /// Lock-on toggle
    LockOn,
}

impl Button {
    const fn bit(self) -> u8 {
        match self {
            Self::Attack => 1 << 0,
            Self::Jump => 1 << 1,
            Self::Dash => 1 << 2,
            Self::Guard => 1 << 3,
            Self::LockOn => 1 << 4,
        }
    }
}

/// Button and stick state for a single frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    buttons: u8,
    /// Left stick, each axis in [-1, 1]
    pub left_stick: Vec2,
    /// Right stick, each axis in [-1, 1]
    pub right_stick: Vec2,
}

impl InputSnapshot {
    /// Empty snapshot: nothing held, sticks centered
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style press of a button
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons |= button.bit();
        self
    }

    /// Builder-style left stick deflection
    #[must_use]
    pub fn with_left_stick(mut self, x: f32, y: f32) -> Self {
        self.left_stick = Vec2::new(x, y);
        self
    }

    /// Whether the button is down in this snapshot
    pub fn is_down(&self, button: Button) -> bool {
        self.buttons & button.bit() != 0
    }
}

/// Double-buffered input state with press/release edges
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    /// Create an input state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the snapshot for the new frame
    pub fn update(&mut self, snapshot: InputSnapshot) {
        self.previous = self.current;
        self.current = snapshot;
    }

    /// True only on the frame the button went down
    pub fn pressed(&self, button: Button) -> bool {
        self.current.is_down(button) && !self.previous.is_down(button)
    }

    /// True while the button is down
    pub fn held(&self, button: Button) -> bool {
        self.current.is_down(button)
    }

    /// True only on the frame the button went up
    pub fn released(&self, button: Button) -> bool {
        !self.current.is_down(button) && self.previous.is_down(button)
    }

    /// Left stick deflection this frame
    pub fn left_stick(&self) -> Vec2 {
        self.current.left_stick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_edge_triggered() {
        let mut input = InputState::new();
        input.update(InputSnapshot::new().with_button(Button::Attack));
        assert!(input.pressed(Button::Attack));
        assert!(input.held(Button::Attack));

        input.update(InputSnapshot::new().with_button(Button::Attack));
        assert!(!input.pressed(Button::Attack));
        assert!(input.held(Button::Attack));

        input.update(InputSnapshot::new());
        assert!(input.released(Button::Attack));
        assert!(!input.held(Button::Attack));
    }

    #[test]
    fn test_stick_passthrough() {
        let mut input = InputState::new();
        input.update(InputSnapshot::new().with_left_stick(0.5, -1.0));
        assert!((input.left_stick().x - 0.5).abs() < f32::EPSILON);
        assert!((input.left_stick().y + 1.0).abs() < f32::EPSILON);
    }
}
