//! Hit points and invincibility windows

/// Hit points clamped to [0, max]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    /// Current hit points
    pub current: f32,
    /// Maximum hit points
    pub max: f32,
}

impl Health {
    /// Full health at `max`
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, clamping at zero
    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Add `amount`, clamping at max
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Whether hit points are exhausted
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Post-hit invincibility window counted in frames
#[derive(Debug, Default, Clone, Copy)]
pub struct Invincibility {
    timer: u32,
    active: bool,
}

impl Invincibility {
    /// Start the window
    pub fn trigger(&mut self) {
        self.active = true;
        self.timer = 0;
    }

    /// Advance one frame; the flag clears when the window elapses
    pub fn tick(&mut self, window_frames: u32) {
        if self.active {
            self.timer += 1;
            if self.timer >= window_frames {
                self.active = false;
            }
        }
    }

    /// Whether hits are currently ignored
    pub fn is_active(&self) -> bool {
        self.active
    }
}
