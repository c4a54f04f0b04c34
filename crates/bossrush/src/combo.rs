//! Attack combo timelines
//!
//! Each combo step runs a four-phase timeline over a single frame counter:
//! anticipation, charge, swing, recovery. The weapon pose is interpolated
//! with an ease-in-sine curve inside each phase, and the hitbox is only
//! asserted on sub-windows of the swing.

use arena_engine::foundation::math::utils::{ease_in_sine, lerp};

/// Number of steps in a full combo
pub const COMBO_LENGTH: usize = 4;

/// Phase of an attack step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    /// Wind-up before the charge
    Anticipation,
    /// Held charge before the swing
    Charge,
    /// The damaging swing
    Swing,
    /// Cool-down; buffered input lands here
    Recovery,
}

/// Timing and pose data for one combo step
#[derive(Debug, Clone, Copy)]
pub struct ComboStep {
    /// Anticipation duration in frames
    pub anticipation: u32,
    /// Charge duration in frames
    pub charge: u32,
    /// Swing duration in frames
    pub swing: u32,
    /// Recovery duration in frames
    pub recovery: u32,
    /// Damage dealt by this step
    pub damage: f32,
    /// Forward movement per swing frame
    pub forward_speed: f32,
    /// Weapon pitch at the top of the swing, radians
    pub raised_pitch: f32,
    /// Weapon pitch at the end of the swing, radians
    pub swung_pitch: f32,
}

impl ComboStep {
    /// Total duration of the step in frames
    pub const fn total(&self) -> u32 {
        self.anticipation + self.charge + self.swing + self.recovery
    }

    /// Phase at `parameter` frames into the step, with the phase-local frame
    /// and the phase duration
    pub fn phase_at(&self, parameter: u32) -> (AttackPhase, u32, u32) {
        let mut boundary = self.anticipation;
        if parameter < boundary {
            return (AttackPhase::Anticipation, parameter, self.anticipation);
        }
        let charge_start = boundary;
        boundary += self.charge;
        if parameter < boundary {
            return (AttackPhase::Charge, parameter - charge_start, self.charge);
        }
        let swing_start = boundary;
        boundary += self.swing;
        if parameter < boundary {
            return (AttackPhase::Swing, parameter - swing_start, self.swing);
        }
        let recovery_local = parameter.saturating_sub(boundary).min(self.recovery);
        (AttackPhase::Recovery, recovery_local, self.recovery)
    }

    /// Whether the hitbox is asserted at `parameter`. Only swing frames on
    /// the quarter-duration sub-windows count.
    pub fn hit_window(&self, parameter: u32) -> bool {
        let (phase, local, duration) = self.phase_at(parameter);
        if phase != AttackPhase::Swing {
            return false;
        }
        let interval = (duration / 4).max(1);
        local % interval == 0
    }

    /// Weapon pitch at `parameter`, eased within the current phase
    pub fn weapon_pitch(&self, parameter: u32) -> f32 {
        let (phase, local, duration) = self.phase_at(parameter);
        let t = if duration == 0 {
            1.0
        } else {
            ease_in_sine(local as f32 / duration as f32)
        };
        match phase {
            AttackPhase::Anticipation => lerp(0.0, self.raised_pitch, t),
            AttackPhase::Charge => self.raised_pitch,
            AttackPhase::Swing => lerp(self.raised_pitch, self.swung_pitch, t),
            AttackPhase::Recovery => lerp(self.swung_pitch, 0.0, t),
        }
    }
}

/// Ground combo table
pub const GROUND_COMBO: [ComboStep; COMBO_LENGTH] = [
    ComboStep {
        anticipation: 0,
        charge: 0,
        swing: 5,
        recovery: 16,
        damage: 8.0,
        forward_speed: 0.2,
        raised_pitch: -1.3,
        swung_pitch: 1.0,
    },
    ComboStep {
        anticipation: 0,
        charge: 0,
        swing: 5,
        recovery: 16,
        damage: 8.0,
        forward_speed: 0.2,
        raised_pitch: -1.3,
        swung_pitch: 1.0,
    },
    ComboStep {
        anticipation: 0,
        charge: 0,
        swing: 20,
        recovery: 16,
        damage: 5.0,
        forward_speed: 0.2,
        raised_pitch: -0.8,
        swung_pitch: 1.4,
    },
    ComboStep {
        anticipation: 10,
        charge: 10,
        swing: 5,
        recovery: 22,
        damage: 30.0,
        forward_speed: 0.4,
        raised_pitch: -1.6,
        swung_pitch: 1.4,
    },
];

/// Air combo table; same timings as the ground combo with a weaker finisher
pub const AIR_COMBO: [ComboStep; COMBO_LENGTH] = [
    ComboStep { damage: 8.0, ..GROUND_COMBO[0] },
    ComboStep { damage: 8.0, ..GROUND_COMBO[1] },
    ComboStep { damage: 5.0, ..GROUND_COMBO[2] },
    ComboStep { damage: 20.0, ..GROUND_COMBO[3] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries_are_cumulative() {
        let step = GROUND_COMBO[3];
        assert_eq!(step.phase_at(0).0, AttackPhase::Anticipation);
        assert_eq!(step.phase_at(9).0, AttackPhase::Anticipation);
        assert_eq!(step.phase_at(10).0, AttackPhase::Charge);
        assert_eq!(step.phase_at(19).0, AttackPhase::Charge);
        assert_eq!(step.phase_at(20).0, AttackPhase::Swing);
        assert_eq!(step.phase_at(24).0, AttackPhase::Swing);
        assert_eq!(step.phase_at(25).0, AttackPhase::Recovery);
        assert_eq!(step.total(), 47);
    }

    #[test]
    fn test_zero_length_phases_are_skipped() {
        let step = GROUND_COMBO[0];
        // No anticipation or charge: frame 0 is already swinging
        assert_eq!(step.phase_at(0).0, AttackPhase::Swing);
        assert_eq!(step.total(), 21);
    }

    #[test]
    fn test_hit_window_quarters() {
        let step = GROUND_COMBO[2]; // swing 20 -> windows every 5 frames
        let windows: Vec<u32> = (0..step.total())
            .filter(|&frame| step.hit_window(frame))
            .collect();
        assert_eq!(windows, vec![0, 5, 10, 15]);
    }

    #[test]
    fn test_hit_window_never_in_recovery() {
        let step = GROUND_COMBO[0];
        for frame in step.swing..step.total() {
            assert!(!step.hit_window(frame), "frame {frame} should be inert");
        }
    }

    #[test]
    fn test_weapon_pitch_tracks_phases() {
        let step = GROUND_COMBO[3];
        // End of anticipation: weapon fully raised
        assert!((step.weapon_pitch(10) - step.raised_pitch).abs() < 1e-5);
        // Held through the charge
        assert!((step.weapon_pitch(15) - step.raised_pitch).abs() < 1e-5);
        // Swing eases from raised toward swung
        let mid_swing = step.weapon_pitch(22);
        assert!(mid_swing > step.raised_pitch && mid_swing < step.swung_pitch);
    }

    #[test]
    fn test_air_combo_matches_ground_timings() {
        for (air, ground) in AIR_COMBO.iter().zip(GROUND_COMBO.iter()) {
            assert_eq!(air.total(), ground.total());
        }
        assert!((AIR_COMBO[3].damage - 20.0).abs() < f32::EPSILON);
    }
}
