//! Two-axis spin kinematics for the showcase model.

use crate::Mat4;

/// Default yaw rate, radians per second.
pub const YAW_RATE: f32 = 0.5;
/// Default roll rate, radians per second.
pub const ROLL_RATE: f32 = 0.3;

/// Continuous rotation around Y (yaw) and Z (roll).
///
/// Angles accumulate monotonically in proportion to elapsed frame time;
/// wraparound is left to the trigonometry of the matrix build. Advancing
/// by zero is a no-op, so the per-frame update is safe to call on ticks
/// that rendered nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub yaw: f32,
    pub roll: f32,
    yaw_rate: f32,
    roll_rate: f32,
}

impl Spin {
    pub fn new() -> Self {
        Self::with_rates(YAW_RATE, ROLL_RATE)
    }

    pub fn with_rates(yaw_rate: f32, roll_rate: f32) -> Self {
        Self {
            yaw: 0.0,
            roll: 0.0,
            yaw_rate,
            roll_rate,
        }
    }

    /// Advance both angles by `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.yaw += dt * self.yaw_rate;
        self.roll += dt * self.roll_rate;
    }

    /// Model matrix for the current angles.
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw) * Mat4::from_rotation_z(self.roll)
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_are_proportional_to_elapsed_time() {
        let mut spin = Spin::new();
        for _ in 0..5 {
            spin.advance(0.1);
        }
        assert!((spin.yaw - 0.5 * 0.5).abs() < 1e-5);
        assert!((spin.roll - 0.3 * 0.5).abs() < 1e-5);
    }

    #[test]
    fn angles_never_decrease() {
        let mut spin = Spin::new();
        let mut last = (spin.yaw, spin.roll);
        for dt in [0.016, 0.0, 0.033, 0.008, 0.1] {
            spin.advance(dt);
            assert!(spin.yaw >= last.0);
            assert!(spin.roll >= last.1);
            last = (spin.yaw, spin.roll);
        }
    }

    #[test]
    fn custom_rates_are_honored() {
        let mut spin = Spin::with_rates(1.0, 0.0);
        spin.advance(2.0);
        assert!((spin.yaw - 2.0).abs() < 1e-6);
        assert_eq!(spin.roll, 0.0);
    }
}
