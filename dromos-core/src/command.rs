//! Velocity command types

/// A body-frame velocity command for the drive base
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    /// Linear velocity in m/s (forward positive)
    pub linear_mps: f64,
    /// Angular velocity in rad/s (counter-clockwise positive)
    pub angular_rad_s: f64,
}

impl DriveCommand {
    /// Create a stopped command
    pub const fn stopped() -> Self {
        Self {
            linear_mps: 0.0,
            angular_rad_s: 0.0,
        }
    }

    /// Straight-line motion at the given signed speed
    pub const fn forward(speed_mps: f64) -> Self {
        Self {
            linear_mps: speed_mps,
            angular_rad_s: 0.0,
        }
    }

    /// Rotation in place at the given signed speed
    pub const fn spin(speed_rad_s: f64) -> Self {
        Self {
            linear_mps: 0.0,
            angular_rad_s: speed_rad_s,
        }
    }

    /// Check whether this command brings the base to rest
    pub fn is_stopped(&self) -> bool {
        self.linear_mps == 0.0 && self.angular_rad_s == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped() {
        let cmd = DriveCommand::stopped();
        assert!(cmd.is_stopped());
        assert_eq!(cmd, DriveCommand::forward(0.0));
    }

    #[test]
    fn test_forward_and_spin_are_exclusive() {
        let fwd = DriveCommand::forward(0.5);
        assert_eq!(fwd.angular_rad_s, 0.0);
        assert!(!fwd.is_stopped());

        let spin = DriveCommand::spin(-2.5);
        assert_eq!(spin.linear_mps, 0.0);
        assert_eq!(spin.angular_rad_s, -2.5);
    }
}
