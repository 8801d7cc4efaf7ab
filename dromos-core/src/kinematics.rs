//! Differential-drive kinematics
//!
//! Converts body-frame velocity commands into per-wheel linear speeds for
//! the motor outputs.

use crate::command::DriveCommand;

/// Per-wheel linear speeds in m/s
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelSpeeds {
    pub left_mps: f64,
    pub right_mps: f64,
}

/// Mix a velocity command into wheel speeds for the given track width
///
/// Positive angular velocity is counter-clockwise, so the right wheel
/// speeds up and the left wheel slows down.
pub fn wheel_speeds(cmd: &DriveCommand, track_width_m: f64) -> WheelSpeeds {
    let half_track = track_width_m / 2.0;
    WheelSpeeds {
        left_mps: cmd.linear_mps - cmd.angular_rad_s * half_track,
        right_mps: cmd.linear_mps + cmd.angular_rad_s * half_track,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: f64 = 0.16;

    #[test]
    fn test_straight_line_drives_wheels_equally() {
        let speeds = wheel_speeds(&DriveCommand::forward(0.5), TRACK);
        assert_eq!(speeds.left_mps, 0.5);
        assert_eq!(speeds.right_mps, 0.5);
    }

    #[test]
    fn test_spin_in_place_drives_wheels_opposed() {
        let speeds = wheel_speeds(&DriveCommand::spin(5.0), TRACK);
        assert_eq!(speeds.left_mps, -speeds.right_mps);
        assert!(speeds.right_mps > 0.0);
    }

    #[test]
    fn test_stop_is_stop() {
        let speeds = wheel_speeds(&DriveCommand::stopped(), TRACK);
        assert_eq!(speeds.left_mps, 0.0);
        assert_eq!(speeds.right_mps, 0.0);
    }
}
