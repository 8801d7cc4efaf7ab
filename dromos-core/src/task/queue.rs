//! Task types and builders
//!
//! Tasks are the atomic units of a motion sequence. Each carries a
//! measurable completion condition: a tick target for motion tasks, a
//! duration for waits. Builders convert human units (meters, degrees)
//! into encoder ticks using the calibration constants; they construct
//! tasks only and never execute anything.

use heapless::Deque;
use libm::{fabs, round};

use crate::config::ControllerConfig;

/// Maximum queued tasks per sequence
pub const MAX_TASKS: usize = 16;

/// Queued motion tasks, FIFO; insertion order is execution order
pub type TaskQueue = Deque<Task, MAX_TASKS>;

/// A single motion or pause instruction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Task {
    /// Straight-line motion, progress measured on the right wheel
    Drive {
        /// Encoder ticks to travel
        target_ticks: u32,
        /// Signed linear speed in m/s
        speed_mps: f64,
    },
    /// Rotation in place, progress measured on both wheels' average
    Turn {
        /// Encoder ticks to rotate through
        target_ticks: u32,
        /// Signed angular speed in rad/s
        speed_rad_s: f64,
    },
    /// Timed pause with no command emission
    Wait {
        /// Pause duration in milliseconds
        duration_ms: u32,
    },
}

impl Task {
    /// Build a straight-line task at the configured default speed
    pub fn drive(distance_m: f64, config: &ControllerConfig) -> Self {
        Self::drive_at(distance_m, config.linear_speed, config)
    }

    /// Build a straight-line task at an explicit speed
    ///
    /// The sign of `distance_m` selects the drive direction; `speed_mps`
    /// contributes magnitude only.
    pub fn drive_at(distance_m: f64, speed_mps: f64, config: &ControllerConfig) -> Self {
        Task::Drive {
            target_ticks: round(fabs(distance_m) * config.ticks_per_meter) as u32,
            speed_mps: with_sign_of(speed_mps, distance_m),
        }
    }

    /// Build an in-place turn task at the configured default speed
    pub fn turn(angle_deg: f64, config: &ControllerConfig) -> Self {
        Self::turn_at(angle_deg, config.angular_speed, config)
    }

    /// Build an in-place turn task at an explicit speed
    ///
    /// The sign of `angle_deg` selects the turn direction; `speed_rad_s`
    /// contributes magnitude only.
    pub fn turn_at(angle_deg: f64, speed_rad_s: f64, config: &ControllerConfig) -> Self {
        Task::Turn {
            target_ticks: round(fabs(angle_deg) / 90.0 * config.ticks_per_90_deg) as u32,
            speed_rad_s: with_sign_of(speed_rad_s, angle_deg),
        }
    }

    /// Build a timed pause task
    pub const fn wait_ms(duration_ms: u32) -> Self {
        Task::Wait { duration_ms }
    }
}

/// Apply the sign of `direction` to the magnitude of `speed`
fn with_sign_of(speed: f64, direction: f64) -> f64 {
    if direction < 0.0 {
        -fabs(speed)
    } else {
        fabs(speed)
    }
}
