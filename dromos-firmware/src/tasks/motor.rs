//! Drive motor task
//!
//! Receives velocity commands from the controller, mixes them into
//! per-wheel speeds, and drives the two H-bridge channels via PWM.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use dromos_core::kinematics::wheel_speeds;

use crate::channels::DRIVE_CMD;

/// Drive output configuration for the firmware
pub struct DriveFwConfig {
    /// Distance between the wheel contact points in meters
    pub track_width_m: f64,
    /// Wheel speed that maps to 100% duty
    pub max_wheel_mps: f64,
    /// PWM top value (determines frequency)
    pub pwm_top: u16,
}

impl Default for DriveFwConfig {
    fn default() -> Self {
        Self {
            track_width_m: 0.16,
            max_wheel_mps: 1.0,
            pwm_top: 1000,
        }
    }
}

/// Motor task - applies velocity commands to the H-bridges
///
/// Waits for stamped commands and converts each one to duty/direction
/// per wheel. A zero-velocity command parks both bridges at 0% duty.
#[embassy_executor::task]
pub async fn motor_task(
    mut pwm_left: Pwm<'static>,
    mut pwm_right: Pwm<'static>,
    mut dir_left: Output<'static>,
    mut dir_right: Output<'static>,
    config: DriveFwConfig,
) {
    info!("Motor task started");

    let mut pwm_config = PwmConfig::default();
    pwm_config.top = config.pwm_top;
    pwm_config.compare_a = 0;
    pwm_left.set_config(&pwm_config);
    pwm_right.set_config(&pwm_config);

    loop {
        let stamped = DRIVE_CMD.wait().await;
        let speeds = wheel_speeds(&stamped.command, config.track_width_m);

        trace!(
            "Drive: left={} m/s right={} m/s (stamp {} ms)",
            speeds.left_mps,
            speeds.right_mps,
            stamped.stamp_ms
        );

        let (left_duty, left_forward) = wheel_duty(speeds.left_mps, &config);
        if left_forward {
            dir_left.set_high();
        } else {
            dir_left.set_low();
        }
        pwm_config.compare_a = left_duty;
        pwm_left.set_config(&pwm_config);

        let (right_duty, right_forward) = wheel_duty(speeds.right_mps, &config);
        if right_forward {
            dir_right.set_high();
        } else {
            dir_right.set_low();
        }
        pwm_config.compare_a = right_duty;
        pwm_right.set_config(&pwm_config);
    }
}

/// Convert a signed wheel speed to PWM duty and direction
fn wheel_duty(speed_mps: f64, config: &DriveFwConfig) -> (u16, bool) {
    let forward = speed_mps >= 0.0;
    let magnitude = if forward { speed_mps } else { -speed_mps };
    let ratio = if magnitude >= config.max_wheel_mps {
        1.0
    } else {
        magnitude / config.max_wheel_mps
    };
    ((ratio * f64::from(config.pwm_top)) as u16, forward)
}
