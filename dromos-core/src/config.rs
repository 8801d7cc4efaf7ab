//! Configuration type definitions
//!
//! Calibration constants for the drive base. Tick ratios come from wheel
//! geometry and encoder resolution measured on the bench; they are not
//! re-derivable at runtime.

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Encoder ticks per meter of straight-line travel
    pub ticks_per_meter: f64,
    /// Encoder ticks (averaged over both wheels) per 90 degrees of rotation
    pub ticks_per_90_deg: f64,
    /// Default linear speed in m/s
    pub linear_speed: f64,
    /// Default angular speed in rad/s
    pub angular_speed: f64,
    /// Pause between autonomous routine tasks in milliseconds
    pub inter_task_wait_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ticks_per_meter: 545.0,
            ticks_per_90_deg: 50.0,
            linear_speed: 0.5,
            angular_speed: 5.0,
            inter_task_wait_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration() {
        let config = ControllerConfig::default();
        assert_eq!(config.ticks_per_meter, 545.0);
        assert_eq!(config.ticks_per_90_deg, 50.0);
        assert_eq!(config.inter_task_wait_ms, 2000);
    }
}
