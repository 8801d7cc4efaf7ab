//! Wheel encoder bookkeeping
//!
//! Counts are cumulative and never reset during normal operation. Task
//! progress is always measured against a baseline captured when a task
//! starts, so the absolute values carry no meaning on their own. Before
//! the first reading arrives both counters sit at zero, which is safe for
//! the same reason.

/// Wheel selector for encoder readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wheel {
    Left,
    Right,
}

/// Latest cumulative tick counts for both wheels
///
/// Written by the transport-side encoder handler, read-only to the
/// executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderCounts {
    /// Cumulative left wheel ticks
    pub left: i32,
    /// Cumulative right wheel ticks
    pub right: i32,
}

impl EncoderCounts {
    /// Overwrite one wheel's counter with a fresh cumulative reading
    pub fn update(&mut self, wheel: Wheel, count: i32) {
        match wheel {
            Wheel::Left => self.left = count,
            Wheel::Right => self.right = count,
        }
    }

    /// Absolute tick delta of one wheel against a baseline
    pub fn delta(current: i32, baseline: i32) -> u32 {
        current.wrapping_sub(baseline).unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_start_at_zero() {
        let counts = EncoderCounts::default();
        assert_eq!(counts.left, 0);
        assert_eq!(counts.right, 0);
    }

    #[test]
    fn test_update_overwrites_one_wheel() {
        let mut counts = EncoderCounts::default();
        counts.update(Wheel::Right, 545);
        assert_eq!(counts.right, 545);
        assert_eq!(counts.left, 0);

        counts.update(Wheel::Left, -12);
        assert_eq!(counts.left, -12);
        assert_eq!(counts.right, 545);
    }

    #[test]
    fn test_delta_is_direction_agnostic() {
        // Reverse travel counts down; progress is the same either way
        assert_eq!(EncoderCounts::delta(545, 0), 545);
        assert_eq!(EncoderCounts::delta(-545, 0), 545);
        assert_eq!(EncoderCounts::delta(100, 645), 545);
    }
}
