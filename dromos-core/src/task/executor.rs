//! Task executor state machine
//!
//! Runs once per scheduler tick. Owns the queue and all in-progress task
//! state, converts cumulative encoder counts into per-task progress, and
//! decides each tick whether to emit a velocity command or advance the
//! queue.
//!
//! Completion tests use `>=`, never equality: encoder deltas are coarse
//! and a single tick can jump several counts past the target.

use super::queue::{Task, TaskQueue};
use crate::command::DriveCommand;
use crate::encoder::EncoderCounts;

/// Executor phase, derived from the run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Not running
    Idle,
    /// Inside a timed wait
    Paused,
    /// A motion task is active with baselines captured
    Executing,
    /// Running with nothing active; the queue is popped on the next tick
    Loading,
}

/// State transitions surfaced to the caller for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A queued motion task became active
    TaskStarted,
    /// The active task reached its tick target
    TaskComplete,
    /// A timed wait began
    WaitStarted,
    /// The queue drained and the executor stopped
    SequenceComplete,
}

/// A motion task with its progress baselines captured
///
/// Baselines are recorded exactly once, when the task moves from queued
/// to active; a queued [`Task`] can never carry them.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ActiveTask {
    Drive {
        target_ticks: u32,
        speed_mps: f64,
        start_right: i32,
    },
    Turn {
        target_ticks: u32,
        speed_rad_s: f64,
        start_left: i32,
        start_right: i32,
    },
}

/// Run state owned by the executor
///
/// Invariant: `pause_until_ms` is `Some` exactly while a wait task is in
/// progress; `active` is cleared on completion and on halt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct RunState {
    running: bool,
    active: Option<ActiveTask>,
    pause_until_ms: Option<u64>,
}

/// Outcome of a single executor tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickResult {
    /// Velocity command to publish this tick, if any
    pub command: Option<DriveCommand>,
    /// State transition worth logging, if any
    pub event: Option<Event>,
}

/// Tick-driven task executor
pub struct Executor {
    state: RunState,
    queue: TaskQueue,
}

impl Executor {
    /// Create an idle executor with an empty queue
    pub fn new() -> Self {
        Self {
            state: RunState::default(),
            queue: TaskQueue::new(),
        }
    }

    /// Current executor phase
    pub fn phase(&self) -> Phase {
        if !self.state.running {
            Phase::Idle
        } else if self.state.pause_until_ms.is_some() {
            Phase::Paused
        } else if self.state.active.is_some() {
            Phase::Executing
        } else {
            Phase::Loading
        }
    }

    /// Check whether a sequence is executing
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Number of tasks still queued (excludes the active task)
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Replace the queue wholesale and start executing
    ///
    /// Any in-progress task or pending wait is discarded; the first tick
    /// after this call loads the new sequence from the front.
    pub fn start(&mut self, tasks: TaskQueue) {
        self.queue = tasks;
        self.state = RunState {
            running: true,
            active: None,
            pause_until_ms: None,
        };
    }

    /// Hard stop: halt execution and return the stop command to publish
    ///
    /// The queue is left untouched; a later [`start`](Self::start)
    /// replaces it wholesale.
    pub fn halt(&mut self) -> DriveCommand {
        self.state.running = false;
        self.state.active = None;
        self.state.pause_until_ms = None;
        DriveCommand::stopped()
    }

    /// Advance the state machine by one scheduler tick
    ///
    /// `now_ms` is the scheduler's monotonic clock; `counts` are the
    /// latest cumulative encoder readings. Emits exactly one command per
    /// tick while a motion task is active, one zero-velocity command at
    /// task completion, and none otherwise.
    pub fn tick(&mut self, now_ms: u64, counts: EncoderCounts) -> TickResult {
        if !self.state.running {
            return TickResult::default();
        }

        if let Some(deadline) = self.state.pause_until_ms {
            if now_ms < deadline {
                return TickResult::default();
            }
            // Wait satisfied; load the next task on this same tick.
            self.state.pause_until_ms = None;
        }

        let mut started = None;
        if self.state.active.is_none() {
            match self.queue.pop_front() {
                None => {
                    self.state.running = false;
                    return TickResult {
                        command: None,
                        event: Some(Event::SequenceComplete),
                    };
                }
                Some(Task::Wait { duration_ms }) => {
                    self.state.pause_until_ms = Some(now_ms + u64::from(duration_ms));
                    return TickResult {
                        command: None,
                        event: Some(Event::WaitStarted),
                    };
                }
                Some(Task::Drive {
                    target_ticks,
                    speed_mps,
                }) => {
                    self.state.active = Some(ActiveTask::Drive {
                        target_ticks,
                        speed_mps,
                        start_right: counts.right,
                    });
                    started = Some(Event::TaskStarted);
                }
                Some(Task::Turn {
                    target_ticks,
                    speed_rad_s,
                }) => {
                    self.state.active = Some(ActiveTask::Turn {
                        target_ticks,
                        speed_rad_s,
                        start_left: counts.left,
                        start_right: counts.right,
                    });
                    started = Some(Event::TaskStarted);
                }
            }
        }

        match self.state.active {
            Some(ActiveTask::Drive {
                target_ticks,
                speed_mps,
                start_right,
            }) => {
                let moved = EncoderCounts::delta(counts.right, start_right);
                if moved >= target_ticks {
                    self.complete()
                } else {
                    TickResult {
                        command: Some(DriveCommand::forward(speed_mps)),
                        event: started,
                    }
                }
            }
            Some(ActiveTask::Turn {
                target_ticks,
                speed_rad_s,
                start_left,
                start_right,
            }) => {
                let moved_left = u64::from(EncoderCounts::delta(counts.left, start_left));
                let moved_right = u64::from(EncoderCounts::delta(counts.right, start_right));
                // Integer average truncates; kept for calibration compatibility.
                let moved = (moved_left + moved_right) / 2;
                if moved >= u64::from(target_ticks) {
                    self.complete()
                } else {
                    TickResult {
                        command: Some(DriveCommand::spin(speed_rad_s)),
                        event: started,
                    }
                }
            }
            None => TickResult::default(),
        }
    }

    /// Finish the active task: emit the stop command and clear it
    fn complete(&mut self) -> TickResult {
        self.state.active = None;
        TickResult {
            command: Some(DriveCommand::stopped()),
            event: Some(Event::TaskComplete),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;

    fn counts(left: i32, right: i32) -> EncoderCounts {
        EncoderCounts { left, right }
    }

    fn single_task(task: Task) -> TaskQueue {
        let mut queue = TaskQueue::new();
        let _ = queue.push_back(task);
        queue
    }

    #[test]
    fn test_idle_executor_does_nothing() {
        let mut exec = Executor::new();
        assert_eq!(exec.phase(), Phase::Idle);

        let result = exec.tick(0, counts(0, 0));
        assert_eq!(result, TickResult::default());
        assert_eq!(exec.phase(), Phase::Idle);
    }

    #[test]
    fn test_drive_scenario_545_ticks() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::drive_at(1.0, 0.5, &config)));

        // First tick captures the baseline and emits the first command
        let result = exec.tick(0, counts(0, 0));
        assert_eq!(result.command, Some(DriveCommand::forward(0.5)));
        assert_eq!(result.event, Some(Event::TaskStarted));
        assert_eq!(exec.phase(), Phase::Executing);

        // One tick short of the target: still driving
        let result = exec.tick(10, counts(0, 544));
        assert_eq!(result.command, Some(DriveCommand::forward(0.5)));
        assert_eq!(result.event, None);

        // Target reached: one stop command, task cleared
        let result = exec.tick(20, counts(0, 545));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
        assert_eq!(result.event, Some(Event::TaskComplete));
        assert_eq!(exec.phase(), Phase::Loading);

        // Queue drained: executor stops itself with one notification
        let result = exec.tick(30, counts(0, 545));
        assert_eq!(result.command, None);
        assert_eq!(result.event, Some(Event::SequenceComplete));
        assert!(!exec.is_running());

        // Idempotence: nothing further is ever emitted
        let result = exec.tick(40, counts(0, 9999));
        assert_eq!(result, TickResult::default());
    }

    #[test]
    fn test_turn_progress_averages_both_wheels() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        // 360 degrees -> 200 ticks
        exec.start(single_task(Task::turn_at(360.0, 5.0, &config)));

        let result = exec.tick(0, counts(0, 0));
        assert_eq!(result.command, Some(DriveCommand::spin(5.0)));

        // avg(100, 100) = 100 < 200: still turning
        let result = exec.tick(10, counts(100, 100));
        assert_eq!(result.command, Some(DriveCommand::spin(5.0)));

        // avg(200, 200) = 200: complete
        let result = exec.tick(20, counts(200, 200));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
        assert_eq!(result.event, Some(Event::TaskComplete));
    }

    #[test]
    fn test_turn_average_truncates() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::turn_at(360.0, 5.0, &config)));
        exec.tick(0, counts(0, 0));

        // avg(199, 200) truncates to 199 < 200: not yet complete
        let result = exec.tick(10, counts(199, 200));
        assert_eq!(result.command, Some(DriveCommand::spin(5.0)));

        // avg(200, 201) truncates to 200: complete
        let result = exec.tick(20, counts(200, 201));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
    }

    #[test]
    fn test_overshoot_past_target_completes() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::drive_at(1.0, 0.5, &config)));
        exec.tick(0, counts(0, 0));

        // A coarse encoder delta jumps well past 545 in one tick
        let result = exec.tick(10, counts(0, 612));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
        assert_eq!(result.event, Some(Event::TaskComplete));
    }

    #[test]
    fn test_baseline_captured_at_task_start() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::drive_at(1.0, 0.5, &config)));

        // Counters are cumulative and nonzero long before the task starts
        let result = exec.tick(0, counts(4000, 10_000));
        assert_eq!(result.command, Some(DriveCommand::forward(0.5)));

        // Progress is relative to the baseline, not absolute
        let result = exec.tick(10, counts(4000, 10_544));
        assert_eq!(result.command, Some(DriveCommand::forward(0.5)));

        let result = exec.tick(20, counts(4000, 10_545));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
    }

    #[test]
    fn test_reverse_drive_counts_down() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::drive_at(-1.0, 0.5, &config)));

        let result = exec.tick(0, counts(0, 0));
        assert_eq!(result.command, Some(DriveCommand::forward(-0.5)));

        // Reverse travel decrements the cumulative counter
        let result = exec.tick(10, counts(0, -544));
        assert_eq!(result.command, Some(DriveCommand::forward(-0.5)));

        let result = exec.tick(20, counts(0, -545));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
    }

    #[test]
    fn test_zero_length_task_completes_on_first_tick() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::drive_at(0.0, 0.5, &config)));

        let result = exec.tick(0, counts(0, 0));
        assert_eq!(result.command, Some(DriveCommand::stopped()));
        assert_eq!(result.event, Some(Event::TaskComplete));
    }

    #[test]
    fn test_wait_between_turns() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();

        let mut queue = TaskQueue::new();
        let _ = queue.push_back(Task::turn_at(360.0, 5.0, &config));
        let _ = queue.push_back(Task::wait_ms(2000));
        let _ = queue.push_back(Task::turn_at(360.0, 2.5, &config));
        exec.start(queue);

        // Run the first turn to completion
        exec.tick(0, counts(0, 0));
        let result = exec.tick(10, counts(200, 200));
        assert_eq!(result.command, Some(DriveCommand::stopped()));

        // Next tick pops the wait; no command is emitted
        let result = exec.tick(20, counts(200, 200));
        assert_eq!(result.command, None);
        assert_eq!(result.event, Some(Event::WaitStarted));
        assert_eq!(exec.phase(), Phase::Paused);

        // The full two seconds pass in silence, measured from the tick
        // the wait began
        for now in [30, 500, 1000, 2019] {
            let result = exec.tick(now, counts(200, 200));
            assert_eq!(result, TickResult::default());
        }

        // First tick at or after expiry loads the second turn
        let result = exec.tick(2020, counts(200, 200));
        assert_eq!(result.command, Some(DriveCommand::spin(2.5)));
        assert_eq!(result.event, Some(Event::TaskStarted));
        assert_eq!(exec.phase(), Phase::Executing);
    }

    #[test]
    fn test_wait_never_reruns() {
        let mut exec = Executor::new();
        exec.start(single_task(Task::wait_ms(100)));

        let result = exec.tick(0, counts(0, 0));
        assert_eq!(result.event, Some(Event::WaitStarted));

        // Expiry falls through to loading; the drained queue stops the
        // executor rather than restarting the wait
        let result = exec.tick(100, counts(0, 0));
        assert_eq!(result.event, Some(Event::SequenceComplete));
        assert!(!exec.is_running());
    }

    #[test]
    fn test_halt_clears_active_but_keeps_queue() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();

        let mut queue = TaskQueue::new();
        let _ = queue.push_back(Task::drive_at(1.0, 0.5, &config));
        let _ = queue.push_back(Task::turn_at(90.0, 2.0, &config));
        exec.start(queue);
        exec.tick(0, counts(0, 0));
        assert_eq!(exec.phase(), Phase::Executing);

        let cmd = exec.halt();
        assert!(cmd.is_stopped());
        assert_eq!(exec.phase(), Phase::Idle);
        assert_eq!(exec.queued(), 1);

        // Halted executors ignore ticks entirely
        let result = exec.tick(10, counts(0, 300));
        assert_eq!(result, TickResult::default());
    }

    #[test]
    fn test_halt_during_wait_clears_deadline() {
        let mut exec = Executor::new();
        exec.start(single_task(Task::wait_ms(5000)));
        exec.tick(0, counts(0, 0));
        assert_eq!(exec.phase(), Phase::Paused);

        exec.halt();
        assert_eq!(exec.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_discards_previous_run() {
        let config = ControllerConfig::default();
        let mut exec = Executor::new();
        exec.start(single_task(Task::drive_at(1.0, 0.5, &config)));
        exec.tick(0, counts(0, 0));

        // Restart mid-task with a different sequence
        exec.start(single_task(Task::turn_at(360.0, 5.0, &config)));
        assert_eq!(exec.phase(), Phase::Loading);

        let result = exec.tick(10, counts(0, 100));
        assert_eq!(result.command, Some(DriveCommand::spin(5.0)));
    }
}
