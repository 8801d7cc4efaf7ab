//! Mode handling
//!
//! The robot's operational mode arrives from the transport as an opaque
//! identifier string. Exactly two values are meaningful to this
//! controller; everything else is ignored without error.

use crate::command::DriveCommand;
use crate::config::ControllerConfig;
use crate::task::{Executor, Task, TaskQueue};

/// Operational modes this controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotMode {
    /// Operator has the drive base; autonomous motion is not permitted
    Manual,
    /// This controller owns the drive base
    Autonomous,
}

impl RobotMode {
    /// Transport identifier for manual operation
    pub const MANUAL: &'static str = "manual";
    /// Transport identifier for autonomous operation
    pub const AUTONOMOUS: &'static str = "autonomous";

    /// Parse a transport mode identifier
    ///
    /// Unknown identifiers map to `None` and cause no state change.
    pub fn parse(ident: &str) -> Option<Self> {
        match ident {
            Self::MANUAL => Some(RobotMode::Manual),
            Self::AUTONOMOUS => Some(RobotMode::Autonomous),
            _ => None,
        }
    }
}

/// Owns the task queue's lifecycle across mode switches
#[derive(Debug, Clone, Copy)]
pub struct ModeController {
    config: ControllerConfig,
}

impl ModeController {
    /// Create a mode controller with the given calibration
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// React to a mode identifier from the transport
    ///
    /// Entering manual halts the executor and returns the hard-stop
    /// command to publish. Entering autonomous replaces the queue
    /// wholesale with the patrol routine and starts execution; the first
    /// commands flow on the next tick. Unknown identifiers change
    /// nothing.
    pub fn handle(&self, ident: &str, executor: &mut Executor) -> Option<DriveCommand> {
        self.apply(RobotMode::parse(ident)?, executor)
    }

    /// Apply an already-parsed mode switch
    pub fn apply(&self, mode: RobotMode, executor: &mut Executor) -> Option<DriveCommand> {
        match mode {
            RobotMode::Manual => Some(executor.halt()),
            RobotMode::Autonomous => {
                executor.start(self.routine());
                None
            }
        }
    }

    /// The fixed patrol routine
    ///
    /// Two full turns at different angular speeds separated by a pause.
    pub fn routine(&self) -> TaskQueue {
        let mut tasks = TaskQueue::new();
        let _ = tasks.push_back(Task::turn_at(360.0, self.config.angular_speed, &self.config));
        let _ = tasks.push_back(Task::wait_ms(self.config.inter_task_wait_ms));
        let _ = tasks.push_back(Task::turn_at(360.0, self.config.angular_speed / 2.0, &self.config));
        tasks
    }
}
