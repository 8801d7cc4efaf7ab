//! Motion task queue and executor
//!
//! Converts queued motion intents into per-tick velocity commands, using
//! cumulative encoder counts as the only completion feedback.

pub mod executor;
pub mod queue;

pub use executor::{Event, Executor, Phase, TickResult};
pub use queue::{Task, TaskQueue, MAX_TASKS};
