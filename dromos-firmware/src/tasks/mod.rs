//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod encoder;
pub mod link_rx;
pub mod motor;
pub mod tick;

pub use controller::controller_task;
pub use encoder::encoder_task;
pub use link_rx::link_rx_task;
pub use motor::{motor_task, DriveFwConfig};
pub use tick::tick_task;
