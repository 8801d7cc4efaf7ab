//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Each signal or channel has exactly one writing task; the
//! controller serializes everything else onto its own loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::String;

use dromos_core::command::DriveCommand;

/// Channel capacity for mode switch requests
const MODE_CHANNEL_SIZE: usize = 4;

/// Maximum mode identifier length accepted from the link
pub const MAX_MODE_LEN: usize = 24;

/// Mode identifiers from the command link (opaque at this layer)
pub static MODE_CHANNEL: Channel<
    CriticalSectionRawMutex,
    String<MAX_MODE_LEN>,
    MODE_CHANNEL_SIZE,
> = Channel::new();

/// Latest cumulative left wheel count (written by the left encoder task)
pub static ENCODER_LEFT: Signal<CriticalSectionRawMutex, i32> = Signal::new();

/// Latest cumulative right wheel count (written by the right encoder task)
pub static ENCODER_RIGHT: Signal<CriticalSectionRawMutex, i32> = Signal::new();

/// A velocity command stamped with the tick time it was issued at
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StampedCommand {
    /// The body-frame velocity command
    pub command: DriveCommand,
    /// Controller clock at emission, in milliseconds
    pub stamp_ms: u64,
}

/// Outbound velocity command (written by the controller)
pub static DRIVE_CMD: Signal<CriticalSectionRawMutex, StampedCommand> = Signal::new();
