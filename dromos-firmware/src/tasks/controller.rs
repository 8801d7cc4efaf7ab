//! Main controller task
//!
//! Serializes mode events and the scheduler tick onto one loop, feeds
//! the latest encoder counts to the task executor, and publishes
//! velocity commands. Handlers run to completion here, so core state
//! never needs a lock.

use defmt::*;
use embassy_futures::select::{select, Either};

use dromos_core::config::ControllerConfig;
use dromos_core::encoder::{EncoderCounts, Wheel};
use dromos_core::mode::{ModeController, RobotMode};
use dromos_core::task::{Event, Executor};

use crate::channels::{StampedCommand, DRIVE_CMD, ENCODER_LEFT, ENCODER_RIGHT, MODE_CHANNEL};
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: ControllerConfig) {
    info!("Controller task started");

    let mode = ModeController::new(config);
    let mut executor = Executor::new();
    let mut counts = EncoderCounts::default();
    let mut now_ms: u64 = 0;

    loop {
        // Wait for either a mode switch or the next scheduler tick
        match select(MODE_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(ident) => {
                match RobotMode::parse(ident.as_str()) {
                    None => {
                        // Unknown identifiers are not an error
                        debug!("Ignoring mode '{}'", ident.as_str());
                    }
                    Some(requested) => {
                        info!("Mode switch: {:?}", requested);
                        if let Some(stop) = mode.apply(requested, &mut executor) {
                            // Hard stop goes out immediately, not on the
                            // next tick
                            DRIVE_CMD.signal(StampedCommand {
                                command: stop,
                                stamp_ms: now_ms,
                            });
                        }
                    }
                }
            }

            Either::Second(tick_ms) => {
                now_ms = tick_ms;

                // Pick up the latest cumulative counts; a wheel without a
                // fresh reading keeps its previous value
                if let Some(left) = ENCODER_LEFT.try_take() {
                    counts.update(Wheel::Left, left);
                }
                if let Some(right) = ENCODER_RIGHT.try_take() {
                    counts.update(Wheel::Right, right);
                }

                let result = executor.tick(now_ms, counts);

                if let Some(event) = result.event {
                    match event {
                        Event::TaskStarted => debug!("Task started"),
                        Event::TaskComplete => debug!("Task complete"),
                        Event::WaitStarted => debug!("Wait started"),
                        Event::SequenceComplete => info!("Task sequence complete"),
                    }
                }

                if let Some(command) = result.command {
                    DRIVE_CMD.signal(StampedCommand {
                        command,
                        stamp_ms: now_ms,
                    });
                }
            }
        }
    }
}
