//! Tick task for time-based updates
//!
//! Provides the fixed-period scheduler tick that drives the task
//! executor. Pause deadlines are checked at this granularity.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds (100 Hz)
pub const TICK_INTERVAL_MS: u32 = 10;

/// Signal to notify the controller of a tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Monotonic milliseconds since task start
        let now_ms = start.elapsed().as_millis();

        // Signal the controller
        TICK_SIGNAL.signal(now_ms);
    }
}
