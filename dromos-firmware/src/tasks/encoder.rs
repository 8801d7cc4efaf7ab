//! Wheel encoder tasks
//!
//! One task per wheel counts quadrature edges on the A channel, using the
//! B channel level at the edge to pick the count direction. Counts are
//! cumulative for the life of the firmware and published as latest-value
//! signals; they are never reset.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use dromos_core::encoder::Wheel;

use crate::channels::{ENCODER_LEFT, ENCODER_RIGHT};

/// Encoder task - publishes cumulative tick counts for one wheel
#[embassy_executor::task(pool_size = 2)]
pub async fn encoder_task(wheel: Wheel, mut chan_a: Input<'static>, chan_b: Input<'static>) {
    info!("Encoder task started for {:?} wheel", wheel);

    let signal: &Signal<CriticalSectionRawMutex, i32> = match wheel {
        Wheel::Left => &ENCODER_LEFT,
        Wheel::Right => &ENCODER_RIGHT,
    };

    let mut count: i32 = 0;
    loop {
        chan_a.wait_for_rising_edge().await;

        // B leads A when the wheel runs in reverse
        if chan_b.is_high() {
            count = count.wrapping_sub(1);
        } else {
            count = count.wrapping_add(1);
        }

        signal.signal(count);
    }
}
