//! Dromos - Differential-drive rover firmware
//!
//! Main firmware binary for RP2040-based drive bases. Wires the board's
//! encoders, H-bridges, and control link to the board-agnostic
//! controller core.
//!
//! Named after the Greek "dromos" meaning "course" - the fixed routes
//! this controller drives, one task at a time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dromos_core::config::ControllerConfig;
use dromos_core::encoder::Wheel;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dromos firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Control link UART (115200 baud default)
    let uart_config = UartConfig::default();
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();
    info!("Control link initialized");

    // Wheel encoders, A/B channel per wheel
    // Pin assignments are board-specific: left on GPIO2/3, right on GPIO4/5
    let left_a = Input::new(p.PIN_2, Pull::Up);
    let left_b = Input::new(p.PIN_3, Pull::Up);
    let right_a = Input::new(p.PIN_4, Pull::Up);
    let right_b = Input::new(p.PIN_5, Pull::Up);

    // H-bridge outputs: PWM on GPIO16/18, direction on GPIO17/19
    let drive_config = tasks::DriveFwConfig::default();
    let mut pwm_config = embassy_rp::pwm::Config::default();
    pwm_config.top = drive_config.pwm_top;
    pwm_config.compare_a = 0;
    let pwm_left = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone());
    let pwm_right = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, pwm_config);
    let dir_left = Output::new(p.PIN_17, Level::Low);
    let dir_right = Output::new(p.PIN_19, Level::Low);
    info!("Drive outputs initialized");

    let config = ControllerConfig::default();

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::encoder_task(Wheel::Left, left_a, left_b))
        .unwrap();
    spawner
        .spawn(tasks::encoder_task(Wheel::Right, right_a, right_b))
        .unwrap();
    spawner
        .spawn(tasks::motor_task(
            pwm_left,
            pwm_right,
            dir_left,
            dir_right,
            drive_config,
        ))
        .unwrap();
    spawner.spawn(tasks::controller_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
