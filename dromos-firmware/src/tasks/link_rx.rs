//! Command link receive task
//!
//! Reads newline-terminated commands from the control UART and forwards
//! mode switches to the controller. The mode identifier is opaque at
//! this layer. Garbage on the link is logged and dropped; a bad frame
//! must never take the controller down.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use heapless::{String, Vec};

use crate::channels::{MAX_MODE_LEN, MODE_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Maximum accepted line length
const MAX_LINE_LEN: usize = 32;

/// Link RX task - receives and parses commands from the control link
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];
    let mut line: Vec<u8, MAX_LINE_LEN> = Vec::new();

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    if byte == b'\n' || byte == b'\r' {
                        if !line.is_empty() {
                            handle_line(&line).await;
                            line.clear();
                        }
                    } else if line.push(byte).is_err() {
                        warn!("Link line overflow, dropping");
                        line.clear();
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Parse one link line and dispatch it
async fn handle_line(line: &[u8]) {
    let text = match core::str::from_utf8(line) {
        Ok(text) => text,
        Err(_) => {
            warn!("Non-UTF8 link line, dropping");
            return;
        }
    };

    match text.trim().split_once(' ') {
        Some(("mode", ident)) => {
            let mut mode: String<MAX_MODE_LEN> = String::new();
            if mode.push_str(ident.trim()).is_err() {
                warn!("Mode identifier too long, dropping");
                return;
            }
            MODE_CHANNEL.send(mode).await;
        }
        _ => {
            warn!("Unknown link command: {}", text);
        }
    }
}
