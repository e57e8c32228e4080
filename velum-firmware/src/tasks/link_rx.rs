//! Host link UART receive task
//!
//! Parses frames from the host. Ping is answered here; everything else is
//! forwarded to the cover task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use velum_protocol::{CoverMessage, FrameParser, HostCommand};

use crate::channels::{self, COMMANDS};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the host
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match HostCommand::from_frame(&frame) {
                            Ok(cmd) => handle_command(cmd),
                            Err(e) => warn!("Failed to parse host command: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

fn handle_command(cmd: HostCommand) {
    match cmd {
        HostCommand::Ping => {
            trace!("PING received");
            channels::send(CoverMessage::Pong);
        }
        cmd => {
            debug!("Host command: {:?}", cmd);
            if COMMANDS.try_send(cmd).is_err() {
                warn!("Command channel full, dropping {:?}", cmd);
            }
        }
    }
}
