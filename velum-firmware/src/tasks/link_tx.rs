//! Host link UART transmit task
//!
//! Frames queued messages and writes them out.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use velum_protocol::{CoverMessage, MAX_FRAME_SIZE};

use crate::channels::OUTBOX;

/// Link TX task - sends frames to the host
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let message = OUTBOX.receive().await;
        send_message(&mut tx, &message).await;
    }
}

async fn send_message(tx: &mut BufferedUartTx, message: &CoverMessage<'_>) {
    let frame = match message.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode {:?}: {:?}", message, e);
            return;
        }
    };

    let mut buf = [0u8; MAX_FRAME_SIZE];
    if let Ok(len) = frame.encode(&mut buf) {
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Failed to send frame: {:?}", e);
        } else {
            trace!("TX: {:?}", message);
        }
    }
}
