//! Inter-task communication channels
//!
//! The link RX task hands host commands to the cover task; everything the
//! controller sends back goes through the outbox to the link TX task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use velum_protocol::{CoverMessage, HostCommand};

/// Channel capacity for host commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Host-visible notifications one `SetTarget` queues at most
const MESSAGES_PER_COMMAND: usize = 4;

/// Channel capacity for outgoing messages
///
/// Room for a full command queue handled back to back before the TX task
/// gets to run.
const OUTBOX_SIZE: usize = COMMAND_CHANNEL_SIZE * MESSAGES_PER_COMMAND;

/// Commands received from the host
pub static COMMANDS: Channel<CriticalSectionRawMutex, HostCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Messages waiting to be framed and sent to the host
pub static OUTBOX: Channel<CriticalSectionRawMutex, CoverMessage<'static>, OUTBOX_SIZE> =
    Channel::new();

/// Queue a message for the host, dropping it if the outbox is full
pub fn send(message: CoverMessage<'static>) {
    if OUTBOX.try_send(message).is_err() {
        defmt::warn!("Outbox full, dropping {:?}", message);
    }
}
