//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod cover;
pub mod link_rx;
pub mod link_tx;

pub use cover::{cover_task, CoverLines};
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
