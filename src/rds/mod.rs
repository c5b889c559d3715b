//! RDS transmit encoder
//!
//! - [`group`]: turns session state into four-block groups (0A, 2A, 4A)
//! - [`session`]: PI, PTY, flags, station name, radio text and transmit timing
//! - [`transmit`]: the RDSRDY/RDS_TXUPD handshake and the PS/RT/clock senders

pub mod group;
pub mod session;
pub mod transmit;

pub use group::*;
pub use session::*;
pub use transmit::*;
