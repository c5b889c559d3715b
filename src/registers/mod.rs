//! Register definitions for the QN8066 FM transceiver
//! Covers the registers touched by the RDS transmit path, from the
//! "QN8066 Digital FM Transceiver for Portable Devices" datasheet

mod rds;
mod status;
mod system;

pub use rds::*;
pub use status::*;
pub use system::*;

/// 7-bit I2C address of the QN8066
pub const I2C_ADDRESS: u8 = 0x21;
