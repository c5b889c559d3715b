#![cfg_attr(not(test), no_std)]
//! QN8066 FM Transceiver Driver
//!
//! This crate provides a type-safe interface for the RDS transmitter of the
//! Quintic QN8066 digital FM transceiver. The chip is controlled over I2C
//! (address 0x21) and encodes RDS groups staged by the host in eight data
//! registers.
//!
//! # Features
//! - Typed access to the registers involved in RDS transmission
//! - Group assembly for:
//!   - 0A: Program Service name (8 characters)
//!   - 2A: Radio Text (up to 64 characters) with A/B flag handling
//!   - 4A: Clock time and date
//! - Bounded RDSRDY/RDS_TXUPD handshake with caller-tunable timing
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Main device interface for hardware interaction
//!   - Typed and raw register access over I2C, blocking and async
//!   - [`RegisterAccess`], the byte-wide seam the RDS encoder talks through
//!
//! - [`registers`]: Register definitions for direct hardware access
//!   - SYSTEM2 (RDS ready bit, TX RDS enable)
//!   - STATUS3 (RDS TX acknowledgment bit, audio peak)
//!   - INT_CTRL (RDS 4k mode)
//!   - RDS (frequency deviation) and TX_RDSD0~TX_RDSD7
//!
//! - [`rds`]: RDS encoder
//!   - [`rds::group`]: group and block encoding
//!   - [`rds::session`]: station state and timing configuration
//!   - [`rds::transmit`]: handshake state machine and PS/RT/clock senders
//!
//! # Usage
//! Frequency tuning and the rest of the chip configuration are assumed to be
//! done by the application. Once the transmitter is running:
//!
//! 1. Enable the RDS subcarrier with [`Device::set_tx_rds`]
//! 2. Create an [`RdsSession`] with the station's PI code
//! 3. Set PTY and flags on the session
//! 4. Wrap the device and a delay source in an [`RdsTransmitter`]
//! 5. Call the senders periodically, checking [`RdsSession::error`] afterwards
//!
//! # Important Notes
//! - All sends block until every group is acknowledged or times out
//! - A missing acknowledgment sets the session error flag, it is not an `Err`
//! - Nothing else may write TX_RDSD0~TX_RDSD7 while a send is in progress
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::I2c};
//! use qn8066::{Device, Error, ProgramId, RdsSession, RdsTransmitter};
//!
//! fn broadcast<I2C: I2c, D: DelayNs>(i2c: I2C, delay: D) -> Result<bool, Error> {
//!     let mut device = Device::new(i2c);
//!     device.set_tx_rds(true)?;
//!
//!     let mut session = RdsSession::new(ProgramId::new(0xC234));
//!     session.set_program_type(10);
//!
//!     let mut rds = RdsTransmitter::new(device, delay);
//!     rds.send_station_name(&mut session, "PU2CLR")?;
//!     rds.send_radio_text(&mut session, "QN8066 Rust driver")?;
//!
//!     Ok(!session.error())
//! }
//! ```

pub use regiface::errors::Error;

pub mod device;
pub mod rds;
pub mod registers;

pub use device::{Device, RegisterAccess};
pub use rds::*;
pub use registers::*;
