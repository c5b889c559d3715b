//! System mode registers
//!
//! This module contains the SYSTEM2 register, which mixes audio mode bits with
//! the two RDS control bits the transmit path depends on:
//! - `TX_RDS_ENABLE` turns the RDS subcarrier on
//! - `RDS_READY` is toggled by the host each time a full group is staged
//!
//! Every field is a single bit, so the register is represented with `bitflags`.

use bitflags::bitflags;
use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// SYSTEM2 register address
pub const SYSTEM2: u8 = 0x01;

bitflags! {
    /// SYSTEM2 bit assignments
    ///
    /// See page 20 of the datasheet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct System2Flags: u8 {
        /// Pre-emphasis/de-emphasis time constant
        /// - clear = 50μs
        /// - set = 75μs
        const TC = 1 << 0;
        /// RDS transmitting ready. Toggled (not set) to hand RDSD0~RDSD7 to the chip.
        const RDS_READY = 1 << 1;
        /// TX audio mute
        const TX_MUTE = 1 << 2;
        /// RX audio mute
        const RX_MUTE = 1 << 3;
        /// TX mono mode (clear = stereo)
        const TX_MONO = 1 << 4;
        /// Force receiver into mono
        const FORCE_MONO = 1 << 5;
        /// Transmitter RDS enable
        const TX_RDS_ENABLE = 1 << 6;
        /// Receiver RDS enable
        const RX_RDS_ENABLE = 1 << 7;
    }
}

/// SYSTEM2 register (address: 0x01)
///
/// Sets device modes. Read-modify-write only: most bits are owned by the
/// tuning/audio configuration, the RDS path only touches `RDS_READY` and
/// `TX_RDS_ENABLE`.
///
/// # Important Notes
/// - `RDS_READY` is edge-triggered. Its absolute value carries no meaning,
///   only the fact that it changed since the last group.
#[register(0x01u8)]
#[derive(Debug, Clone, Copy, ReadableRegister, WritableRegister, Default, PartialEq, Eq)]
pub struct System2 {
    pub flags: System2Flags,
}

impl System2 {
    /// Current level of the ready bit
    pub fn rds_ready(&self) -> bool {
        self.flags.contains(System2Flags::RDS_READY)
    }

    /// Returns a copy with the ready bit inverted
    pub fn with_rds_ready_toggled(mut self) -> Self {
        self.flags.toggle(System2Flags::RDS_READY);
        self
    }

    /// Whether the RDS subcarrier is enabled on transmit
    pub fn tx_rds_enabled(&self) -> bool {
        self.flags.contains(System2Flags::TX_RDS_ENABLE)
    }

    /// Enables or disables the RDS subcarrier on transmit
    pub fn set_tx_rds_enabled(&mut self, enabled: bool) {
        self.flags.set(System2Flags::TX_RDS_ENABLE, enabled);
    }
}

impl FromByteArray for System2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            flags: System2Flags::from_bits_retain(bytes[0]),
        })
    }
}

impl ToByteArray for System2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.flags.bits()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_only_touches_ready_bit() {
        let reg = System2::from_bytes([0b0100_0001]).unwrap();
        let toggled = reg.with_rds_ready_toggled();

        assert!(!reg.rds_ready());
        assert!(toggled.rds_ready());
        assert_eq!(toggled.to_bytes().unwrap(), [0b0100_0011]);
        assert_eq!(toggled.with_rds_ready_toggled(), reg);
    }

    #[test]
    fn tx_rds_enable_is_bit_six() {
        let mut reg = System2::default();
        reg.set_tx_rds_enabled(true);
        assert_eq!(reg.to_bytes().unwrap(), [0x40]);
        assert!(reg.tx_rds_enabled());
    }
}
