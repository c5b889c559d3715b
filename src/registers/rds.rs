//! RDS transmit registers
//!
//! This module contains the registers that feed the RDS encoder:
//! - TX_RDSD0~TX_RDSD7, the eight staging bytes of one group
//! - RDS, the RDS frequency deviation and audio line-in switch
//!
//! The staging bytes are write only and are only latched by the chip after
//! the host toggles `RDS_READY` in SYSTEM2.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// First RDS transmit data byte (address: 0x1C)
pub const TX_RDSD0: u8 = 0x1C;
/// Last RDS transmit data byte (address: 0x23)
pub const TX_RDSD7: u8 = 0x23;

/// Addresses TX_RDSD0~TX_RDSD7 in staging order
pub const TX_RDS_DATA: [u8; 8] = [
    TX_RDSD0,
    TX_RDSD0 + 1,
    TX_RDSD0 + 2,
    TX_RDSD0 + 3,
    TX_RDSD0 + 4,
    TX_RDSD0 + 5,
    TX_RDSD0 + 6,
    TX_RDSD7,
];

const DEVIATION_MASK: u8 = 0x7F;
const LINE_IN_ENABLE_SHIFT: u8 = 7;

/// RDS register (address: 0x26)
///
/// Specifies the transmit RDS frequency deviation.
///
/// See page 34 of the datasheet.
///
/// # Important Notes
/// - Deviation is 0.35kHz * `deviation` in normal mode
/// - Deviation is 0.207kHz * `deviation` in 4k mode and private mode
/// - Valid values are 0-127
#[register(0x26u8)]
#[derive(Debug, Clone, Copy, ReadableRegister, WritableRegister, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RdsDeviation {
    /// RDS frequency deviation step count
    pub deviation: u8,
    /// Audio line-in enable
    pub line_in_enable: bool,
}

impl Default for RdsDeviation {
    fn default() -> Self {
        // 0x3C = 60 steps, line-in off
        Self {
            deviation: 0x3C,
            line_in_enable: false,
        }
    }
}

impl FromByteArray for RdsDeviation {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            deviation: bytes[0] & DEVIATION_MASK,
            line_in_enable: (bytes[0] >> LINE_IN_ENABLE_SHIFT) & 0x01 != 0,
        })
    }
}

impl ToByteArray for RdsDeviation {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.deviation & DEVIATION_MASK)
            | (self.line_in_enable as u8) << LINE_IN_ENABLE_SHIFT])
    }
}
