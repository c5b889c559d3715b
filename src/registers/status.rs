//! Status and interrupt control registers
//!
//! This module contains:
//! - STATUS3, carrying the RDS transmit acknowledgment bit and audio peak level
//! - INT_CTRL, carrying the RDS 4k/private mode switches
//!
//! Fields are unpacked with explicit shifts and masks so bit positions stay
//! visible next to the datasheet tables.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

const RX_AGC_ERROR_SHIFT: u8 = 1;
const RDS_TX_UPDATED_SHIFT: u8 = 2;
const AUDIO_PEAK_SHIFT: u8 = 3;
const AUDIO_PEAK_MASK: u8 = 0x0F;
const CAP_SHORT_SHIFT: u8 = 7;

/// STATUS3 register address
pub const STATUS3: u8 = 0x1A;

/// Millivolts per `audio_peak` step
pub const AUDIO_PEAK_STEP_MV: u16 = 45;

/// STATUS3 register (address: 0x1A, read only)
///
/// Receiver audio peak level, AGC status and RDS transmit acknowledgment.
///
/// See pages 30-31 of the datasheet.
///
/// # Important Notes
/// - `rds_tx_updated` is toggled by the chip once it has fetched RDSD0~RDSD7
///   into its internal buffer. Only the change matters, never the level.
#[register(0x1Au8)]
#[derive(Debug, Clone, Copy, ReadableRegister, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status3 {
    /// RX AGC error flag
    pub rx_agc_error: bool,
    /// RDS TX group fetched by the chip (toggles per group)
    pub rds_tx_updated: bool,
    /// Audio peak value at ADC input, in steps of 45mV
    pub audio_peak: u8,
    /// Large capacitor short detection
    pub cap_short: bool,
}

impl Status3 {
    /// Audio peak at the ADC input in millivolts
    pub fn audio_peak_mv(&self) -> u16 {
        self.audio_peak as u16 * AUDIO_PEAK_STEP_MV
    }
}

impl FromByteArray for Status3 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let raw = bytes[0];
        Ok(Self {
            rx_agc_error: (raw >> RX_AGC_ERROR_SHIFT) & 0x01 != 0,
            rds_tx_updated: (raw >> RDS_TX_UPDATED_SHIFT) & 0x01 != 0,
            audio_peak: (raw >> AUDIO_PEAK_SHIFT) & AUDIO_PEAK_MASK,
            cap_short: (raw >> CAP_SHORT_SHIFT) & 0x01 != 0,
        })
    }
}

/// Mask of the acknowledgment bit inside a raw STATUS3 byte
pub const RDS_TX_UPDATED_MASK: u8 = 1 << RDS_TX_UPDATED_SHIFT;

const TX_CHANNEL_HIGH_MASK: u8 = 0x03;
const PRIVATE_MODE_SHIFT: u8 = 2;
const RDS_4K_MODE_SHIFT: u8 = 3;
const TONE_1K_SHIFT: u8 = 4;
const RDS_ONLY_SHIFT: u8 = 5;
const CCA_INT_ENABLE_SHIFT: u8 = 6;
const RDS_INT_ENABLE_SHIFT: u8 = 7;

/// INT_CTRL register (address: 0x19)
///
/// Holds the top two bits of the TX channel index together with the RDS
/// mode switches.
///
/// See page 30 of the datasheet.
///
/// # Important Notes
/// - `tx_channel_high` belongs to the tuning configuration. Always
///   read-modify-write this register so tuning is preserved.
#[register(0x19u8)]
#[derive(Debug, Clone, Copy, ReadableRegister, WritableRegister, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntCtrl {
    /// Highest 2 bits of the 10-bit TX channel index
    pub tx_channel_high: u8,
    /// Private mode for RX/TX (audio scramble and RDS encryption)
    pub private_mode: bool,
    /// RDS 4k mode
    pub rds_4k_mode: bool,
    /// Internal 1kHz tone used as DAC output in RX
    pub tone_1k: bool,
    /// RX bit-stream carries RDS blocks only (no MMBS 'E' block)
    pub rds_only: bool,
    /// RX CCA interrupt enable
    pub cca_int_enable: bool,
    /// RDS RX interrupt enable
    pub rds_int_enable: bool,
}

impl FromByteArray for IntCtrl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let raw = bytes[0];
        Ok(Self {
            tx_channel_high: raw & TX_CHANNEL_HIGH_MASK,
            private_mode: (raw >> PRIVATE_MODE_SHIFT) & 0x01 != 0,
            rds_4k_mode: (raw >> RDS_4K_MODE_SHIFT) & 0x01 != 0,
            tone_1k: (raw >> TONE_1K_SHIFT) & 0x01 != 0,
            rds_only: (raw >> RDS_ONLY_SHIFT) & 0x01 != 0,
            cca_int_enable: (raw >> CCA_INT_ENABLE_SHIFT) & 0x01 != 0,
            rds_int_enable: (raw >> RDS_INT_ENABLE_SHIFT) & 0x01 != 0,
        })
    }
}

impl ToByteArray for IntCtrl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.tx_channel_high & TX_CHANNEL_HIGH_MASK)
            | (self.private_mode as u8) << PRIVATE_MODE_SHIFT
            | (self.rds_4k_mode as u8) << RDS_4K_MODE_SHIFT
            | (self.tone_1k as u8) << TONE_1K_SHIFT
            | (self.rds_only as u8) << RDS_ONLY_SHIFT
            | (self.cca_int_enable as u8) << CCA_INT_ENABLE_SHIFT
            | (self.rds_int_enable as u8) << RDS_INT_ENABLE_SHIFT])
    }
}
