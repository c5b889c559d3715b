//! RDS group assembly
//!
//! An RDS group is four 16-bit blocks:
//!
//! | Block | Content |
//! |-------|---------|
//! | 1 | Program Identification (PI) |
//! | 2 | Group type, version, TP, PTY and five group specific bits |
//! | 3 | Payload (group specific) |
//! | 4 | Payload (group specific) |
//!
//! Supported group types:
//! - 0A: Program Service name, 2 characters per group, 2-bit address
//! - 2A: Radio Text, 4 characters per group, 4-bit address, A/B flag
//! - 4A: Clock time and date
//!
//! Blocks are tagged as either numeric codes or two-character text so the
//! staging byte order can follow what the block holds (see [`Block`]).

use super::session::RdsSession;

/// Group type code of the Program Service name group
pub const GROUP_STATION_NAME: u8 = 0;
/// Group type code of the Radio Text group
pub const GROUP_RADIO_TEXT: u8 = 2;
/// Group type code of the clock time group
pub const GROUP_CLOCK_TIME: u8 = 4;

const GROUP_TYPE_SHIFT: u16 = 12;
const VERSION_B_SHIFT: u16 = 11;
const TP_SHIFT: u16 = 10;
const PTY_SHIFT: u16 = 5;
const PTY_MASK: u16 = 0x1F;

// Group 0A specific bits
const TA_SHIFT: u16 = 4;
const MS_SHIFT: u16 = 3;
const DI_SHIFT: u16 = 2;
const PS_ADDRESS_MASK: u16 = 0x03;

// Group 2A specific bits
const TEXT_AB_SHIFT: u16 = 4;
const RT_ADDRESS_MASK: u16 = 0x0F;

// Group 4A specific bits
const MJD_HIGH_MASK: u16 = 0x03;

/// Program Identification code
///
/// Layout, most significant first:
/// - bits 15:12 country identifier
/// - bits 11:8 program area coverage
/// - bits 7:0 program reference number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramId(u16);

impl ProgramId {
    /// Wraps a raw 16-bit PI code
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Builds a PI code from its subfields. Out of range subfields are masked.
    pub const fn from_parts(country: u8, area: u8, reference: u8) -> Self {
        Self(((country as u16 & 0x0F) << 12) | ((area as u16 & 0x0F) << 8) | reference as u16)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn country(self) -> u8 {
        (self.0 >> 12) as u8 & 0x0F
    }

    pub const fn area(self) -> u8 {
        (self.0 >> 8) as u8 & 0x0F
    }

    pub const fn reference(self) -> u8 {
        self.0 as u8
    }
}

impl From<u16> for ProgramId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

/// One 16-bit block of a group
///
/// The chip transmits TX_RDSD0~TX_RDSD7 in address order, so the staging
/// order of the two bytes of a block decides what goes on air first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Block {
    /// Numeric code, staged most significant byte first
    Code(u16),
    /// Two characters, staged first character first
    Text([u8; 2]),
}

impl Block {
    /// Bytes in staging order
    pub fn to_bytes(self) -> [u8; 2] {
        match self {
            Block::Code(value) => value.to_be_bytes(),
            Block::Text(chars) => chars,
        }
    }

    /// Block as it appears on air
    pub fn value(self) -> u16 {
        u16::from_be_bytes(self.to_bytes())
    }
}

/// Block 2 of a group, with named accessors for the common fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Block2(pub u16);

impl Block2 {
    /// Packs the fields shared by every version A group
    pub fn new(group_type: u8, traffic_program: bool, program_type: u8) -> Self {
        Self(
            (group_type as u16 & 0x0F) << GROUP_TYPE_SHIFT
                | (traffic_program as u16) << TP_SHIFT
                | (program_type as u16 & PTY_MASK) << PTY_SHIFT,
        )
    }

    /// ORs in the five group specific bits
    fn with_group_bits(self, bits: u16) -> Self {
        Self(self.0 | (bits & 0x1F))
    }

    pub fn group_type(self) -> u8 {
        (self.0 >> GROUP_TYPE_SHIFT) as u8
    }

    pub fn version_b(self) -> bool {
        (self.0 >> VERSION_B_SHIFT) & 0x01 != 0
    }

    pub fn traffic_program(self) -> bool {
        (self.0 >> TP_SHIFT) & 0x01 != 0
    }

    pub fn program_type(self) -> u8 {
        ((self.0 >> PTY_SHIFT) & PTY_MASK) as u8
    }

    /// Program Service segment address (group 0A)
    pub fn station_name_address(self) -> u8 {
        (self.0 & PS_ADDRESS_MASK) as u8
    }

    /// Traffic announcement flag (group 0A)
    pub fn traffic_announcement(self) -> bool {
        (self.0 >> TA_SHIFT) & 0x01 != 0
    }

    /// Music/speech flag (group 0A)
    pub fn music(self) -> bool {
        (self.0 >> MS_SHIFT) & 0x01 != 0
    }

    /// Decoder identification bit (group 0A)
    pub fn decoder_id(self) -> bool {
        (self.0 >> DI_SHIFT) & 0x01 != 0
    }

    /// Radio Text segment address (group 2A)
    pub fn radio_text_address(self) -> u8 {
        (self.0 & RT_ADDRESS_MASK) as u8
    }

    /// Radio Text A/B flag (group 2A)
    pub fn text_ab(self) -> bool {
        (self.0 >> TEXT_AB_SHIFT) & 0x01 != 0
    }
}

/// A complete four-block group, ready to be staged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Group {
    pub blocks: [Block; 4],
}

impl Group {
    /// Bytes for TX_RDSD0~TX_RDSD7
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        for (chunk, block) in bytes.chunks_exact_mut(2).zip(self.blocks) {
            chunk.copy_from_slice(&block.to_bytes());
        }
        bytes
    }

    pub fn program_id(&self) -> ProgramId {
        ProgramId(self.blocks[0].value())
    }

    pub fn block2(&self) -> Block2 {
        Block2(self.blocks[1].value())
    }

    /// The four payload bytes carried by blocks 3 and 4
    pub fn payload(&self) -> [u8; 4] {
        let [a, b] = self.blocks[2].to_bytes();
        let [c, d] = self.blocks[3].to_bytes();
        [a, b, c, d]
    }
}

/// Builds the group 0A carrying characters `2 * position` and `2 * position + 1`
/// of the station name. Only the low two bits of `position` are used.
pub fn build_station_name_group(session: &RdsSession, position: u8) -> Group {
    let address = position as u16 & PS_ADDRESS_MASK;
    let block2 = Block2::new(GROUP_STATION_NAME, session.traffic_program(), session.program_type())
        .with_group_bits(
            (session.traffic_announcement() as u16) << TA_SHIFT
                | (session.music() as u16) << MS_SHIFT
                | (session.decoder_id() as u16) << DI_SHIFT
                | address,
        );

    let ps = session.station_name();
    let offset = 2 * address as usize;
    let pi = session.program_id().raw();

    Group {
        blocks: [
            Block::Code(pi),
            Block::Code(block2.0),
            Block::Code(pi),
            Block::Text([ps[offset], ps[offset + 1]]),
        ],
    }
}

/// Builds the group 2A carrying characters `4 * position .. 4 * position + 4`
/// of the radio text. Only the low four bits of `position` are used; slots
/// past the end of the text hold the padding character.
pub fn build_radio_text_group(session: &RdsSession, position: u8, text_ab: bool) -> Group {
    let address = position as u16 & RT_ADDRESS_MASK;
    let block2 = Block2::new(GROUP_RADIO_TEXT, session.traffic_program(), session.program_type())
        .with_group_bits((text_ab as u16) << TEXT_AB_SHIFT | address);

    let rt = session.radio_text_buffer();
    let offset = 4 * address as usize;

    Group {
        blocks: [
            Block::Code(session.program_id().raw()),
            Block::Code(block2.0),
            Block::Text([rt[offset], rt[offset + 1]]),
            Block::Text([rt[offset + 2], rt[offset + 3]]),
        ],
    }
}

/// Local date and time carried by group 4A
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, 1900-2099
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23, UTC
    pub hour: u8,
    /// 0-59, UTC
    pub minute: u8,
    /// Local time offset from UTC in half hours, -31..=31
    pub offset_half_hours: i8,
}

impl DateTime {
    /// Modified Julian Day of the date
    pub fn modified_julian_day(&self) -> u32 {
        let year = self.year.saturating_sub(1900) as u32;
        let month = self.month as u32;
        let leap = if month <= 2 { 1 } else { 0 };

        14956 + self.day as u32 + year.saturating_sub(leap) * 36525 / 100
            + (month + 1 + leap * 12) * 306001 / 10000
    }
}

/// Builds the group 4A carrying `datetime`
pub fn build_clock_time_group(session: &RdsSession, datetime: &DateTime) -> Group {
    let mjd = datetime.modified_julian_day();
    let hour = datetime.hour as u16 & 0x1F;
    let minute = datetime.minute as u16 & 0x3F;
    let offset = datetime.offset_half_hours.unsigned_abs() as u16 & 0x1F;
    let negative = datetime.offset_half_hours < 0;

    let block2 = Block2::new(GROUP_CLOCK_TIME, session.traffic_program(), session.program_type())
        .with_group_bits((mjd >> 15) as u16 & MJD_HIGH_MASK);
    let block3 = ((mjd as u16 & 0x7FFF) << 1) | (hour >> 4);
    let block4 = (hour & 0x0F) << 12 | minute << 6 | (negative as u16) << 5 | offset;

    Group {
        blocks: [
            Block::Code(session.program_id().raw()),
            Block::Code(block2.0),
            Block::Code(block3),
            Block::Code(block4),
        ],
    }
}
