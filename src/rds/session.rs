//! RDS session state and transmit timing configuration
//!
//! [`RdsSession`] holds everything a group is assembled from (PI, PTY, flags,
//! station name, radio text) plus the transmit outcome of the last send.
//! It is owned by the caller and passed by reference into the group builders
//! and the transmitter.

use super::group::ProgramId;

/// Station name length in characters
pub const STATION_NAME_LEN: usize = 8;
/// Longest radio text addressable by the 4-bit group 2A address
pub const RADIO_TEXT_MAX_LEN: usize = 64;
/// Fills unused station name and radio text slots
pub const PAD_CHAR: u8 = b' ';

/// Caller-tunable transmit timing
///
/// Timeouts are `max_poll_iterations * poll_interval_ms` after the initial
/// `sync_delay_ms`, counted with the same delay source used everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RdsConfig {
    /// Times each full station name or radio text is sent per call
    pub repeat_group: u8,
    /// Wait after toggling `RDS_READY` before polling for the acknowledgment
    pub sync_delay_ms: u32,
    /// Acknowledgment polls before a group is declared lost
    pub max_poll_iterations: u8,
    /// Delay between acknowledgment polls
    pub poll_interval_ms: u32,
}

impl Default for RdsConfig {
    fn default() -> Self {
        Self {
            repeat_group: 3,
            sync_delay_ms: 60,
            max_poll_iterations: 10,
            poll_interval_ms: 1,
        }
    }
}

/// Session-level RDS state
#[derive(Debug, Clone)]
pub struct RdsSession {
    program_id: ProgramId,
    program_type: u8,
    traffic_program: bool,
    traffic_announcement: bool,
    music: bool,
    decoder_id: bool,
    station_name: [u8; STATION_NAME_LEN],
    radio_text: [u8; RADIO_TEXT_MAX_LEN],
    radio_text_len: usize,
    text_ab: bool,
    station_name_counter: u16,
    config: RdsConfig,
    error: bool,
    groups_sent: u32,
    groups_failed: u32,
}

impl RdsSession {
    /// Creates a session broadcasting as `program_id`, PTY 0, music, with a
    /// blank station name and empty radio text.
    pub fn new(program_id: ProgramId) -> Self {
        Self::with_config(program_id, RdsConfig::default())
    }

    pub fn with_config(program_id: ProgramId, config: RdsConfig) -> Self {
        Self {
            program_id,
            program_type: 0,
            traffic_program: false,
            traffic_announcement: false,
            music: true,
            decoder_id: false,
            station_name: [PAD_CHAR; STATION_NAME_LEN],
            radio_text: [PAD_CHAR; RADIO_TEXT_MAX_LEN],
            radio_text_len: 0,
            text_ab: false,
            station_name_counter: 0,
            config,
            error: false,
            groups_sent: 0,
            groups_failed: 0,
        }
    }

    pub fn program_id(&self) -> ProgramId {
        self.program_id
    }

    pub fn set_program_id(&mut self, program_id: ProgramId) {
        self.program_id = program_id;
    }

    pub fn program_type(&self) -> u8 {
        self.program_type
    }

    /// Sets the program type (0-31). Takes effect on the next group sent.
    pub fn set_program_type(&mut self, program_type: u8) {
        self.program_type = program_type & 0x1F;
    }

    pub fn traffic_program(&self) -> bool {
        self.traffic_program
    }

    pub fn set_traffic_program(&mut self, value: bool) {
        self.traffic_program = value;
    }

    pub fn traffic_announcement(&self) -> bool {
        self.traffic_announcement
    }

    pub fn set_traffic_announcement(&mut self, value: bool) {
        self.traffic_announcement = value;
    }

    /// Music (true) or speech (false)
    pub fn music(&self) -> bool {
        self.music
    }

    pub fn set_music(&mut self, value: bool) {
        self.music = value;
    }

    pub fn decoder_id(&self) -> bool {
        self.decoder_id
    }

    pub fn set_decoder_id(&mut self, value: bool) {
        self.decoder_id = value;
    }

    /// Station name, padded to 8 characters
    pub fn station_name(&self) -> &[u8; STATION_NAME_LEN] {
        &self.station_name
    }

    /// Stores `name`, truncated or padded to 8 characters.
    pub fn set_station_name(&mut self, name: &str) {
        self.station_name = [PAD_CHAR; STATION_NAME_LEN];
        for (slot, byte) in self.station_name.iter_mut().zip(name.bytes()) {
            *slot = byte;
        }
    }

    /// Current radio text without padding
    pub fn radio_text(&self) -> &[u8] {
        &self.radio_text[..self.radio_text_len]
    }

    /// The full 64 character buffer, padded past the text
    pub fn radio_text_buffer(&self) -> &[u8; RADIO_TEXT_MAX_LEN] {
        &self.radio_text
    }

    /// Stores `text`, truncated to 64 characters.
    ///
    /// Does not flip the A/B flag; the flag changes once per transmitted text.
    pub fn set_radio_text(&mut self, text: &str) {
        self.radio_text = [PAD_CHAR; RADIO_TEXT_MAX_LEN];
        self.radio_text_len = 0;
        for (slot, byte) in self.radio_text.iter_mut().zip(text.bytes()) {
            *slot = byte;
            self.radio_text_len += 1;
        }
    }

    /// Number of group 2A needed for the current radio text
    pub fn radio_text_groups(&self) -> u8 {
        self.radio_text_len.div_ceil(4) as u8
    }

    pub fn text_ab(&self) -> bool {
        self.text_ab
    }

    pub(crate) fn toggle_text_ab(&mut self) -> bool {
        self.text_ab = !self.text_ab;
        self.text_ab
    }

    /// Raw count of station name groups sent this session.
    ///
    /// Never reset; the transmitted address is its low two bits.
    pub fn station_name_counter(&self) -> u16 {
        self.station_name_counter
    }

    pub(crate) fn next_station_name_address(&mut self) -> u8 {
        let address = (self.station_name_counter & 0x03) as u8;
        self.station_name_counter = self.station_name_counter.wrapping_add(1);
        address
    }

    pub fn config(&self) -> &RdsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RdsConfig {
        &mut self.config
    }

    pub fn set_repeat_group(&mut self, repeat: u8) {
        self.config.repeat_group = repeat;
    }

    pub fn set_sync_delay_ms(&mut self, delay_ms: u32) {
        self.config.sync_delay_ms = delay_ms;
    }

    pub fn set_max_poll_iterations(&mut self, iterations: u8) {
        self.config.max_poll_iterations = iterations;
    }

    pub fn set_poll_interval_ms(&mut self, interval_ms: u32) {
        self.config.poll_interval_ms = interval_ms;
    }

    /// True if any group of the last send was not acknowledged
    pub fn error(&self) -> bool {
        self.error
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = false;
    }

    pub(crate) fn record_acked(&mut self) {
        self.groups_sent = self.groups_sent.saturating_add(1);
    }

    pub(crate) fn record_timeout(&mut self) {
        self.error = true;
        self.groups_sent = self.groups_sent.saturating_add(1);
        self.groups_failed = self.groups_failed.saturating_add(1);
    }

    /// Groups staged this session, acknowledged or not
    pub fn groups_sent(&self) -> u32 {
        self.groups_sent
    }

    /// Groups that timed out waiting for the acknowledgment this session
    pub fn groups_failed(&self) -> u32 {
        self.groups_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_name_is_padded_and_truncated() {
        let mut session = RdsSession::new(ProgramId::new(0));
        session.set_station_name("FM");
        assert_eq!(session.station_name(), b"FM      ");

        session.set_station_name("LONGSTATIONNAME");
        assert_eq!(session.station_name(), b"LONGSTAT");
    }

    #[test]
    fn radio_text_is_truncated_to_addressable_range() {
        let mut session = RdsSession::new(ProgramId::new(0));
        let long = "0123456789".repeat(8);
        session.set_radio_text(&long);
        assert_eq!(session.radio_text().len(), RADIO_TEXT_MAX_LEN);
        assert_eq!(session.radio_text_groups(), 16);

        session.set_radio_text("HELLO");
        assert_eq!(session.radio_text(), b"HELLO");
        assert_eq!(&session.radio_text_buffer()[..8], b"HELLO   ");
        assert_eq!(session.radio_text_groups(), 2);

        session.set_radio_text("");
        assert_eq!(session.radio_text_groups(), 0);
    }

    #[test]
    fn program_type_is_masked() {
        let mut session = RdsSession::new(ProgramId::new(0));
        session.set_program_type(33);
        assert_eq!(session.program_type(), 1);
    }

    #[test]
    fn station_name_address_wraps_without_resetting_counter() {
        let mut session = RdsSession::new(ProgramId::new(0));
        let addresses: [u8; 6] = core::array::from_fn(|_| session.next_station_name_address());
        assert_eq!(addresses, [0, 1, 2, 3, 0, 1]);
        assert_eq!(session.station_name_counter(), 6);
    }

    #[test]
    fn default_timing() {
        let config = RdsConfig::default();
        assert_eq!(config.sync_delay_ms, 60);
        assert_eq!(config.max_poll_iterations, 10);
        assert_eq!(config.poll_interval_ms, 1);
    }
}
