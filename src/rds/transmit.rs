//! RDS group transmission
//!
//! Pushes assembled groups into the chip using the RDSRDY/RDS_TXUPD handshake:
//!
//! 1. Sample `RDS_TXUPD` (STATUS3)
//! 2. Stage the eight group bytes in TX_RDSD0~TX_RDSD7
//! 3. Toggle `RDS_READY` (SYSTEM2)
//! 4. Wait `sync_delay_ms`
//! 5. Poll `RDS_TXUPD` up to `max_poll_iterations` times, `poll_interval_ms` apart,
//!    until it differs from the first sample
//!
//! Both bits are edge-triggered: only a change relative to the previous
//! sample means anything. A group that is never acknowledged sets the session
//! error flag; it is not reported through `Result`, which is reserved for bus
//! failures.
//!
//! All calls block until every scheduled group has been handed over or has
//! timed out. The bus must not be shared with anything else writing the RDS
//! staging registers while a send is in progress.

use embedded_hal::delay::DelayNs;
use regiface::{errors::Error as RegifaceError, FromByteArray};

use super::group::{
    build_clock_time_group, build_radio_text_group, build_station_name_group, DateTime, Group,
};
use super::session::RdsSession;
use crate::device::RegisterAccess;
use crate::registers::{Status3, System2Flags, STATUS3, SYSTEM2, TX_RDS_DATA};

/// Handshake progress of the most recent group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// Nothing sent yet
    #[default]
    Idle,
    /// Bytes written to TX_RDSD0~TX_RDSD7, ready bit not yet toggled
    Staged,
    /// Ready bit toggled, waiting for `RDS_TXUPD` to change
    AwaitingAck,
    /// The chip fetched the group
    Acked,
    /// `RDS_TXUPD` did not change within the poll bound
    TimedOut,
}

/// Drives the RDS handshake over a [`RegisterAccess`] bus and a delay source.
pub struct RdsTransmitter<R, D> {
    bus: R,
    delay: D,
    state: TxState,
}

impl<R, D> RdsTransmitter<R, D> {
    pub fn new(bus: R, delay: D) -> Self {
        Self {
            bus,
            delay,
            state: TxState::Idle,
        }
    }

    /// Handshake state reached by the last group
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Releases the bus and delay source.
    pub fn release(self) -> (R, D) {
        (self.bus, self.delay)
    }
}

impl<R, D> RdsTransmitter<R, D>
where
    R: RegisterAccess,
    D: DelayNs,
{
    /// Sends a single group.
    ///
    /// Clears the session error flag first, so afterwards
    /// [`RdsSession::error`] reports this group only.
    pub fn send_group(
        &mut self,
        session: &mut RdsSession,
        group: &Group,
    ) -> Result<TxState, RegifaceError> {
        session.clear_error();
        self.transmit(session, group)
    }

    /// Stores `name` as the station name and sends it as four group 0A,
    /// `repeat_group` times over.
    ///
    /// The segment address keeps advancing across repeats; it is never reset
    /// between calls either.
    pub fn send_station_name(
        &mut self,
        session: &mut RdsSession,
        name: &str,
    ) -> Result<(), RegifaceError> {
        session.set_station_name(name);
        session.clear_error();

        for _ in 0..session.config().repeat_group {
            for _ in 0..4 {
                let address = session.next_station_name_address();
                let group = build_station_name_group(session, address);
                self.transmit(session, &group)?;
            }
        }
        Ok(())
    }

    /// Stores `text` as the radio text and sends it as `ceil(len / 4)` group 2A,
    /// `repeat_group` times over.
    ///
    /// The A/B flag flips once per call and is shared by every group of the call.
    pub fn send_radio_text(
        &mut self,
        session: &mut RdsSession,
        text: &str,
    ) -> Result<(), RegifaceError> {
        session.set_radio_text(text);
        session.clear_error();

        let text_ab = session.toggle_text_ab();
        let groups = session.radio_text_groups();

        for _ in 0..session.config().repeat_group {
            for position in 0..groups {
                let group = build_radio_text_group(session, position, text_ab);
                self.transmit(session, &group)?;
            }
        }
        Ok(())
    }

    /// Sends `datetime` as group 4A, `repeat_group` times.
    pub fn send_date_time(
        &mut self,
        session: &mut RdsSession,
        datetime: &DateTime,
    ) -> Result<(), RegifaceError> {
        session.clear_error();

        let group = build_clock_time_group(session, datetime);
        for _ in 0..session.config().repeat_group {
            self.transmit(session, &group)?;
        }
        Ok(())
    }

    fn transmit(
        &mut self,
        session: &mut RdsSession,
        group: &Group,
    ) -> Result<TxState, RegifaceError> {
        self.state = TxState::Idle;
        let ack_before = self.read_ack()?;

        for (address, value) in TX_RDS_DATA.into_iter().zip(group.to_bytes()) {
            self.bus.write_raw(address, value)?;
        }
        self.state = TxState::Staged;

        self.bus.modify_raw(SYSTEM2, |raw| raw ^ System2Flags::RDS_READY.bits())?;
        self.state = TxState::AwaitingAck;

        let config = *session.config();
        self.delay.delay_ms(config.sync_delay_ms);

        for _ in 0..config.max_poll_iterations {
            if self.read_ack()? != ack_before {
                self.state = TxState::Acked;
                session.record_acked();
                #[cfg(feature = "defmt")]
                defmt::trace!("rds group {=u8} acked", group.block2().group_type());
                return Ok(self.state);
            }
            self.delay.delay_ms(config.poll_interval_ms);
        }

        self.state = TxState::TimedOut;
        session.record_timeout();
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "rds group {=u8} not acknowledged after {=u8} polls",
            group.block2().group_type(),
            config.max_poll_iterations
        );
        Ok(self.state)
    }

    fn read_ack(&mut self) -> Result<bool, RegifaceError> {
        let raw = self.bus.read_raw(STATUS3)?;
        let status = match Status3::from_bytes([raw]) {
            Ok(status) => status,
            Err(never) => match never {},
        };
        Ok(status.rds_tx_updated)
    }
}
