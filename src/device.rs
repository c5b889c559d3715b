//! QN8066 Device Interface
//!
//! This module provides the bus-level interface for talking to a QN8066 over I2C.
//! It supports both synchronous and asynchronous operations.
//!
//! The interface is built around the `Device<I2C>` struct which wraps an I2C bus and
//! provides methods for:
//! - Reading and writing typed registers
//! - Reading and writing raw register bytes through [`RegisterAccess`]
//! - The handful of RDS switches that live outside the RDS encoder
//!
//! # Example
//! ```no_run
//! use qn8066::{Device, System2};
//!
//! # fn demo<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), qn8066::Error> {
//! let mut device = Device::new(i2c);
//!
//! // Read a register
//! let system2: System2 = device.read_register()?;
//!
//! // Turn the RDS subcarrier on
//! device.set_tx_rds(true)?;
//! # Ok(())
//! # }
//! ```

use core::convert::Infallible;

use regiface::{
    errors::Error as RegifaceError, ByteArray, FromByteArray, ReadableRegister, ToByteArray,
    WritableRegister,
};

use crate::registers::{IntCtrl, RdsDeviation, Status3, System2, I2C_ADDRESS, TX_RDS_DATA};

/// Byte-wide access to the register file.
///
/// This is the only thing the RDS encoder needs from the chip. [`Device`]
/// implements it over I2C; tests implement it over an in-memory register bank.
pub trait RegisterAccess {
    /// Reads the byte stored at `address`
    fn read_raw(&mut self, address: u8) -> Result<u8, RegifaceError>;

    /// Stores `value` at `address`
    fn write_raw(&mut self, address: u8, value: u8) -> Result<(), RegifaceError>;

    /// Read-modify-write of a single register
    fn modify_raw<F>(&mut self, address: u8, f: F) -> Result<(), RegifaceError>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_raw(address)?;
        self.write_raw(address, f(value))
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn read_raw(&mut self, address: u8) -> Result<u8, RegifaceError> {
        (**self).read_raw(address)
    }

    fn write_raw(&mut self, address: u8, value: u8) -> Result<(), RegifaceError> {
        (**self).write_raw(address, value)
    }
}

/// Main device interface for the QN8066.
///
/// This struct wraps an I2C bus and provides methods to interact with the chip.
/// It supports both synchronous operations through the embedded-hal traits and
/// asynchronous operations through embedded-hal-async.
pub struct Device<I2C> {
    i2c: I2C,
}

impl<I2C> Device<I2C> {
    /// Creates a new Device instance wrapping the provided I2C bus.
    ///
    /// # Arguments
    /// * `i2c` - An I2C bus implementing the required embedded-hal traits
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Releases the underlying I2C bus.
    ///
    /// This method consumes the Device instance and returns the wrapped I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Device<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Reads a register value from the device.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - I2C communication failed
    /// * `RegifaceError::DeserializationError` - Failed to parse register value
    pub fn read_register<R>(&mut self) -> Result<R, RegifaceError>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();

        self.i2c
            .write_read(I2C_ADDRESS, &[R::id()], raw_value.as_mut())
            .map_err(|_| RegifaceError::BusError)?;

        R::from_bytes(raw_value).map_err(|_| RegifaceError::DeserializationError)
    }

    /// Writes a value to a device register.
    ///
    /// # Type Parameters
    /// * `R` - Single byte register type implementing WritableRegister with u8 ID
    ///
    /// # Arguments
    /// * `register` - The register value to write
    ///
    /// # Errors
    /// * `RegifaceError::BusError` - I2C communication failed
    pub fn write_register<R>(&mut self, register: R) -> Result<(), RegifaceError>
    where
        R: WritableRegister<IdType = u8, Error = Infallible, Array = [u8; 1]>,
    {
        let [value] = match register.to_bytes() {
            Ok(bytes) => bytes,
            Err(never) => match never {},
        };

        self.i2c
            .write(I2C_ADDRESS, &[R::id(), value])
            .map_err(|_| RegifaceError::BusError)
    }

    /// Enables or disables the RDS subcarrier on transmit.
    pub fn set_tx_rds(&mut self, enabled: bool) -> Result<(), RegifaceError> {
        let mut system2: System2 = self.read_register()?;
        system2.set_tx_rds_enabled(enabled);
        self.write_register(system2)
    }

    /// Toggles `RDS_READY`, asking the chip to fetch TX_RDSD0~TX_RDSD7.
    pub fn toggle_rds_ready(&mut self) -> Result<(), RegifaceError> {
        let system2: System2 = self.read_register()?;
        self.write_register(system2.with_rds_ready_toggled())
    }

    /// Current level of the RDS transmit acknowledgment bit.
    ///
    /// The chip toggles it after fetching a staged group, so callers compare
    /// against an earlier sample rather than the absolute value.
    pub fn rds_tx_updated(&mut self) -> Result<bool, RegifaceError> {
        let status: Status3 = self.read_register()?;
        Ok(status.rds_tx_updated)
    }

    /// Writes eight raw bytes to TX_RDSD0~TX_RDSD7.
    ///
    /// The bytes are not transmitted until [`toggle_rds_ready`](Device::toggle_rds_ready)
    /// is called.
    pub fn write_rds_buffer(&mut self, data: [u8; 8]) -> Result<(), RegifaceError> {
        for (address, value) in TX_RDS_DATA.into_iter().zip(data) {
            self.write_raw(address, value)?;
        }
        Ok(())
    }

    /// Sets the RDS frequency deviation (0-127, 0.35kHz steps in normal mode).
    pub fn set_rds_frequency_deviation(&mut self, deviation: u8) -> Result<(), RegifaceError> {
        let mut rds: RdsDeviation = self.read_register()?;
        rds.deviation = deviation;
        self.write_register(rds)
    }

    /// Enables or disables the audio line-in.
    pub fn set_rds_line_in(&mut self, enabled: bool) -> Result<(), RegifaceError> {
        let mut rds: RdsDeviation = self.read_register()?;
        rds.line_in_enable = enabled;
        self.write_register(rds)
    }

    /// Enables or disables RDS 4k mode.
    pub fn set_rds_4k_mode(&mut self, enabled: bool) -> Result<(), RegifaceError> {
        let mut int_ctrl: IntCtrl = self.read_register()?;
        int_ctrl.rds_4k_mode = enabled;
        self.write_register(int_ctrl)
    }

    /// Audio peak at the ADC input in millivolts.
    pub fn audio_peak_mv(&mut self) -> Result<u16, RegifaceError> {
        let status: Status3 = self.read_register()?;
        Ok(status.audio_peak_mv())
    }
}

impl<I2C> RegisterAccess for Device<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn read_raw(&mut self, address: u8) -> Result<u8, RegifaceError> {
        let mut value = [0u8];

        self.i2c
            .write_read(I2C_ADDRESS, &[address], &mut value)
            .map_err(|_| RegifaceError::BusError)?;

        Ok(value[0])
    }

    fn write_raw(&mut self, address: u8, value: u8) -> Result<(), RegifaceError> {
        self.i2c
            .write(I2C_ADDRESS, &[address, value])
            .map_err(|_| RegifaceError::BusError)
    }
}

impl<I2C> Device<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Asynchronously reads a register value from the device.
    ///
    /// This is the async version of [`read_register`](Device::read_register).
    pub async fn read_register_async<R>(&mut self) -> Result<R, RegifaceError>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();

        self.i2c
            .write_read(I2C_ADDRESS, &[R::id()], raw_value.as_mut())
            .await
            .map_err(|_| RegifaceError::BusError)?;

        R::from_bytes(raw_value).map_err(|_| RegifaceError::DeserializationError)
    }

    /// Asynchronously writes a value to a device register.
    ///
    /// This is the async version of [`write_register`](Device::write_register).
    pub async fn write_register_async<R>(&mut self, register: R) -> Result<(), RegifaceError>
    where
        R: WritableRegister<IdType = u8, Error = Infallible, Array = [u8; 1]>,
    {
        let [value] = match register.to_bytes() {
            Ok(bytes) => bytes,
            Err(never) => match never {},
        };

        self.i2c
            .write(I2C_ADDRESS, &[R::id(), value])
            .await
            .map_err(|_| RegifaceError::BusError)
    }

    /// Asynchronously writes eight raw bytes to TX_RDSD0~TX_RDSD7.
    ///
    /// This is the async version of [`write_rds_buffer`](Device::write_rds_buffer).
    pub async fn write_rds_buffer_async(&mut self, data: [u8; 8]) -> Result<(), RegifaceError> {
        for (address, value) in TX_RDS_DATA.into_iter().zip(data) {
            self.i2c
                .write(I2C_ADDRESS, &[address, value])
                .await
                .map_err(|_| RegifaceError::BusError)?;
        }
        Ok(())
    }

    /// Asynchronously toggles `RDS_READY`.
    ///
    /// This is the async version of [`toggle_rds_ready`](Device::toggle_rds_ready).
    pub async fn toggle_rds_ready_async(&mut self) -> Result<(), RegifaceError> {
        let system2: System2 = self.read_register_async().await?;
        self.write_register_async(system2.with_rds_ready_toggled()).await
    }
}
