//! MCP9808 Device Interface
//!
//! This module provides the register-level interface to an MCP9808 sitting
//! behind a [`BusTransport`].
//!
//! The [`Device<B>`] struct owns the transport together with the identity of the
//! sensor on the bus (its address and whether the bus has been initialized) and
//! provides methods for:
//! - Initializing the transport, exactly once
//! - Reading and writing typed registers
//! - Read-modify-write of registers shared by several settings
//!
//! Most users want the typed operations of [`Mcp9808`](crate::Mcp9808), which
//! can only be obtained from an initialized device.
//!
//! # Example
//! ```no_run
//! use mcp9808::{Configuration, ConfigFlags, Device, BusTransport, Error, DEFAULT_ADDRESS};
//!
//! fn enable_alert<B: BusTransport>(bus: B) -> Result<Device<B>, Error<B::Error>> {
//!     let mut device = Device::new(bus, DEFAULT_ADDRESS);
//!     device.init()?;
//!
//!     device.modify_register(|config: &mut Configuration| {
//!         config.set_flag(ConfigFlags::ALERT_CTRL, true)
//!     })?;
//!
//!     Ok(device)
//! }
//! ```

use core::convert::Infallible;

use regiface::{ByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::error::Error;
use crate::transport::BusTransport;

/// Register-level interface to one MCP9808.
///
/// Register access is rejected with [`Error::NotInitialized`] until
/// [`init`](Device::init) has succeeded.
///
/// # Concurrency
/// All access goes through `&mut self` and performs blocking bus transactions.
/// To use one device from several threads or interrupt handlers, wrap it in a
/// mutex that is held for the whole operation; a read-modify-write interleaved
/// with another one loses an update.
pub struct Device<B> {
    bus: B,
    address: u8,
    initialized: bool,
}

impl<B> Device<B> {
    /// Creates an uninitialized Device for the sensor at `address`.
    ///
    /// # Arguments
    /// * `bus` - Transport the sensor is connected to
    /// * `address` - 7-bit bus address, see [`address_from_pins`](crate::address_from_pins)
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            initialized: false,
        }
    }

    /// Current bus address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Points the driver at another bus address.
    ///
    /// Takes effect on the next register access; no re-initialization happens.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Whether [`init`](Device::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Releases the underlying transport.
    ///
    /// This method consumes the Device instance and returns the wrapped transport.
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> Device<B>
where
    B: BusTransport,
{
    /// Initializes the transport.
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - `init` already succeeded on this device
    /// * `Error::Transport` - The transport failed to come up; the device stays
    ///   uninitialized and `init` may be retried
    pub fn init(&mut self) -> Result<(), Error<B::Error>> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }

        self.bus.init()?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("mcp9808 initialized at {=u8:#04x}", self.address);

        Ok(())
    }

    /// Reads a register value from the device.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    ///
    /// # Errors
    /// * `Error::NotInitialized` - The device has not been initialized
    /// * `Error::Transport` - Bus communication failed
    pub fn read_register<R>(&mut self) -> Result<R, Error<B::Error>>
    where
        R: ReadableRegister<IdType = u8, Error = Infallible>,
    {
        self.ensure_initialized()?;

        let mut raw_value = R::Array::new();
        self.bus
            .read_register(self.address, R::id(), raw_value.as_mut())?;

        #[cfg(feature = "defmt")]
        defmt::trace!("read reg {=u8:#04x}", R::id());

        Ok(R::from_bytes(raw_value).unwrap_or_else(|never| match never {}))
    }

    /// Writes a value to a device register.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing WritableRegister with u8 ID
    ///
    /// # Arguments
    /// * `register` - The register value to write
    ///
    /// # Errors
    /// * `Error::NotInitialized` - The device has not been initialized
    /// * `Error::Transport` - Bus communication failed
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error<B::Error>>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        self.ensure_initialized()?;

        let raw_value = register.to_bytes().unwrap_or_else(|never| match never {});

        #[cfg(feature = "defmt")]
        defmt::trace!("write reg {=u8:#04x}: {=[u8]}", R::id(), raw_value.as_ref());

        self.bus
            .write_register(self.address, R::id(), raw_value.as_ref())?;
        Ok(())
    }

    /// Reads a register, applies `f` and writes the result back.
    ///
    /// Bits that `f` does not change are written back exactly as read. If the
    /// read fails nothing is written.
    ///
    /// # Errors
    /// Any error of [`read_register`](Device::read_register) or
    /// [`write_register`](Device::write_register).
    pub fn modify_register<R, F>(&mut self, f: F) -> Result<R, Error<B::Error>>
    where
        R: ReadableRegister<IdType = u8, Error = Infallible>
            + WritableRegister<IdType = u8, Error = Infallible>
            + Copy,
        F: FnOnce(&mut R),
    {
        let mut register: R = self.read_register()?;
        f(&mut register);
        self.write_register(register)?;
        Ok(register)
    }

    fn ensure_initialized(&self) -> Result<(), Error<B::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}
