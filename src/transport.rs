//! Bus transport
//!
//! The driver talks to the sensor through [`BusTransport`], a byte-level
//! "read/write N bytes at register R of device A" interface. [`I2cBus`] adapts
//! any blocking `embedded-hal` I2C implementation; other transports (bit-banged
//! buses, bridges, test doubles) can implement the trait directly.

use embedded_hal::i2c::{I2c, Operation};

/// Register-addressed bus used by [`Device`](crate::Device).
///
/// Implementations are expected to be blocking. Timeouts, retries and bus
/// arbitration are the transport's concern.
pub trait BusTransport {
    /// Transport specific error, surfaced as [`Error::Transport`](crate::Error::Transport).
    type Error;

    /// Brings the bus up. Called exactly once, by [`Device::init`](crate::Device::init).
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Reads `buffer.len()` bytes starting at `register` of the device at `address`.
    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Writes `data` starting at `register` of the device at `address`.
    fn write_register(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// [`BusTransport`] over a blocking `embedded-hal` I2C bus.
///
/// The bus is expected to be configured by the HAL, so [`BusTransport::init`]
/// does nothing.
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C> {
    /// Wraps an I2C bus (or a shared-bus device handle).
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> BusTransport for I2cBus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Sets the register pointer, then reads with a repeated start.
    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buffer)
    }

    /// Pointer and data go out as one write frame; adjacent write operations
    /// of a transaction are merged on the wire.
    fn write_register(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.transaction(
            address,
            &mut [Operation::Write(&[register]), Operation::Write(data)],
        )
    }
}
