//! Identification registers

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister};

/// Manufacturer ID reported by every MCP9808.
pub const MANUFACTURER_ID: u16 = 0x0054;

/// Device ID byte reported by the MCP9808.
pub const DEVICE_ID: u8 = 0x04;

/// Manufacturer ID register (address: 0x06)
///
/// Read-only. Reads [`MANUFACTURER_ID`] on genuine parts; the driver does not
/// enforce it.
#[register(0x06u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ManufacturerId {
    pub id: u16,
}

/// Device ID and revision register (address: 0x07)
///
/// Read-only. Both bytes are passed through as read.
#[register(0x07u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId {
    /// Device ID (upper byte)
    pub id: u8,
    /// Silicon revision (lower byte)
    pub revision: u8,
}

impl FromByteArray for ManufacturerId {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            id: u16::from_be_bytes(bytes),
        })
    }
}

impl FromByteArray for DeviceId {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            id: bytes[0],
            revision: bytes[1],
        })
    }
}
