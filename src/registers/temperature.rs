//! Temperature registers
//!
//! The ambient temperature register (T<sub>A</sub>) and the three alert limit
//! registers (T<sub>UPPER</sub>, T<sub>LOWER</sub>, T<sub>CRIT</sub>) share
//! the 13-bit format handled by [`codec`](crate::codec). The limit registers
//! only hold 0.25 °C steps; T<sub>A</sub> resolution depends on the
//! [`Resolution`](super::Resolution) register.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::codec;
use crate::error::EncodingRangeError;

bitflags! {
    /// Comparison flags latched in the upper bits of T<sub>A</sub>
    ///
    /// Updated by the sensor on every conversion, independent of the alert
    /// output configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TemperatureFlags: u8 {
        /// T<sub>A</sub> ≥ T<sub>CRIT</sub>
        const CRITICAL = 0x80;
        /// T<sub>A</sub> > T<sub>UPPER</sub>
        const ABOVE_UPPER = 0x40;
        /// T<sub>A</sub> < T<sub>LOWER</sub>
        const BELOW_LOWER = 0x20;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TemperatureFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TemperatureFlags({=u8:#04x})", self.bits())
    }
}

/// Ambient temperature register (address: 0x05)
///
/// Read-only. Holds the result of the latest conversion plus the window
/// comparison flags.
#[register(0x05u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AmbientTemperature {
    /// Raw register bytes, MSB first
    pub raw: [u8; 2],
}

impl AmbientTemperature {
    /// Temperature in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        codec::decode(self.raw)
    }

    /// Window comparison flags of the same conversion.
    pub fn flags(&self) -> TemperatureFlags {
        TemperatureFlags::from_bits_truncate(self.raw[0])
    }
}

impl FromByteArray for AmbientTemperature {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { raw: bytes })
    }
}

/// Alert temperature upper boundary register (address: 0x02)
///
/// # Important Notes
/// - Writes are ignored by the sensor while the window lock bit is set
#[register(0x02u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpperLimit {
    pub raw: [u8; 2],
}

/// Alert temperature lower boundary register (address: 0x03)
///
/// # Important Notes
/// - Writes are ignored by the sensor while the window lock bit is set
#[register(0x03u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowerLimit {
    pub raw: [u8; 2],
}

/// Critical temperature register (address: 0x04)
///
/// # Important Notes
/// - Writes are ignored by the sensor while the critical lock bit is set
/// - In [`AlertMode::CriticalOnly`](super::AlertMode::CriticalOnly) this is
///   the only limit driving the alert output
#[register(0x04u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CriticalLimit {
    pub raw: [u8; 2],
}

/// Shared conversions and byte array impls for the limit registers.
macro_rules! limit_register {
    ($name:ident) => {
        impl $name {
            /// Encodes `celsius`, truncated to 0.25 °C.
            ///
            /// # Errors
            /// [`EncodingRangeError`] if `celsius` is not finite or `|celsius| >= 256`.
            pub fn from_celsius(celsius: f32) -> Result<Self, EncodingRangeError> {
                codec::encode(celsius).map(|raw| Self { raw })
            }

            /// Limit in degrees Celsius.
            pub fn celsius(&self) -> f32 {
                codec::decode(self.raw)
            }
        }

        impl FromByteArray for $name {
            type Error = Infallible;
            type Array = [u8; 2];

            fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                Ok(Self { raw: bytes })
            }
        }

        impl ToByteArray for $name {
            type Error = Infallible;
            type Array = [u8; 2];

            fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                Ok(self.raw)
            }
        }
    };
}

limit_register!(UpperLimit);
limit_register!(LowerLimit);
limit_register!(CriticalLimit);
