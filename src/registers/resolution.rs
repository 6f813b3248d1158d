//! Resolution register
//!
//! A single byte register selecting the conversion resolution of T<sub>A</sub>.
//! Higher resolutions take longer per conversion.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::codec::patch_field;

/// T<sub>A</sub> conversion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5 °C, t<sub>CONV</sub> = 30 ms typical
    Half = 0b00,
    /// 0.25 °C, t<sub>CONV</sub> = 65 ms typical
    Quarter = 0b01,
    /// 0.125 °C, t<sub>CONV</sub> = 130 ms typical
    Eighth = 0b10,
    /// 0.0625 °C, t<sub>CONV</sub> = 250 ms typical (power-up default)
    #[default]
    Sixteenth = 0b11,
}

impl Resolution {
    /// Mask of the resolution field.
    pub const MASK: u8 = 0b11;

    /// Decodes the resolution field. Other bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0b00 => Self::Half,
            0b01 => Self::Quarter,
            0b10 => Self::Eighth,
            _ => Self::Sixteenth,
        }
    }

    /// Temperature step in degrees Celsius.
    pub fn step_celsius(self) -> f32 {
        match self {
            Self::Half => 0.5,
            Self::Quarter => 0.25,
            Self::Eighth => 0.125,
            Self::Sixteenth => 0.0625,
        }
    }

    /// Typical conversion time in milliseconds.
    pub fn conversion_time_ms(self) -> u32 {
        match self {
            Self::Half => 30,
            Self::Quarter => 65,
            Self::Eighth => 130,
            Self::Sixteenth => 250,
        }
    }
}

/// Resolution register (address: 0x08)
///
/// Only bits 1:0 are defined; the remaining bits are kept as read.
#[register(0x08u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResolutionConfig {
    pub raw: u8,
}

impl ResolutionConfig {
    pub fn resolution(&self) -> Resolution {
        Resolution::from_bits(self.raw)
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.raw = patch_field(self.raw, Resolution::MASK, resolution as u8);
    }
}

impl FromByteArray for ResolutionConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { raw: bytes[0] })
    }
}

impl ToByteArray for ResolutionConfig {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.raw])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_resolution_keeps_reserved_bits() {
        let mut config = ResolutionConfig::from_bytes([0xF3]).unwrap();
        assert_eq!(config.resolution(), Resolution::Sixteenth);
        config.set_resolution(Resolution::Quarter);
        assert_eq!(config.to_bytes().unwrap(), [0xF1]);
        assert_eq!(config.resolution().step_celsius(), 0.25);
    }

    #[test]
    fn decodes_every_value() {
        assert_eq!(Resolution::from_bits(0x00), Resolution::Half);
        assert_eq!(Resolution::from_bits(0x05), Resolution::Quarter);
        assert_eq!(Resolution::from_bits(0x0A), Resolution::Eighth);
        assert_eq!(Resolution::Eighth.conversion_time_ms(), 130);
    }
}
