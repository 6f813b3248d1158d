//! Configuration register
//!
//! This module contains the sensor configuration register (CONFIG, 0x01) and
//! the typed values of its fields:
//! - Limit register locks
//! - Alert output control, mode, polarity and output type
//! - Interrupt clear and alert status
//! - Limit hysteresis and shutdown (MSB)
//!
//! Several independent settings share this register, so every setter patches
//! only its own bits and leaves the rest as they were read from the device.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::codec::{patch_bits, patch_field};

bitflags! {
    /// Configuration flags (CONFIG LSB)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConfigFlags: u8 {
        /// T<sub>CRIT</sub> lock. Once set it can only be cleared by a
        /// power-on reset on the real part.
        const CRIT_LOCK = 0x80;
        /// T<sub>UPPER</sub>/T<sub>LOWER</sub> window lock
        const WIN_LOCK = 0x40;
        /// Clear interrupt output. Self-clearing, always reads as 0.
        const CLEAR_IRQ = 0x20;
        /// Alert output asserted (read-only)
        const ALERT_STATUS = 0x10;
        /// Alert output enabled
        const ALERT_CTRL = 0x08;
        /// Alert only on T<sub>A</sub> > T<sub>CRIT</sub>
        const ALERT_MODE = 0x04;
        /// Alert output active-high
        const ALERT_POL = 0x02;
        /// Alert output in interrupt mode
        const ALERT_OUTPUT = 0x01;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ConfigFlags({=u8:#04x})", self.bits())
    }
}

/// T<sub>UPPER</sub>/T<sub>LOWER</sub> limit hysteresis (CONFIG MSB bits 2:1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hysteresis {
    /// 0 °C (power-up default)
    #[default]
    Zero = 0b00 << 1,
    /// +1.5 °C
    OnePointFive = 0b01 << 1,
    /// +3.0 °C
    Three = 0b10 << 1,
    /// +6.0 °C
    Six = 0b11 << 1,
}

impl Hysteresis {
    /// Mask of the hysteresis field within the CONFIG MSB.
    pub const MASK: u8 = 0b11 << 1;

    /// Decodes the hysteresis field of a CONFIG MSB. Other bits are ignored.
    pub fn from_msb(msb: u8) -> Self {
        match (msb & Self::MASK) >> 1 {
            0b00 => Self::Zero,
            0b01 => Self::OnePointFive,
            0b10 => Self::Three,
            _ => Self::Six,
        }
    }

    /// Hysteresis band in degrees Celsius.
    pub fn celsius(self) -> f32 {
        match self {
            Self::Zero => 0.0,
            Self::OnePointFive => 1.5,
            Self::Three => 3.0,
            Self::Six => 6.0,
        }
    }
}

/// Alert output select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertMode {
    /// Alert on T<sub>UPPER</sub>, T<sub>LOWER</sub> and T<sub>CRIT</sub>
    /// (power-up default)
    #[default]
    All = 0x00,
    /// Alert on T<sub>A</sub> > T<sub>CRIT</sub> only
    CriticalOnly = 0x04,
}

/// Alert output polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertPolarity {
    /// Active-low, pull-up required (power-up default)
    #[default]
    ActiveLow = 0x00,
    /// Active-high
    ActiveHigh = 0x02,
}

/// Alert output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertOutput {
    /// Comparator output (power-up default)
    #[default]
    Comparator = 0x00,
    /// Interrupt output, released by [`ConfigFlags::CLEAR_IRQ`]
    Interrupt = 0x01,
}

/// Sensor configuration register (address: 0x01)
///
/// # Important Notes
/// - Alert settings cannot be changed while either lock bit is set
/// - Hysteresis cannot be changed while either lock bit is set
/// - Shutdown stops conversions; T<sub>A</sub> keeps its last value
#[register(0x01u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Upper byte: hysteresis (bits 2:1), shutdown (bit 0), rest reserved
    pub msb: u8,
    /// Lower byte flags. Unknown bits are retained.
    pub flags: ConfigFlags,
}

impl Configuration {
    /// Shutdown bit of the MSB.
    pub const SHUTDOWN: u8 = 0x01;

    /// Sets or clears a single flag (or group of flags).
    pub fn set_flag(&mut self, flag: ConfigFlags, on: bool) {
        let lsb = patch_bits(self.flags.bits(), flag.bits(), on);
        self.flags = ConfigFlags::from_bits_retain(lsb);
    }

    /// Whether all bits of `flag` are set.
    pub fn flag(&self, flag: ConfigFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn hysteresis(&self) -> Hysteresis {
        Hysteresis::from_msb(self.msb)
    }

    pub fn set_hysteresis(&mut self, hysteresis: Hysteresis) {
        self.msb = patch_field(self.msb, Hysteresis::MASK, hysteresis as u8);
    }

    pub fn alert_mode(&self) -> AlertMode {
        if self.flag(ConfigFlags::ALERT_MODE) {
            AlertMode::CriticalOnly
        } else {
            AlertMode::All
        }
    }

    pub fn set_alert_mode(&mut self, mode: AlertMode) {
        self.patch_lsb(ConfigFlags::ALERT_MODE, mode as u8);
    }

    pub fn alert_polarity(&self) -> AlertPolarity {
        if self.flag(ConfigFlags::ALERT_POL) {
            AlertPolarity::ActiveHigh
        } else {
            AlertPolarity::ActiveLow
        }
    }

    pub fn set_alert_polarity(&mut self, polarity: AlertPolarity) {
        self.patch_lsb(ConfigFlags::ALERT_POL, polarity as u8);
    }

    pub fn alert_output(&self) -> AlertOutput {
        if self.flag(ConfigFlags::ALERT_OUTPUT) {
            AlertOutput::Interrupt
        } else {
            AlertOutput::Comparator
        }
    }

    pub fn set_alert_output(&mut self, output: AlertOutput) {
        self.patch_lsb(ConfigFlags::ALERT_OUTPUT, output as u8);
    }

    pub fn is_shutdown(&self) -> bool {
        self.msb & Self::SHUTDOWN != 0
    }

    pub fn set_shutdown(&mut self, shutdown: bool) {
        self.msb = patch_bits(self.msb, Self::SHUTDOWN, shutdown);
    }

    fn patch_lsb(&mut self, field: ConfigFlags, value: u8) {
        let lsb = patch_field(self.flags.bits(), field.bits(), value);
        self.flags = ConfigFlags::from_bits_retain(lsb);
    }
}

impl FromByteArray for Configuration {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            msb: bytes[0],
            flags: ConfigFlags::from_bits_retain(bytes[1]),
        })
    }
}

impl ToByteArray for Configuration {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.msb, self.flags.bits()])
    }
}
