#![no_std]
//! MCP9808 Temperature Sensor Driver
//!
//! This crate provides a type-safe interface for the Microchip MCP9808 digital
//! temperature sensor. The MCP9808 is a ±0.5 °C (max) accurate sensor with a
//! programmable alert output, accessed through a set of pointer-addressed
//! registers over I2C.
//!
//! # Features
//! - Temperature range: -40 to +125 °C (accuracy specified), -256 to +256 °C (register format)
//! - User-selectable resolution: 0.5, 0.25, 0.125 or 0.0625 °C
//! - Alert output:
//!   - Window (T<sub>UPPER</sub>/T<sub>LOWER</sub>) and critical (T<sub>CRIT</sub>) limits
//!   - Comparator or interrupt mode, selectable polarity
//!   - Limit hysteresis of 0, 1.5, 3 or 6 °C
//!   - Lockable limit registers
//! - Low-power shutdown mode
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`codec`]: Conversion between the sensor's 13-bit register format and `f32`
//!   - Decoding of ambient and limit registers
//!   - Range-checked encoding of limits
//!   - Bit patching helpers used for every configuration change
//!
//! - [`registers`]: Typed register definitions for direct hardware access
//!   - Temperature and limit registers
//!   - Configuration register and its fields
//!   - Resolution and identification registers
//!
//! - [`transport`]: The [`BusTransport`] interface and its I2C adapter
//!
//! - [`device`]: Register-level access to one sensor
//!   - Owns the transport and the sensor's bus address
//!   - Rejects register access until initialized
//!
//! - [`controller`]: The [`Mcp9808`] high-level API
//!
//! # Usage
//! The driver uses the `regiface` crate to describe every register as a type.
//! The main entry point is [`Mcp9808::initialize`], which brings up the
//! transport and returns a controller for one sensor address.
//!
//! # Important Notes
//! - Limit registers only hold 0.25 °C steps; setters truncate toward zero
//! - Writes to locked limit registers are silently ignored by the sensor
//! - Once T<sub>CRIT</sub> is locked only a power cycle unlocks it on real parts
//! - Configuration changes are read-modify-write and not atomic across callers
//!
//! # Logging
//! With the `defmt` feature enabled, public types implement `defmt::Format`
//! and bus transactions are traced.
//!
//! # Example
//! ```no_run
//! use embedded_hal::i2c::I2c;
//! use mcp9808::{AlertOutput, Error, I2cBus, Mcp9808, DEFAULT_ADDRESS};
//!
//! fn configure_sensor<I2C: I2c>(i2c: I2C) -> Result<f32, Error<I2C::Error>> {
//!     let mut sensor = Mcp9808::initialize(I2cBus::new(i2c), DEFAULT_ADDRESS)?;
//!
//!     sensor.set_window_temperature(30.0, 10.0)?;
//!     sensor.set_critical_temperature(45.0)?;
//!     sensor.set_alert_output(AlertOutput::Comparator)?;
//!     sensor.enable_alert()?;
//!
//!     sensor.read_temperature()
//! }
//! ```

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod codec;
pub mod controller;
pub mod device;
pub mod error;
pub mod registers;
pub mod transport;

pub use controller::{address_from_pins, Mcp9808, DEFAULT_ADDRESS};
pub use device::Device;
pub use error::{EncodingRangeError, Error, WindowBound};
pub use registers::*;
pub use transport::{BusTransport, I2cBus};
