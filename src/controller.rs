//! MCP9808 temperature sensor controller
//!
//! [`Mcp9808`] exposes the sensor as typed operations: reading the ambient
//! temperature, managing the alert limits and their locks, and configuring the
//! alert output. Every operation is one or two register transactions on the
//! underlying [`Device`]:
//!
//! - Getters read a register and decode it
//! - Limit setters encode a temperature and write its register
//! - Configuration setters read CONFIG (or RESOLUTION), patch their own bits and
//!   write the register back
//!
//! No operation retries; the first failing transaction aborts it.

use crate::device::Device;
use crate::error::{Error, WindowBound};
use crate::registers::{
    AlertMode, AlertOutput, AlertPolarity, AmbientTemperature, ConfigFlags, Configuration,
    CriticalLimit, DeviceId, Hysteresis, LowerLimit, ManufacturerId, Resolution,
    ResolutionConfig, UpperLimit,
};
use crate::transport::BusTransport;

/// Base bus address with A2..A0 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// Bus address selected by the A2, A1 and A0 pins.
pub const fn address_from_pins(a2: bool, a1: bool, a0: bool) -> u8 {
    DEFAULT_ADDRESS | (a2 as u8) << 2 | (a1 as u8) << 1 | a0 as u8
}

/// An initialized MCP9808.
///
/// The only way to obtain one is [`Mcp9808::initialize`], so every method can
/// assume the transport is up.
///
/// # Concurrency
/// Methods take `&mut self` and block on the transport. Configuration setters
/// are read-modify-write sequences; callers sharing one sensor between
/// contexts must hold a lock around the whole call.
pub struct Mcp9808<B> {
    device: Device<B>,
}

impl<B> Mcp9808<B>
where
    B: BusTransport,
{
    /// Initializes the transport and returns a controller for the sensor at
    /// `address`.
    ///
    /// # Errors
    /// * `Error::Transport` - [`BusTransport::init`] failed
    pub fn initialize(bus: B, address: u8) -> Result<Self, Error<B::Error>> {
        let mut device = Device::new(bus, address);
        device.init()?;
        Ok(Self { device })
    }

    /// Wraps an already initialized [`Device`].
    ///
    /// # Errors
    /// * `Error::NotInitialized` - `device` has not been initialized
    pub fn from_device(device: Device<B>) -> Result<Self, Error<B::Error>> {
        if device.is_initialized() {
            Ok(Self { device })
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Current bus address.
    pub fn address(&self) -> u8 {
        self.device.address()
    }

    /// Changes the bus address used for subsequent operations.
    pub fn set_address(&mut self, address: u8) {
        self.device.set_address(address);
    }

    /// Register-level access for anything not covered here.
    pub fn device(&mut self) -> &mut Device<B> {
        &mut self.device
    }

    /// Releases the underlying transport.
    pub fn release(self) -> B {
        self.device.release()
    }

    // -----------------------------------------------------------------------
    // Temperature
    // -----------------------------------------------------------------------

    /// Reads the ambient temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<f32, Error<B::Error>> {
        Ok(self.read_ambient()?.celsius())
    }

    /// Reads the ambient temperature register, including its limit flags.
    pub fn read_ambient(&mut self) -> Result<AmbientTemperature, Error<B::Error>> {
        self.device.read_register()
    }

    /// Sets the critical limit (T<sub>CRIT</sub>), truncated to 0.25 °C.
    ///
    /// # Errors
    /// * `Error::EncodingRange` - `celsius` cannot be encoded; nothing is written
    /// * `Error::Transport` - Bus communication failed
    pub fn set_critical_temperature(&mut self, celsius: f32) -> Result<(), Error<B::Error>> {
        let limit = CriticalLimit::from_celsius(celsius).map_err(Error::EncodingRange)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("set T_CRIT {=f32}", celsius);

        self.device.write_register(limit)
    }

    /// Reads the critical limit (T<sub>CRIT</sub>).
    pub fn critical_temperature(&mut self) -> Result<f32, Error<B::Error>> {
        let limit: CriticalLimit = self.device.read_register()?;
        Ok(limit.celsius())
    }

    /// Sets the alert window (T<sub>UPPER</sub>, T<sub>LOWER</sub>).
    ///
    /// Both values are encoded before anything is written, so a range error
    /// leaves both registers untouched. The upper limit is written first.
    ///
    /// # Errors
    /// * `Error::EncodingRange` - Either value cannot be encoded
    /// * `Error::Window` - Bus error, tagged with the limit it occurred on. A
    ///   failure on [`WindowBound::Lower`] means the upper limit was already
    ///   updated.
    pub fn set_window_temperature(
        &mut self,
        upper: f32,
        lower: f32,
    ) -> Result<(), Error<B::Error>> {
        let upper_limit = UpperLimit::from_celsius(upper).map_err(Error::EncodingRange)?;
        let lower_limit = LowerLimit::from_celsius(lower).map_err(Error::EncodingRange)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("set window T_UPPER {=f32} T_LOWER {=f32}", upper, lower);

        self.device
            .write_register(upper_limit)
            .map_err(|e| e.at(WindowBound::Upper))?;
        self.device
            .write_register(lower_limit)
            .map_err(|e| e.at(WindowBound::Lower))
    }

    /// Reads the alert window as `(upper, lower)`.
    ///
    /// # Errors
    /// * `Error::Window` - Bus error, tagged with the limit it occurred on
    pub fn window_temperature(&mut self) -> Result<(f32, f32), Error<B::Error>> {
        let upper: UpperLimit = self
            .device
            .read_register()
            .map_err(|e: Error<B::Error>| e.at(WindowBound::Upper))?;
        let lower: LowerLimit = self
            .device
            .read_register()
            .map_err(|e: Error<B::Error>| e.at(WindowBound::Lower))?;

        Ok((upper.celsius(), lower.celsius()))
    }

    // -----------------------------------------------------------------------
    // Limit locks
    // -----------------------------------------------------------------------

    /// Locks T<sub>UPPER</sub> and T<sub>LOWER</sub> against writes.
    pub fn lock_window_temperature(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::WIN_LOCK, true)
    }

    pub fn unlock_window_temperature(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::WIN_LOCK, false)
    }

    /// Locks T<sub>CRIT</sub> against writes.
    pub fn lock_critical_temperature(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::CRIT_LOCK, true)
    }

    pub fn unlock_critical_temperature(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::CRIT_LOCK, false)
    }

    // -----------------------------------------------------------------------
    // Alert output
    // -----------------------------------------------------------------------

    /// Releases a latched interrupt-mode alert.
    ///
    /// The bit clears itself on the device; completion is not polled.
    pub fn clear_interrupt(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::CLEAR_IRQ, true)
    }

    /// Whether the alert output is currently asserted.
    ///
    /// # Errors
    /// * `Error::Transport` - Bus communication failed. A failed read is
    ///   never reported as "not asserted".
    pub fn is_alert_asserted(&mut self) -> Result<bool, Error<B::Error>> {
        Ok(self.configuration()?.flag(ConfigFlags::ALERT_STATUS))
    }

    pub fn enable_alert(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::ALERT_CTRL, true)
    }

    pub fn disable_alert(&mut self) -> Result<(), Error<B::Error>> {
        self.set_config_flag(ConfigFlags::ALERT_CTRL, false)
    }

    pub fn set_alert_mode(&mut self, mode: AlertMode) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_alert_mode(mode))
    }

    pub fn set_alert_polarity(&mut self, polarity: AlertPolarity) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_alert_polarity(polarity))
    }

    pub fn set_alert_output(&mut self, output: AlertOutput) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_alert_output(output))
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Reads the whole configuration register.
    pub fn configuration(&mut self) -> Result<Configuration, Error<B::Error>> {
        self.device.read_register()
    }

    pub fn hysteresis(&mut self) -> Result<Hysteresis, Error<B::Error>> {
        Ok(self.configuration()?.hysteresis())
    }

    pub fn set_hysteresis(&mut self, hysteresis: Hysteresis) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_hysteresis(hysteresis))
    }

    /// Enters low-power shutdown; conversions stop.
    pub fn shutdown(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_shutdown(true))
    }

    /// Leaves shutdown and resumes continuous conversion.
    pub fn wake(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_shutdown(false))
    }

    pub fn resolution(&mut self) -> Result<Resolution, Error<B::Error>> {
        let config: ResolutionConfig = self.device.read_register()?;
        Ok(config.resolution())
    }

    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Error<B::Error>> {
        self.device
            .modify_register(|config: &mut ResolutionConfig| config.set_resolution(resolution))
            .map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Identification
    // -----------------------------------------------------------------------

    /// Reads the device ID and silicon revision.
    pub fn device_id(&mut self) -> Result<DeviceId, Error<B::Error>> {
        self.device.read_register()
    }

    /// Reads the manufacturer ID, [`MANUFACTURER_ID`](crate::MANUFACTURER_ID)
    /// on genuine parts.
    pub fn manufacturer_id(&mut self) -> Result<u16, Error<B::Error>> {
        let id: ManufacturerId = self.device.read_register()?;
        Ok(id.id)
    }

    fn set_config_flag(&mut self, flag: ConfigFlags, on: bool) -> Result<(), Error<B::Error>> {
        self.modify_config(|config| config.set_flag(flag, on))
    }

    fn modify_config<F>(&mut self, f: F) -> Result<(), Error<B::Error>>
    where
        F: FnOnce(&mut Configuration),
    {
        self.device.modify_register(f).map(|_| ())
    }
}
