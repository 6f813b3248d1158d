//! Error types for the MCP9808 driver.

use core::fmt;

/// A temperature could not be expressed in the sensor's 13-bit register format.
///
/// Raised for NaN, infinities and magnitudes of 256 °C or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodingRangeError;

impl fmt::Display for EncodingRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "temperature outside the encodable range (-256, 256) degC")
    }
}

/// Which half of the alert window a window operation failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowBound {
    /// T<sub>UPPER</sub> register
    Upper,
    /// T<sub>LOWER</sub> register
    Lower,
}

/// Errors that can occur when talking to the sensor.
///
/// `E` is the error type of the underlying [`BusTransport`](crate::BusTransport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Underlying bus error, passed through unchanged.
    Transport(E),

    /// A register was accessed before the device was initialized.
    NotInitialized,

    /// The device was initialized a second time.
    AlreadyInitialized,

    /// A temperature could not be encoded into a limit register.
    EncodingRange(EncodingRangeError),

    /// Bus error on one half of a window (upper/lower limit) operation.
    ///
    /// When `bound` is [`WindowBound::Lower`] the upper half has already
    /// completed.
    Window { bound: WindowBound, source: E },
}

impl<E> Error<E> {
    /// Tags a transport error with the window half it occurred on.
    pub(crate) fn at(self, bound: WindowBound) -> Self {
        match self {
            Error::Transport(source) => Error::Window { bound, source },
            other => other,
        }
    }
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Transport(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "bus error: {:?}", e),
            Error::NotInitialized => write!(f, "device not initialized"),
            Error::AlreadyInitialized => write!(f, "device already initialized"),
            Error::EncodingRange(e) => write!(f, "{}", e),
            Error::Window { bound, source } => {
                write!(f, "bus error on {:?} window limit: {:?}", bound, source)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Transport(e) => defmt::write!(f, "bus error: {}", e),
            Error::NotInitialized => defmt::write!(f, "device not initialized"),
            Error::AlreadyInitialized => defmt::write!(f, "device already initialized"),
            Error::EncodingRange(e) => defmt::write!(f, "{}", e),
            Error::Window { bound, source } => {
                defmt::write!(f, "bus error on {} window limit: {}", bound, source)
            }
        }
    }
}
