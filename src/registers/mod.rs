//! Register definitions for the MCP9808
//! Generated from the MCP9808 datasheet (DS25095)
//!
//! | Pointer | Register | Size |
//! |---------|----------|------|
//! | 0x01 | [`Configuration`] | 2 |
//! | 0x02 | [`UpperLimit`] | 2 |
//! | 0x03 | [`LowerLimit`] | 2 |
//! | 0x04 | [`CriticalLimit`] | 2 |
//! | 0x05 | [`AmbientTemperature`] | 2 |
//! | 0x06 | [`ManufacturerId`] | 2 |
//! | 0x07 | [`DeviceId`] | 2 |
//! | 0x08 | [`ResolutionConfig`] | 1 |

mod config;
mod identification;
mod resolution;
mod temperature;

pub use config::*;
pub use identification::*;
pub use resolution::*;
pub use temperature::*;
