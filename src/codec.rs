//! Register codec
//!
//! Pure conversions between the sensor's temperature register format and
//! `f32` degrees Celsius, plus the bit patching helpers used for every
//! read-modify-write of a configuration register.
//!
//! # Temperature register layout
//! ```text
//!  MSB:  | F3 | F2 | F1 | SIGN | 2^7 | 2^6 | 2^5 | 2^4 |
//!  LSB:  | 2^3 | 2^2 | 2^1 | 2^0 | 2^-1 | 2^-2 | 2^-3 | 2^-4 |
//! ```
//! - `F3..F1` are alert flags (ambient register) or reserved (limit registers)
//!   and never contribute to the value
//! - The 12 magnitude bits count 1/16 °C, giving a range of `[0, 256)`
//! - With `SIGN` set the register holds the 13-bit two's complement of a
//!   negative value, i.e. the temperature is `-(256 - magnitude)`
//!
//! The limit registers (T<sub>UPPER</sub>, T<sub>LOWER</sub>,
//! T<sub>CRIT</sub>) only implement 0.25 °C resolution, so [`encode`]
//! always leaves the two lowest LSB bits clear.

use crate::error::EncodingRangeError;

/// Sign flag, bit 4 of the MSB.
pub const SIGN_BIT: u8 = 0x10;

/// Integer nibble of the MSB.
const MSB_MAGNITUDE_MASK: u8 = 0x0F;

/// 12-bit magnitude field of a limit register, in 1/16 °C with 0.25 °C steps.
const LIMIT_MAGNITUDE_MASK: u16 = 0x0FFC;

/// Offset between the magnitude field and the value of a negative reading.
pub const FULL_SCALE: f32 = 256.0;

/// Smallest temperature step of the ambient temperature register.
pub const LSB_CELSIUS: f32 = 0.0625;

/// Smallest temperature step of the limit registers.
pub const LIMIT_STEP_CELSIUS: f32 = 0.25;

const F32_EXPONENT_BIAS: i32 = 127;
const F32_MANTISSA_BITS: u32 = 23;
const F32_MANTISSA_MASK: u32 = 0x007F_FFFF;
const F32_IMPLICIT_ONE: u32 = 0x0080_0000;
const F32_EXPONENT_MAX: u32 = 0xFF;

/// Fractional bits kept when aligning the mantissa, i.e. quarter degrees.
const QUARTER_BITS: i32 = 2;

/// Decodes a temperature register into degrees Celsius.
///
/// Any byte pair is accepted; the flag bits are ignored. The result is
/// `magnitude` when the sign flag is clear and `magnitude - 256` when it is set.
pub fn decode(raw: [u8; 2]) -> f32 {
    let [msb, lsb] = raw;
    let magnitude = magnitude(msb, lsb);

    if msb & SIGN_BIT != 0 {
        magnitude - FULL_SCALE
    } else {
        magnitude
    }
}

/// Unsigned magnitude held in the 12 value bits, in `[0, 256)`.
pub fn magnitude(msb: u8, lsb: u8) -> f32 {
    f32::from(msb & MSB_MAGNITUDE_MASK) * 16.0 + f32::from(lsb) / 16.0
}

/// Encodes degrees Celsius into a limit register.
///
/// The value is truncated toward zero onto the 0.25 °C grid of the limit
/// registers. Negative values set the sign flag and store the 13-bit two's
/// complement, so `decode(encode(t)?)` is within one step of `t`. Values whose
/// magnitude truncates to zero (including `-0.0`) encode as `[0, 0]`.
///
/// # Errors
/// [`EncodingRangeError`] for NaN, infinities and `|celsius| >= 256`.
pub fn encode(celsius: f32) -> Result<[u8; 2], EncodingRangeError> {
    let parts = FloatParts::from(celsius);
    let quarters = parts.quarter_steps()?;

    let mut raw = (quarters << 2) & LIMIT_MAGNITUDE_MASK;
    if parts.negative && raw != 0 {
        raw = (0x1000 - raw) | (u16::from(SIGN_BIT) << 8);
    }

    Ok(raw.to_be_bytes())
}

/// IEEE-754 binary32 fields of a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FloatParts {
    negative: bool,
    biased_exponent: u32,
    fraction: u32,
}

impl From<f32> for FloatParts {
    fn from(value: f32) -> Self {
        let bits = value.to_bits();
        Self {
            negative: bits >> 31 != 0,
            biased_exponent: (bits >> F32_MANTISSA_BITS) & F32_EXPONENT_MAX,
            fraction: bits & F32_MANTISSA_MASK,
        }
    }
}

impl FloatParts {
    /// Magnitude in whole quarter degrees, truncated toward zero.
    ///
    /// The mantissa (with its implicit leading one) is shifted right by
    /// `23 - (exponent + 2)`. Exponents of 8 and above (|x| >= 256) and the
    /// NaN/infinity encoding are rejected before shifting, which keeps the
    /// shift amount positive.
    fn quarter_steps(self) -> Result<u16, EncodingRangeError> {
        if self.biased_exponent == F32_EXPONENT_MAX {
            return Err(EncodingRangeError);
        }
        // Zero and subnormals
        if self.biased_exponent == 0 {
            return Ok(0);
        }

        let exponent = self.biased_exponent as i32 - F32_EXPONENT_BIAS;
        if exponent >= 8 {
            return Err(EncodingRangeError);
        }

        let shift = F32_MANTISSA_BITS as i32 - (exponent + QUARTER_BITS);
        let mantissa = self.fraction | F32_IMPLICIT_ONE;

        // shift >= 14 here; shifts past the mantissa width leave nothing
        let quarters = mantissa.checked_shr(shift as u32).unwrap_or(0);
        Ok(quarters as u16)
    }
}

/// Sets or clears every bit of `mask` in `current`, leaving other bits untouched.
pub fn patch_bits(current: u8, mask: u8, set: bool) -> u8 {
    patch_field(current, mask, if set { mask } else { 0 })
}

/// Replaces the bits selected by `mask` with the matching bits of `value`.
pub fn patch_field(current: u8, mask: u8, value: u8) -> u8 {
    (current & !mask) | (value & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASKS: [u8; 11] = [
        0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01, // config flags
        0x06, // hysteresis
        0x03, // resolution
        0x00,
    ];

    #[test]
    fn decode_positive_matches_formula() {
        for msb in (0..=u8::MAX).filter(|msb| msb & SIGN_BIT == 0) {
            for lsb in 0..=u8::MAX {
                let expected = f32::from(msb & 0x0F) * 16.0 + f32::from(lsb) / 16.0;
                let value = decode([msb, lsb]);
                assert_eq!(value, expected);
                assert!((0.0..256.0).contains(&value));
            }
        }
    }

    #[test]
    fn decode_negative_is_offset_from_full_scale() {
        for msb in (0..=u8::MAX).filter(|msb| msb & SIGN_BIT != 0) {
            for lsb in 0..=u8::MAX {
                let magnitude = f32::from(msb & 0x0F) * 16.0 + f32::from(lsb) / 16.0;
                let value = decode([msb, lsb]);
                assert_eq!(value, -(256.0 - magnitude));
                assert!((-256.0..=0.0).contains(&value));
            }
        }
    }

    #[test]
    fn decode_ignores_flag_bits() {
        assert_eq!(decode([0xE1, 0x94]), decode([0x01, 0x94]));
        assert_eq!(decode([0x01, 0x94]), 25.25);
    }

    #[test]
    fn decode_datasheet_samples() {
        assert_eq!(decode([0x00, 0x00]), 0.0);
        assert_eq!(decode([0x00, 0x01]), 0.0625);
        assert_eq!(decode([0x1F, 0xFF]), -0.0625);
        assert_eq!(decode([0x1F, 0xAC]), -5.25);
        assert_eq!(decode([0x0F, 0xFF]), 255.9375);
    }

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(25.0), Ok([0x01, 0x90]));
        assert_eq!(encode(100.75), Ok([0x06, 0x4C]));
        assert_eq!(encode(-5.25), Ok([0x1F, 0xAC]));
        assert_eq!(encode(255.75), Ok([0x0F, 0xFC]));
        assert_eq!(encode(-255.75), Ok([0x10, 0x04]));
    }

    #[test]
    fn encode_truncates_to_quarter_degrees() {
        assert_eq!(encode(25.3), Ok([0x01, 0x94]));
        assert_eq!(encode(0.0625), Ok([0x00, 0x00]));
        assert_eq!(encode(0.2), Ok([0x00, 0x00]));
        assert_eq!(encode(-0.2), Ok([0x00, 0x00]));
        assert_eq!(encode(1.0e-30), Ok([0x00, 0x00]));
        assert_eq!(encode(f32::MIN_POSITIVE / 2.0), Ok([0x00, 0x00]));
    }

    #[test]
    fn encode_zero_and_negative_zero() {
        assert_eq!(encode(0.0), Ok([0x00, 0x00]));
        assert_eq!(encode(-0.0), Ok([0x00, 0x00]));
    }

    #[test]
    fn encode_rejects_out_of_range() {
        for value in [
            256.0,
            -256.0,
            1000.0,
            -1.0e9,
            f32::MAX,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ] {
            assert_eq!(encode(value), Err(EncodingRangeError));
        }
    }

    #[test]
    fn round_trip_within_one_step() {
        for value in [25.0f32, -5.25, 0.0625, -0.0, 100.75, -40.0, 125.5, -0.25] {
            let decoded = decode(encode(value).unwrap());
            let delta = decoded - value;
            assert!(
                (-LSB_CELSIUS..=LSB_CELSIUS).contains(&delta),
                "{} decoded as {}",
                value,
                decoded
            );
        }
    }

    #[test]
    fn round_trip_every_quarter_degree() {
        for quarters in -1023i32..=1023 {
            let value = quarters as f32 * LIMIT_STEP_CELSIUS;
            assert_eq!(decode(encode(value).unwrap()), value);
        }
    }

    #[test]
    fn encode_never_sets_flag_or_fraction_bits() {
        for quarters in -1023i32..=1023 {
            let [msb, lsb] = encode(quarters as f32 * 0.25 + 0.1).unwrap();
            assert_eq!(msb & 0xE0, 0);
            assert_eq!(lsb & 0x03, 0);
        }
    }

    #[test]
    fn patch_bits_only_touches_mask() {
        for base in 0..=u8::MAX {
            for mask in MASKS {
                for set in [true, false] {
                    let patched = patch_bits(base, mask, set);
                    assert_eq!(patched & !mask, base & !mask);
                    assert_eq!(patched & mask, if set { mask } else { 0 });
                }
            }
        }
    }

    #[test]
    fn patch_bits_is_idempotent() {
        for base in 0..=u8::MAX {
            for mask in MASKS {
                for set in [true, false] {
                    let once = patch_bits(base, mask, set);
                    assert_eq!(patch_bits(once, mask, set), once);
                }
            }
        }
    }

    #[test]
    fn patch_field_masks_value() {
        assert_eq!(patch_field(0b1111_1001, 0b0000_0110, 0b0000_0100), 0b1111_1101);
        assert_eq!(patch_field(0xFF, 0x03, 0xFC), 0xFC);
        assert_eq!(patch_field(0x00, 0x03, 0xFF), 0x03);
    }
}
