//! This module and its submodules implement the 8-bit floating point codecs, for any layout
//! described by a [`FormatDescriptor`] (in practice [`E4M3`](crate::E4M3) and
//! [`E5M2`](crate::E5M2)).
//!
//! These formats follow IEEE 754 in their layout (sign, biased exponent, mantissa with a hidden
//! bit, subnormals at exponent field 0, infinity and NaN at the all-ones exponent field) but not in
//! their overflow behaviour: finite values too large for the format **saturate** to the largest
//! finite value instead of rounding to infinity. Only an infinite input encodes to infinity.
//!
//! Some notation used in the comments:
//!
//!   - **sig**: an integer significand, hidden bit included where there is one.
//!   - **M**: the number of mantissa bits of the target format.
//!   - **Round to nearest, ties to even (RNE)**: of the two candidates, pick the nearest; if both
//!     are equally near, pick the one whose lsb is 0.

use crate::format::{FormatDescriptor, F32_BIAS, F32_MANTISSA_BITS};

/// f32 → code
mod encode;

/// code → f32
mod decode;

#[cfg(test)]
pub(crate) mod rational;


pub use encode::{fp8_from_f32, fp8_from_f32_with_rounding, Rounding};
pub use decode::fp8_to_f32;

/// Encode every element of `values` with [`fp8_from_f32`], index for index.
///
/// ```
/// # use narrow_float::{encode_fp8, E4M3};
/// assert_eq!(encode_fp8(&[1.0, -2.0, f32::INFINITY], &E4M3), [0x38, 0xc0, 0x78]);
/// ```
pub fn encode_fp8(values: &[f32], format: &FormatDescriptor) -> Vec<u8> {
  values.iter().map(|&x| fp8_from_f32(x, format)).collect()
}

/// Encode every element of `values` with [`fp8_from_f32_with_rounding`], index for index.
pub fn encode_fp8_with_rounding(values: &[f32], format: &FormatDescriptor, rounding: Rounding) -> Vec<u8> {
  values.iter().map(|&x| fp8_from_f32_with_rounding(x, format, rounding)).collect()
}

/// Decode every element of `codes` with [`fp8_to_f32`], index for index.
///
/// ```
/// # use narrow_float::{decode_fp8, E5M2};
/// assert_eq!(decode_fp8(&[0x3c, 0x7b], &E5M2), [1.0, 57344.0]);
/// ```
pub fn decode_fp8(codes: &[u8], format: &FormatDescriptor) -> Vec<f32> {
  codes.iter().map(|&c| fp8_to_f32(c, format)).collect()
}
