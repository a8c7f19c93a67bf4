use super::*;

/// Decode the code of an 8-bit float with layout `format` into the `f32` it represents. Every
/// finite code is exactly representable as an `f32`, so this never rounds.
///
/// - Exponent field all 1s: ±infinity if the mantissa field is 0, otherwise NaN (with the sign
///   bit of the code).
/// - Exponent field 0: ±0 or a subnormal, `m * 2 ^ (1 - bias - M)`.
/// - Otherwise: a normal, `(1 + m / 2^M) * 2 ^ (e - bias)`.
///
/// ```
/// # use narrow_float::{fp8_to_f32, E4M3};
/// assert_eq!(fp8_to_f32(0x38, &E4M3), 1.0);
/// assert_eq!(fp8_to_f32(0x77, &E4M3), 240.0);
/// assert_eq!(fp8_to_f32(0x01, &E4M3), 1.0 / 512.0);
/// assert_eq!(fp8_to_f32(0xf8, &E4M3), f32::NEG_INFINITY);
/// ```
pub fn fp8_to_f32(code: u8, format: &FormatDescriptor) -> f32 {
  let (negative, exponent, mantissa) = format.unpack(code);

  let magnitude = if exponent == format.max_exponent_field() {
    if mantissa == 0 { f32::INFINITY } else { f32::NAN }
  } else if exponent == 0 {
    // A small integer times a power of two that is a normal f32: exact. Mantissa 0 gives +0.
    mantissa as f32 * format.min_subnormal_magnitude()
  } else {
    // A normal code maps field by field onto a normal f32: re-bias the exponent, and left-align
    // the mantissa in the 23-bit field.
    let exponent = exponent as i32 - format.bias() + F32_BIAS;
    let mantissa = mantissa << (F32_MANTISSA_BITS - format.mantissa_bits());
    f32::from_bits((exponent as u32) << F32_MANTISSA_BITS | mantissa)
  };

  if negative {-magnitude} else {magnitude}
}
