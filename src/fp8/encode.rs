use super::*;

use core::num::FpCategory;

/// Any right shift of an `f32` significand by this much or more leaves nothing, not even the
/// round bit: the significand is below `2 ^ MANTISSA_DIGITS`.
const MAX_SHIFT: u32 = f32::MANTISSA_DIGITS + 1;

/// Split a positive finite `f32` into an integer significand and a power of two, such that
/// `value = sig * 2 ^ exp`. For normal floats `sig` includes the hidden bit, i.e. it lies in
/// `2^23 .. 2^24`; for subnormals it is just the mantissa field.
#[inline]
fn split(value: f32) -> (u32, i32) {
  debug_assert!(value.is_finite() && value.is_sign_positive());
  let bits = value.to_bits();
  let mantissa = bits & ((1 << F32_MANTISSA_BITS) - 1);
  let exponent = (bits >> F32_MANTISSA_BITS) as i32;
  // Normals have an implicit 1 and their exponent biased; subnormals have no implicit 1 and the
  // exponent of the smallest normal.
  if exponent != 0 {
    (mantissa | 1 << F32_MANTISSA_BITS, exponent - F32_BIAS - F32_MANTISSA_BITS as i32)
  } else {
    (mantissa, 1 - F32_BIAS - F32_MANTISSA_BITS as i32)
  }
}

/// Shift `sig` right by `shift` bits (`1 ..= 31`), rounding the result to nearest, ties to even.
///
/// Let's call the lsb of the bits we keep `odd`, the first bit shifted out `round`, and the
/// remaining bits shifted out `sticky`. Then:
///
/// ```text
///   odd | round | sticky | result
///   ..x | 0     |  x     | round down (+0)
///   ..0 | 1     | =0     | tie, round down to even (+0)
///   ..1 | 1     | =0     | tie, round up to even (+1)
///   ..x | 1     | ≠0     | round up (+1)
/// ```
///
/// or, as a formula, `round & (odd | sticky)`.
///
/// Note the result may be one bit wider than `sig >> shift`, if all the kept bits were 1 and we
/// rounded up. That carry is the caller's to deal with.
#[inline]
fn shift_round(sig: u32, shift: u32) -> u32 {
  debug_assert!(0 < shift && shift < u32::BITS);
  let kept = sig >> shift;
  let odd = kept & 1 != 0;
  let round = (sig >> (shift - 1)) & 1 != 0;
  let sticky = sig & ((1 << (shift - 1)) - 1) != 0;
  kept + u32::from(round & (odd | sticky))
}

/// How to choose between the two codes that bracket a value the format can't represent exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
  /// Round to nearest, ties to even.
  #[default]
  NearestEven,
  /// Truncate: the code of largest magnitude not above the magnitude of the value.
  TowardZero,
}

/// Shift `sig` right by `shift` bits (`1 ..= 31`), rounding as `rounding` says.
#[inline]
fn shift_with(sig: u32, shift: u32, rounding: Rounding) -> u32 {
  match rounding {
    Rounding::NearestEven => shift_round(sig, shift),
    Rounding::TowardZero => sig >> shift,
  }
}

/// Encode an `f32` as the code of an 8-bit float with layout `format`, rounding if necessary.
///
/// - NaN encodes to the [canonical NaN](FormatDescriptor::canonical_nan), ±infinity to
///   [±infinity](FormatDescriptor::infinity), and ±0 to ±0. The sign bit is always that of
///   `value`, NaN included.
/// - Otherwise, the value is rounded to nearest, ties to even.
/// - Finite values above the largest finite magnitude **saturate** to it; they never become
///   infinity.
/// - Values that round below the smallest subnormal become ±0. Values just below the smallest
///   normal that would round up to it stay at the largest subnormal.
///
/// ```
/// # use narrow_float::{fp8_from_f32, E4M3};
/// assert_eq!(fp8_from_f32(1.0625, &E4M3), 0x38);  // Tie, round down to 1.0
/// assert_eq!(fp8_from_f32(2.125, &E4M3), 0x40);   // Tie, round down to 2.0
/// assert_eq!(fp8_from_f32(1e6, &E4M3), 0x77);     // Saturate to 240
/// ```
pub fn fp8_from_f32(value: f32, format: &FormatDescriptor) -> u8 {
  fp8_from_f32_with_rounding(value, format, Rounding::NearestEven)
}

/// Same as [`fp8_from_f32`], but with a choice of [`Rounding`]. Specials, saturation and the sign
/// are handled the same way in every mode.
///
/// ```
/// # use narrow_float::{fp8_from_f32_with_rounding, Rounding, E4M3};
/// assert_eq!(fp8_from_f32_with_rounding(1.99, &E4M3, Rounding::NearestEven), 0x40);  // 2.0
/// assert_eq!(fp8_from_f32_with_rounding(1.99, &E4M3, Rounding::TowardZero), 0x3f);   // 1.875
/// assert_eq!(fp8_from_f32_with_rounding(-1e6, &E4M3, Rounding::TowardZero), 0xf7);   // -240
/// ```
pub fn fp8_from_f32_with_rounding(value: f32, format: &FormatDescriptor, rounding: Rounding) -> u8 {
  let negative = value.is_sign_negative();
  match value.classify() {
    FpCategory::Nan => format.canonical_nan(negative),
    FpCategory::Infinite => format.infinity(negative),
    FpCategory::Zero => format.zero(negative),
    FpCategory::Normal | FpCategory::Subnormal => {
      let magnitude = value.abs();
      if magnitude >= format.min_normal_magnitude() {
        encode_normal(negative, magnitude, format, rounding)
      } else {
        encode_subnormal(negative, magnitude, format, rounding)
      }
    }
  }
}

/// Encode a `magnitude` that is at least the format's smallest normal.
fn encode_normal(negative: bool, magnitude: f32, format: &FormatDescriptor, rounding: Rounding) -> u8 {
  // `magnitude` is at least 2^-14 or so, well inside the normal range of f32, so `sig` is a full
  // 24-bit significand `1.xxx…` with the binary point after the msb, and `magnitude` is
  // `1.xxx… * 2 ^ unbiased`.
  let (sig, exp) = split(magnitude);
  let mut unbiased = exp + F32_MANTISSA_BITS as i32;

  // Keep the hidden bit plus M mantissa bits, rounding off the rest.
  let mut sig = shift_with(sig, F32_MANTISSA_BITS - format.mantissa_bits(), rounding);

  // If rounding carried out of the kept bits (1.111|1… → 10.000) the significand is now exactly
  // `2 ^ (M+1)`: renormalise it to `2 ^ M` and bump the exponent.
  //
  // Example (M = 3):
  //   sig = 0b1111_1…  →  0b10000  →  0b1000, unbiased + 1
  if sig >> (format.mantissa_bits() + 1) != 0 {
    sig >>= 1;
    unbiased += 1;
  }

  // Bias the exponent. Since `magnitude >= 2 ^ (1 - bias)` this is at least 1, i.e. a normal.
  // If it is past the largest finite exponent field, saturate.
  let exponent = unbiased + format.bias();
  debug_assert!(exponent >= 1);
  if exponent > format.max_finite_exponent_field() as i32 {
    return format.max_finite(negative)
  }

  // `pack` drops the hidden bit along with everything else above the mantissa field.
  format.pack(negative, exponent as u32, sig)
}

/// Encode a nonzero `magnitude` that is below the format's smallest normal.
fn encode_subnormal(negative: bool, magnitude: f32, format: &FormatDescriptor, rounding: Rounding) -> u8 {
  // A subnormal code with mantissa field `m` is `m * 2 ^ (1 - bias - M)`, so the mantissa field
  // is `magnitude` counted in units of `2 ^ (1 - bias - M)`, rounded. With
  // `magnitude = sig * 2 ^ exp`, that is `sig * 2 ^ (exp + bias - 1 + M)`, and since `magnitude`
  // is less than `2 ^ (1 - bias)` the power of two is always negative: a right shift.
  let (sig, exp) = split(magnitude);
  let shift = -(exp + format.bias() - 1 + format.mantissa_bits() as i32);
  debug_assert!(shift > 0);
  let mantissa = shift_with(sig, (shift as u32).min(MAX_SHIFT), rounding);

  // Rounding may have produced `2 ^ M`, which doesn't fit the field; clamp into the subnormal
  // range. Rounding to 0 needs no special treatment, it's just mantissa 0.
  let mantissa = mantissa.min(format.mantissa_mask() as u32);
  format.pack(negative, 0, mantissa)
}
