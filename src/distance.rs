//! Distance between two `f32`s, counted in representable steps (ULPs).
//!
//! Raw IEEE 754 bit patterns are sign-magnitude, so comparing them as integers only works within
//! one sign: the negative patterns *increase* as the value decreases, and `-0.0` is `0x8000_0000`
//! while `+0.0` is `0x0000_0000`. So we first map every pattern onto a monotonic integer line:
//!
//! ```text
//!   value        -inf         -MIN_POSITIVE  -from_bits(1)  ±0.0         +from_bits(1)  +MIN_POSITIVE  +inf
//!   ordered      0x0080_0000  0x7f80_0000    0x7fff_ffff    0x8000_0000  0x8000_0001    0x8080_0000    0xff80_0000
//! ```
//!
//! after which the distance is just the difference.

use crate::error::{check_lengths, Result};

const SIGN: u32 = 0x8000_0000;

/// Map the bit pattern of `value` to an integer that is monotonic in `value`: the negative half
/// of the line is reflected below `0x8000_0000`, the positive half is offset above it. Both zeros
/// map to `0x8000_0000`.
///
/// ```
/// # use narrow_float::ordered_bits;
/// assert!(ordered_bits(-1.0) < ordered_bits(-0.5));
/// assert!(ordered_bits(-0.5) < ordered_bits(0.0));
/// assert_eq!(ordered_bits(-0.0), ordered_bits(0.0));
/// ```
#[inline]
pub fn ordered_bits(value: f32) -> u32 {
  let bits = value.to_bits();
  if bits & SIGN != 0 {
    SIGN - (bits & !SIGN)
  } else {
    bits | SIGN
  }
}

/// The number of representable `f32` steps between `reference` and `candidate`.
///
/// This is defined for every bit pattern, but only meaningful when both are finite; exclude
/// non-finite pairs from any statistics (see [`crate::harness::bit_distance_finite`]).
///
/// ```
/// # use narrow_float::bit_distance_scalar;
/// assert_eq!(bit_distance_scalar(1.0, 1.0), 0);
/// assert_eq!(bit_distance_scalar(1.0, f32::from_bits(1.0f32.to_bits() + 3)), 3);
/// assert_eq!(bit_distance_scalar(-f32::from_bits(1), f32::from_bits(1)), 2);
/// ```
#[inline]
pub fn bit_distance_scalar(reference: f32, candidate: f32) -> u32 {
  ordered_bits(reference).abs_diff(ordered_bits(candidate))
}

/// [`bit_distance_scalar`] of each pair `(reference[i], candidate[i])`.
///
/// Fails with [`Error::LengthMismatch`](crate::Error::LengthMismatch) if the slices differ in
/// length; they are never truncated or padded.
pub fn bit_distance(reference: &[f32], candidate: &[f32]) -> Result<Vec<u32>> {
  check_lengths(reference.len(), candidate.len())?;
  Ok(
    reference.iter().zip(candidate)
      .map(|(&r, &c)| bit_distance_scalar(r, c))
      .collect()
  )
}
