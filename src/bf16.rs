//! The 16-bit "brain float" format: the upper half of an [`f32`], i.e. 1 sign bit, the same 8
//! exponent bits and bias as `f32`, and the top 7 of its 23 mantissa bits.
//!
//! Because the layout is a left-aligned subset of `f32`'s, widening is a shift and narrowing is a
//! shift plus a rounding decision on the discarded half.

/// Number of `f32` bits discarded when narrowing.
const SHIFT: u32 = 16;

/// Bit 15 of the `f32` pattern: the first discarded bit, and so the value of an exact tie.
const HALF: u32 = 1 << (SHIFT - 1);

/// Quiet bit of a BF16 NaN (msb of the mantissa field).
const QUIET: u16 = 0x0040;

/// Narrow an [`f32`] to the bit pattern of the nearest BF16, ties to even.
///
/// A NaN keeps its sign and the top 7 bits of its payload, and always comes out quiet. So a
/// signaling NaN does not narrow to its plain upper half: `0x7fa0_0000` gives `0x7fe0`, not
/// `0x7fa0`.
///
/// ```
/// # use narrow_float::bf16_from_f32;
/// assert_eq!(bf16_from_f32(1.0), 0x3f80);
/// assert_eq!(bf16_from_f32(-2.0), 0xc000);
/// ```
#[inline]
pub fn bf16_from_f32(value: f32) -> u16 {
  let bits = value.to_bits();

  // NaN is truncated without rounding: rounding could carry a large payload through the exponent
  // and into the sign bit. The payload may also live entirely in the discarded half, so set the
  // quiet bit to keep the result a NaN.
  if value.is_nan() {
    return (bits >> SHIFT) as u16 | QUIET
  }

  // Call the lsb of the kept half `odd`, and the discarded half `low`. Then
  //
  //   low  < HALF            → round down
  //   low == HALF, odd == 0  → tie, round down to even
  //   low == HALF, odd == 1  → tie, round up to even
  //   low  > HALF            → round up
  //
  // Rounding up is adding 1 to the kept half. If the kept mantissa is all 1s this carries into the
  // exponent, which is exactly the right answer (1.1111111|1… rounds to 10.0000000), including
  // when the exponent then becomes all 1s: that is genuine overflow to infinity. Infinity itself
  // has `low == 0` so it is never rounded. For finite inputs the sum cannot overflow a `u32`.
  let low = bits & (u32::MAX >> SHIFT);
  let odd = (bits >> SHIFT) & 1;
  let round_up = low > HALF || (low == HALF && odd == 1);
  let bits = bits + (u32::from(round_up) << SHIFT);

  (bits >> SHIFT) as u16
}

/// Widen the bit pattern of a BF16 to the [`f32`] it represents. This is always exact.
///
/// ```
/// # use narrow_float::bf16_to_f32;
/// assert_eq!(bf16_to_f32(0x3f80), 1.0);
/// assert!(bf16_to_f32(0x7fc0).is_nan());
/// ```
#[inline]
pub fn bf16_to_f32(code: u16) -> f32 {
  f32::from_bits(u32::from(code) << SHIFT)
}

/// Narrow every element of `values` with [`bf16_from_f32`], index for index.
pub fn encode_bf16(values: &[f32]) -> Vec<u16> {
  values.iter().map(|&x| bf16_from_f32(x)).collect()
}

/// Widen every element of `codes` with [`bf16_to_f32`], index for index.
pub fn decode_bf16(codes: &[u16]) -> Vec<f32> {
  codes.iter().map(|&c| bf16_to_f32(c)).collect()
}
