//! An exact oracle for the 8-bit codecs, in terms of arbitrary precision [Rational]s.
//!
//! This is a **super-explicit** and **super-obvious** rendition of the format definition and of
//! the rounding policy, since this is what the bit-twiddling implementations are checked against.

use super::*;

use malachite::rational::Rational;
use malachite::base::num::arithmetic::traits::{Abs, PowerOf2};

/// The exact value of a finite `code`, or `None` if it is infinity or NaN.
pub fn fp8_to_rational(code: u8, format: &FormatDescriptor) -> Option<Rational> {
  let (negative, exponent, mantissa) = format.unpack(code);
  if exponent == format.max_exponent_field() {
    return None
  }

  let m = format.mantissa_bits() as i64;
  let bias = format.bias() as i64;
  // Subnormals: 0.mmm * 2^(1 - bias). Normals: 1.mmm * 2^(e - bias). Written as an integer
  // significand over 2^M.
  let (significand, exponent) =
    if exponent == 0 {
      (mantissa, 1 - bias)
    } else {
      (mantissa + (1 << m), exponent as i64 - bias)
    };
  let magnitude = Rational::from(significand) * Rational::power_of_2(exponent - m);

  Some(if negative {-magnitude} else {magnitude})
}

/// The magnitude code (sign bit clear) that the nonnegative `exact` should encode to:
///
///   - Find the nearest finite code; if tied between two, the even one.
///   - That takes care of saturation as well, since infinity is not a candidate.
///   - If `exact` is below the smallest normal but nearest to it, clamp to the largest subnormal.
pub fn expected_magnitude_code(exact: &Rational, format: &FormatDescriptor) -> u8 {
  assert!(*exact >= Rational::from(0));

  let mut best = 0;
  let mut best_distance = exact.clone();
  for code in 1 ..= format.max_finite(false) {
    let value = fp8_to_rational(code, format).unwrap();
    let distance = (&value - exact).abs();
    // Ties can only happen between adjacent codes, one of which is even.
    if distance < best_distance || (distance == best_distance && code & 1 == 0) {
      best = code;
      best_distance = distance;
    }
  }

  let min_normal_code = format.pack(false, 1, 0);
  let min_normal = fp8_to_rational(min_normal_code, format).unwrap();
  if best == min_normal_code && *exact < min_normal {
    format.mantissa_mask()
  } else {
    best
  }
}

/// The magnitude code that the nonnegative `exact` should truncate to: the largest finite code
/// whose value is not above `exact`.
pub fn expected_magnitude_code_toward_zero(exact: &Rational, format: &FormatDescriptor) -> u8 {
  assert!(*exact >= Rational::from(0));
  (0 ..= format.max_finite(false)).rev()
    .find(|&code| fp8_to_rational(code, format).unwrap() <= *exact)
    .unwrap()
}

/// Check whether the rational number `exact` (the value of some finite `f32`) should encode to
/// `code`, rounding to nearest even. Zero is checked up to its sign, which a [Rational] does not
/// carry.
pub fn is_correct_rounded(exact: &Rational, code: u8, format: &FormatDescriptor) -> bool {
  matches_expected(exact, code, expected_magnitude_code(&exact.abs(), format))
}

/// Same as [`is_correct_rounded`], rounding toward zero.
pub fn is_correct_truncated(exact: &Rational, code: u8, format: &FormatDescriptor) -> bool {
  matches_expected(exact, code, expected_magnitude_code_toward_zero(&exact.abs(), format))
}

fn matches_expected(exact: &Rational, code: u8, expected: u8) -> bool {
  let negative = *exact < Rational::from(0);
  if expected == 0 {
    code & 0x7f == 0
  } else {
    code == expected | (negative as u8) << 7
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{E4M3, E5M2};

  #[test]
  fn examples() {
    assert_eq!(fp8_to_rational(0x38, &E4M3), Some(Rational::from(1)));
    assert_eq!(fp8_to_rational(0x77, &E4M3), Some(Rational::from(240)));
    assert_eq!(fp8_to_rational(0xf7, &E4M3), Some(Rational::from(-240)));
    assert_eq!(fp8_to_rational(0x01, &E4M3), Some(Rational::from_signeds(1, 512)));
    assert_eq!(fp8_to_rational(0x08, &E4M3), Some(Rational::from_signeds(1, 64)));
    assert_eq!(fp8_to_rational(0x78, &E4M3), None);
    assert_eq!(fp8_to_rational(0x7f, &E4M3), None);

    assert_eq!(fp8_to_rational(0x7b, &E5M2), Some(Rational::from(57344)));
    assert_eq!(fp8_to_rational(0x02, &E5M2), Some(Rational::from_signeds(1, 32768)));
    assert_eq!(fp8_to_rational(0xfc, &E5M2), None);
  }

  #[test]
  fn expected_codes() {
    assert_eq!(expected_magnitude_code(&Rational::from(0), &E4M3), 0x00);
    assert_eq!(expected_magnitude_code(&Rational::from_signeds(17, 16), &E4M3), 0x38);
    assert_eq!(expected_magnitude_code(&Rational::from_signeds(31, 16), &E4M3), 0x40);
    assert_eq!(expected_magnitude_code(&Rational::from(1000), &E4M3), 0x77);
    assert_eq!(expected_magnitude_code(&Rational::from_signeds(1, 1024), &E4M3), 0x00);
    assert_eq!(expected_magnitude_code(&Rational::from_signeds(3, 1024), &E4M3), 0x02);
    // Halfway between the largest subnormal and the smallest normal: clamped.
    assert_eq!(expected_magnitude_code(&Rational::from_signeds(15, 1024), &E4M3), 0x07);
    assert_eq!(expected_magnitude_code(&Rational::from(61440), &E5M2), 0x7b);
  }

  #[test]
  fn expected_codes_toward_zero() {
    let code = |n, d| expected_magnitude_code_toward_zero(&Rational::from_signeds(n, d), &E4M3);
    assert_eq!(code(0, 1), 0x00);
    assert_eq!(code(31, 16), 0x3f);
    assert_eq!(code(2, 1), 0x40);
    assert_eq!(code(1, 1024), 0x00);
    assert_eq!(code(15, 1024), 0x07);
    assert_eq!(code(1000, 1), 0x77);
    assert_eq!(expected_magnitude_code_toward_zero(&Rational::from(57343), &E5M2), 0x7a);
  }
}
