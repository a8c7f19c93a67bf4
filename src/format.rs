//! The [`FormatDescriptor`] value that parameterises the 8-bit codecs, and the two standard
//! instances [`E4M3`] and [`E5M2`].
//!
//! An 8-bit code is laid out, from msb to lsb, as
//!
//! ```text
//!   [sign:1][exponent:exponent_bits][mantissa:mantissa_bits]
//! ```
//!
//! The exponent field is interpreted as follows:
//!
//!   - `0`: zero or subnormal, magnitude `m * 2^(1 - bias - mantissa_bits)`.
//!   - `1 ..= max_exponent_field - 1`: normal, magnitude `(1 + m / 2^mantissa_bits) * 2^(e - bias)`.
//!   - `max_exponent_field` (all ones): infinity if `m == 0`, NaN otherwise.

use core::fmt;

/// Bit layout of an 8-bit floating point format. This is a plain immutable value; pass it by
/// reference to [`crate::encode_fp8`] and [`crate::decode_fp8`].
///
/// ```
/// # use narrow_float::FormatDescriptor;
/// const E3M4: FormatDescriptor = FormatDescriptor::new(3, 4, 3);
/// assert_eq!(E3M4.max_finite_exponent_field(), 6);
/// ```
#[derive(Clone, Copy, Debug)]
#[derive(PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
  exponent_bits: u8,
  mantissa_bits: u8,
  bias: i32,
}

/// 4 exponent bits, 3 mantissa bits, bias 7. Largest finite magnitude 240.
pub const E4M3: FormatDescriptor = FormatDescriptor::new(4, 3, 7);

/// 5 exponent bits, 2 mantissa bits, bias 15. Largest finite magnitude 57344.
pub const E5M2: FormatDescriptor = FormatDescriptor::new(5, 2, 15);

/// `2 ^ exp` as an [`f32`], for `exp` in the normal range of `f32`.
#[inline]
pub(crate) const fn exp2i(exp: i32) -> f32 {
  debug_assert!(exp >= F32_MIN_NORMAL_EXP && exp <= F32_MAX_EXP);
  f32::from_bits(((exp + F32_BIAS) as u32) << F32_MANTISSA_BITS)
}

pub(crate) const F32_MANTISSA_BITS: u32 = f32::MANTISSA_DIGITS - 1;
pub(crate) const F32_BIAS: i32 = f32::MAX_EXP - 1;
const F32_MIN_NORMAL_EXP: i32 = f32::MIN_EXP - 1;
const F32_MAX_EXP: i32 = f32::MAX_EXP - 1;

impl FormatDescriptor {
  /// Total width of a code in bits.
  pub const BITS: u32 = 8;

  /// Construct a format with the given field widths and exponent bias.
  ///
  /// Panics (at compile time, when used in a `const`) unless
  ///
  ///   - `exponent_bits + mantissa_bits + 1 == 8`,
  ///   - there are at least 2 exponent bits and 1 mantissa bit (so that zero, normals, infinity,
  ///     and NaN all have a code), and
  ///   - every finite value of the format is a normal `f32`.
  pub const fn new(exponent_bits: u8, mantissa_bits: u8, bias: i32) -> Self {
    assert!(
      exponent_bits as u32 + mantissa_bits as u32 + 1 == Self::BITS,
      "Sign, exponent, and mantissa fields must add up to 8 bits",
    );
    assert!(
      exponent_bits >= 2 && mantissa_bits >= 1,
      "Need at least 2 exponent bits and 1 mantissa bit",
    );
    let max_finite_exponent_field = (1 << exponent_bits) - 2;
    assert!(
      1 - bias - mantissa_bits as i32 >= F32_MIN_NORMAL_EXP
        && max_finite_exponent_field - bias <= F32_MAX_EXP,
      "The chosen bias puts some values of the format outside the normal range of f32",
    );
    Self { exponent_bits, mantissa_bits, bias }
  }

  /// Width of the exponent field.
  #[inline]
  pub const fn exponent_bits(&self) -> u32 {
    self.exponent_bits as u32
  }

  /// Width of the (explicit) mantissa field.
  #[inline]
  pub const fn mantissa_bits(&self) -> u32 {
    self.mantissa_bits as u32
  }

  #[inline]
  pub const fn bias(&self) -> i32 {
    self.bias
  }

  /// The all-ones exponent field, which marks infinity and NaN.
  #[inline]
  pub const fn max_exponent_field(&self) -> u32 {
    (1 << self.exponent_bits) - 1
  }

  /// The largest exponent field of a finite value.
  #[inline]
  pub const fn max_finite_exponent_field(&self) -> u32 {
    self.max_exponent_field() - 1
  }

  /// Mask of the mantissa field, which is also the largest mantissa field value.
  #[inline]
  pub const fn mantissa_mask(&self) -> u8 {
    (1 << self.mantissa_bits) - 1
  }

  /// Smallest normal magnitude, `2 ^ (1 - bias)`.
  #[inline]
  pub const fn min_normal_magnitude(&self) -> f32 {
    exp2i(1 - self.bias)
  }

  /// Smallest subnormal magnitude, `2 ^ (1 - bias - mantissa_bits)`.
  #[inline]
  pub const fn min_subnormal_magnitude(&self) -> f32 {
    exp2i(1 - self.bias - self.mantissa_bits as i32)
  }

  /// Largest finite magnitude, `(2 - 2 ^ -mantissa_bits) * 2 ^ (max_finite_exponent_field - bias)`.
  pub const fn max_finite_magnitude(&self) -> f32 {
    let exp = self.max_finite_exponent_field() as i32 - self.bias;
    let frac = (self.mantissa_mask() as u32) << (F32_MANTISSA_BITS - self.mantissa_bits());
    f32::from_bits((((exp + F32_BIAS) as u32) << F32_MANTISSA_BITS) | frac)
  }

  /// Assemble a code from its three fields. Bits of `exponent` and `mantissa` beyond the width of
  /// their fields are ignored.
  #[inline]
  pub const fn pack(&self, negative: bool, exponent: u32, mantissa: u32) -> u8 {
    let sign = (negative as u8) << 7;
    let exponent = (exponent & self.max_exponent_field()) as u8;
    let mantissa = mantissa as u8 & self.mantissa_mask();
    sign | exponent << self.mantissa_bits | mantissa
  }

  /// Split a code into its sign, exponent field, and mantissa field.
  #[inline]
  pub const fn unpack(&self, code: u8) -> (bool, u32, u32) {
    let negative = code & 0x80 != 0;
    let exponent = ((code as u32) >> self.mantissa_bits) & self.max_exponent_field();
    let mantissa = (code & self.mantissa_mask()) as u32;
    (negative, exponent, mantissa)
  }

  /// Signed zero.
  #[inline]
  pub const fn zero(&self, negative: bool) -> u8 {
    self.pack(negative, 0, 0)
  }

  /// Signed infinity: exponent all ones, mantissa 0.
  #[inline]
  pub const fn infinity(&self, negative: bool) -> u8 {
    self.pack(negative, self.max_exponent_field(), 0)
  }

  /// The canonical quiet NaN: exponent all ones, mantissa 1.
  #[inline]
  pub const fn canonical_nan(&self, negative: bool) -> u8 {
    self.pack(negative, self.max_exponent_field(), 1)
  }

  /// Signed largest finite magnitude: exponent [max finite](Self::max_finite_exponent_field),
  /// mantissa all ones. This is where overflowing values saturate.
  #[inline]
  pub const fn max_finite(&self, negative: bool) -> u8 {
    self.pack(negative, self.max_finite_exponent_field(), self.mantissa_mask() as u32)
  }

  /// Whether `code` is a NaN of this format.
  #[inline]
  pub const fn is_nan(&self, code: u8) -> bool {
    let (_, exponent, mantissa) = self.unpack(code);
    exponent == self.max_exponent_field() && mantissa != 0
  }

  /// Whether `code` is neither infinity nor NaN.
  #[inline]
  pub const fn is_finite(&self, code: u8) -> bool {
    let (_, exponent, _) = self.unpack(code);
    exponent != self.max_exponent_field()
  }

  /// Render `code` with its fields separated, e.g. `0b0_0111_000` for E4M3 one.
  pub fn code_bits(&self, code: u8) -> impl fmt::Display {
    let (negative, exponent, mantissa) = self.unpack(code);
    let (we, wm) = (self.exponent_bits as usize, self.mantissa_bits as usize);
    format!("0b{}_{exponent:0we$b}_{mantissa:0wm$b}", negative as u8)
  }
}

impl fmt::Display for FormatDescriptor {
  /// `E{exponent_bits}M{mantissa_bits}`, plus the bias if it is not the IEEE-style
  /// `2 ^ (exponent_bits - 1) - 1`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "E{}M{}", self.exponent_bits, self.mantissa_bits)?;
    if self.bias != (1 << (self.exponent_bits - 1)) - 1 {
      write!(f, " (bias {})", self.bias)?;
    }
    Ok(())
  }
}
