//! This crate is a bit-exact software reference model of the narrow floating point formats used in
//! machine learning hardware: [bfloat16](https://en.wikipedia.org/wiki/Bfloat16_floating-point_format)
//! and the two 8-bit formats [E4M3 and E5M2](https://arxiv.org/abs/2209.05433).
//!
//! # Introduction
//!
//! When verifying a hardware datapath (say, a systolic array of FP8 multiply-accumulate units)
//! you need a *golden model*: something that says, for every input bit pattern, exactly which bit
//! pattern should come out. This crate is that golden model. It provides
//!
//!   - Conversion between `f32` and BF16 codes, with round to nearest, ties to even.
//!   - Conversion between `f32` and 8-bit codes for any layout with 1 sign bit, `E` exponent bits
//!     and `M` mantissa bits (described by a [`FormatDescriptor`]), with round to nearest, ties to
//!     even, gradual underflow, and saturation of finite overflow to the largest finite value.
//!   - A golden `f32` matrix product ([`golden_matmul`]) to compare hardware results against.
//!   - A distance metric between `f32`s counted in representable steps ([`bit_distance`]).
//!
//! plus, in [`harness`], the pieces of a testbench around them: stimulus sets, test-vector files,
//! error statistics, and a tile-by-tile comparison driver.
//!
//! Every function is total and deterministic. The 8-bit codecs are checked exhaustively and
//! against an exact rational oracle, and the BF16 codec against the `half` crate.
//!
//! # Usage
//!
//! ```
//! use narrow_float::{bf16_from_f32, bf16_to_f32, fp8_from_f32, fp8_to_f32, E4M3, E5M2};
//!
//! // Encode to and decode from BF16.
//! assert_eq!(bf16_from_f32(1.0), 0x3f80);
//! assert_eq!(bf16_to_f32(0xc000), -2.0);
//!
//! // Encode to 8 bits: ties to even, and finite overflow saturates.
//! assert_eq!(fp8_from_f32(1.0625, &E4M3), 0x38);
//! assert_eq!(fp8_from_f32(1000.0, &E4M3), 0x77);
//! assert_eq!(fp8_to_f32(0x77, &E4M3), 240.0);
//! assert_eq!(fp8_from_f32(f32::INFINITY, &E5M2), 0x7c);
//!
//! // Compare a result against the golden model, in ULPs.
//! # use narrow_float::bit_distance;
//! let golden = [1.0, 2.0];
//! let hardware = [1.0, f32::from_bits(2.0f32.to_bits() + 1)];
//! assert_eq!(bit_distance(&golden, &hardware)?, [0, 1]);
//! # Ok::<(), narrow_float::Error>(())
//! ```
//!
//! # Formats
//!
//! The 8-bit formats here are IEEE-like: an all-ones exponent field encodes infinity (mantissa 0)
//! or NaN (mantissa nonzero), in *both* E4M3 and E5M2. Note this differs from the OCP "E4M3FN"
//! variant, which has no infinities and reaches 448.0; here the largest finite E4M3 value is
//! 240.0.
//!
//! This crate includes benchmarks; run them with `cargo bench`.

mod error;
mod format;
mod bf16;
mod fp8;
mod distance;
mod matmul;
pub mod harness;

pub use error::{Error, Result};
pub use format::{FormatDescriptor, E4M3, E5M2};
pub use bf16::{bf16_from_f32, bf16_to_f32, decode_bf16, encode_bf16};
pub use fp8::{
  decode_fp8, encode_fp8, encode_fp8_with_rounding, fp8_from_f32, fp8_from_f32_with_rounding, fp8_to_f32, Rounding,
};
pub use distance::{bit_distance, bit_distance_scalar, ordered_bits};
pub use matmul::{golden_matmul, Matrix};

/// Number of cases for each property test.
#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x1000} else {0x1_0000};
