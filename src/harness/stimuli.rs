use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::{Error, Result};

/// Hand-picked values: signed zeros and small integers, the specials, powers of two straddling the
/// E4M3 normal/subnormal boundary (`2^-6`), magnitudes at and past the E4M3 saturation point, and
/// a handful of irregular decimals that exercise rounding.
const FIXED: [f32; 37] = [
  0.0, -0.0, 1.0, -1.0, 0.5, -0.5, 2.0, -2.0,
  f32::INFINITY, f32::NEG_INFINITY, f32::NAN,
  1.0 / 1024.0, 1.0 / 256.0, 1.0 / 128.0, 1.0 / 64.0, 1.0 / 32.0, 1.0 / 16.0,
  100.0, 200.0, 448.0, 480.0, 512.0, 1024.0,
  -353.2, 139.2, -76.8, 33.6, 12.5, -6.25, 3.125, -1.5625, 0.78125,
  0.390625, 0.00374861, 0.23489, 0.0000246182, 1.9986,
];

/// Standard deviation of the random tail of [`standard_stimuli`].
const RANDOM_SCALE: f32 = 50.0;
const RANDOM_COUNT: usize = 64;

/// Natural-log range of the magnitudes drawn by [`wide_range_values`]: about `10^±8.7`.
const WIDE_LN_RANGE: f64 = 20.0;

/// `n` normally distributed values with mean 0 and standard deviation `scale`, reproducibly from
/// `seed`.
///
/// Fails with [`Error::InvalidScale`] unless `scale` is finite and nonnegative. Samples whose
/// scaled value overflows `f32` come out as ±infinity.
///
/// ```
/// # use narrow_float::harness::random_values;
/// let a = random_values(16, 3.0, 7)?;
/// assert_eq!(a, random_values(16, 3.0, 7)?);
/// assert!(a.iter().all(|x| x.is_finite()));
/// assert!(random_values(16, f32::INFINITY, 7).is_err());
/// # Ok::<(), narrow_float::Error>(())
/// ```
pub fn random_values(n: usize, scale: f32, seed: u64) -> Result<Vec<f32>> {
  let mut rng = StdRng::seed_from_u64(seed);
  random_values_from(&mut rng, n, scale)
}

pub(crate) fn random_values_from(rng: &mut impl Rng, n: usize, scale: f32) -> Result<Vec<f32>> {
  check_scale(scale)?;
  Ok(normal_samples(rng, n, scale))
}

pub(crate) fn check_scale(scale: f32) -> Result<()> {
  if scale.is_finite() && scale >= 0.0 {
    Ok(())
  } else {
    Err(Error::InvalidScale { scale })
  }
}

fn normal_samples(rng: &mut impl Rng, n: usize, scale: f32) -> Vec<f32> {
  (0 .. n).map(|_| rng.sample::<f32, _>(StandardNormal) * scale).collect()
}

/// `n` values with a random sign and a log-uniform magnitude `e^u`, `u` uniform in `[-20, 20)`,
/// reproducibly from `seed`. This spans about 17 decades, so a good share of the values is
/// flushed to zero or saturated by either 8-bit format.
///
/// ```
/// # use narrow_float::harness::wide_range_values;
/// let values = wide_range_values(100, 1);
/// assert!(values.iter().all(|x| x.is_normal() && x.abs() < 5e8 && x.abs() > 2e-9));
/// ```
pub fn wide_range_values(n: usize, seed: u64) -> Vec<f32> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0 .. n).map(|_| {
    let magnitude = rng.random_range(-WIDE_LN_RANGE .. WIDE_LN_RANGE).exp() as f32;
    if rng.random::<bool>() {-magnitude} else {magnitude}
  }).collect()
}

/// The standard stimulus set for the codecs: the fixed values above, then the grid `i / 16` for
/// `i` in `-32 ..= 32`, then 64 normally distributed values with standard deviation 50 drawn from
/// `seed`.
pub fn standard_stimuli(seed: u64) -> Vec<f32> {
  let mut rng = StdRng::seed_from_u64(seed);
  let grid = (-32 ..= 32).map(|i| i as f32 / 16.0);
  FIXED.iter().copied()
    .chain(grid)
    .chain(normal_samples(&mut rng, RANDOM_COUNT, RANDOM_SCALE))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{decode_fp8, encode_fp8, harness::summarize, FormatDescriptor, E4M3, E5M2};

  #[test]
  fn layout() {
    let stimuli = standard_stimuli(123);
    assert_eq!(stimuli.len(), FIXED.len() + 65 + RANDOM_COUNT);
    assert_eq!(stimuli[.. 3], [0.0, -0.0, 1.0]);
    assert!(stimuli[1].is_sign_negative());
    assert!(stimuli[10].is_nan());
    // The grid starts at -2 and steps by 1/16.
    assert_eq!(stimuli[FIXED.len()], -2.0);
    assert_eq!(stimuli[FIXED.len() + 32], 0.0);
    assert_eq!(stimuli[FIXED.len() + 64], 2.0);
    assert!(stimuli[FIXED.len() + 65 ..].iter().all(|x| x.is_finite()));
  }

  #[test]
  fn reproducible() {
    assert_eq!(random_values(100, 1.0, 42).unwrap(), random_values(100, 1.0, 42).unwrap());
    assert_ne!(random_values(100, 1.0, 42).unwrap(), random_values(100, 1.0, 43).unwrap());
    assert_eq!(wide_range_values(100, 42), wide_range_values(100, 42));
    let (a, b) = (standard_stimuli(5), standard_stimuli(5));
    assert_eq!(a.len(), b.len());
    assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));
  }

  #[test]
  fn normal_shape() {
    let values = random_values(10_000, 2.0, 3).unwrap();
    let mean = values.iter().map(|&x| x as f64).sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|&x| (x as f64 - mean).powi(2)).sum::<f64>() / values.len() as f64;
    assert!(mean.abs() < 0.1, "{mean}");
    assert!((var.sqrt() - 2.0).abs() < 0.1, "{var}");
    // Both signs, and some beyond one standard deviation.
    assert!(values.iter().any(|&x| x < -2.0) && values.iter().any(|&x| x > 2.0));
  }

  #[test]
  fn scale_limits() {
    assert!(random_values(3, 0.0, 1).unwrap().iter().all(|&x| x == 0.0));
    assert!(random_values(0, 1.0, 1).unwrap().is_empty());
    // The largest finite scale is accepted; samples past one standard deviation overflow.
    let huge = random_values(64, f32::MAX, 1).unwrap();
    assert_eq!(huge.len(), 64);
    assert!(huge.iter().all(|x| !x.is_nan()));
    for scale in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, -1.0] {
      assert!(matches!(random_values(4, scale, 1), Err(Error::InvalidScale { .. })), "{scale}");
    }
  }

  /// The wide set reaches the flush-to-zero, subnormal, and saturation regions of both formats,
  /// and every value stays finite through the round trip.
  #[test]
  fn wide_range_roundtrip() {
    let values = wide_range_values(4000, 42);
    for format in [E4M3, E5M2] {
      let codes = encode_fp8(&values, &format);
      let roundtrip = decode_fp8(&codes, &format);

      let count = |f: &dyn Fn(u8) -> bool| codes.iter().filter(|&&c| f(c)).count();
      let flushed = count(&|c| c & 0x7f == 0);
      let subnormal = count(&|c| { let (_, e, m) = format.unpack(c); e == 0 && m != 0 });
      let saturated = count(&|c| c & 0x7f == format.max_finite(false));
      assert!(flushed > 100 && subnormal > 20 && saturated > 100, "{format}: {flushed} {subnormal} {saturated}");
      assert!(codes.iter().all(|&c| format.is_finite(c)), "{format}");

      let summary = summarize(&values, &roundtrip).unwrap();
      assert_eq!(summary.finite, values.len());
      // Flushed and saturated values are off by (almost) all of their magnitude, never more.
      assert!(summary.rel_p95 <= 1.0);
      assert!(summary.abs_max < 5e8);
      // Inside the normal range, within half a step.
      let half_step = 0.5_f64.powi(format.mantissa_bits() as i32 + 1);
      assert!(max_normal_rel_error(&values, &roundtrip, &format) <= half_step, "{format}");
    }
  }

  /// Largest relative error over the values inside the normal range of `format`.
  fn max_normal_rel_error(values: &[f32], roundtrip: &[f32], format: &FormatDescriptor) -> f64 {
    values.iter().zip(roundtrip)
      .filter(|(x, _)| (format.min_normal_magnitude() .. format.max_finite_magnitude()).contains(&x.abs()))
      .map(|(&x, &y)| ((y as f64 - x as f64) / x as f64).abs())
      .fold(0.0, f64::max)
  }
}
