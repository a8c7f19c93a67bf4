use core::fmt;

use crate::distance::bit_distance_scalar;
use crate::error::{check_lengths, Result};

/// [`bit_distance`](crate::bit_distance) restricted to the pairs where both `reference[i]` and
/// `candidate[i]` are finite; the others are skipped, so the result may be shorter than the
/// inputs.
///
/// ```
/// # use narrow_float::harness::bit_distance_finite;
/// let reference = [1.0, f32::NAN, 2.0, f32::INFINITY];
/// let candidate = [1.0, 1.0, f32::from_bits(2.0f32.to_bits() + 2), f32::INFINITY];
/// assert_eq!(bit_distance_finite(&reference, &candidate)?, [0, 2]);
/// # Ok::<(), narrow_float::Error>(())
/// ```
pub fn bit_distance_finite(reference: &[f32], candidate: &[f32]) -> Result<Vec<u32>> {
  check_lengths(reference.len(), candidate.len())?;
  Ok(
    reference.iter().zip(candidate)
      .filter(|(r, c)| r.is_finite() && c.is_finite())
      .map(|(&r, &c)| bit_distance_scalar(r, c))
      .collect()
  )
}

/// The `q`-th percentile (`q` in `0 ..= 100`) of `sorted`, interpolating linearly between the two
/// closest ranks. `sorted` must be in ascending order. NaN if `sorted` is empty.
///
/// ```
/// # use narrow_float::harness::percentile;
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 100.0), 4.0);
/// assert!(percentile(&[], 50.0).is_nan());
/// ```
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
  let Some(&last) = sorted.last() else { return f64::NAN };
  let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
  let lo = rank.floor() as usize;
  let hi = rank.ceil() as usize;
  if hi >= sorted.len() {
    return last
  }
  let frac = rank - lo as f64;
  sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
  values.sort_by(f64::total_cmp);
  values
}

/// Quantisation error statistics of a round trip `reference → narrow → roundtrip`, over the
/// positions where both are finite.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSummary {
  /// Number of positions where both values are finite.
  pub finite: usize,
  /// Total number of positions.
  pub total: usize,
  pub abs_median: f64,
  pub abs_p95: f64,
  pub abs_max: f64,
  /// Relative error is `|roundtrip - reference| / (|reference| + 1e-30)`.
  pub rel_median: f64,
  pub rel_p95: f64,
  pub ulp_median: f64,
  pub ulp_p95: f64,
  pub ulp_max: u32,
}

/// Summarise the error of `roundtrip` against `reference`.
///
/// Fails with [`Error::LengthMismatch`](crate::Error::LengthMismatch) if the slices differ in
/// length. With no finite pairs, the percentiles are NaN and the maxima are zero.
pub fn summarize(reference: &[f32], roundtrip: &[f32]) -> Result<ErrorSummary> {
  check_lengths(reference.len(), roundtrip.len())?;

  let pairs: Vec<(f32, f32)> = reference.iter().copied().zip(roundtrip.iter().copied())
    .filter(|(r, c)| r.is_finite() && c.is_finite())
    .collect();

  let dx: Vec<f64> = pairs.iter().map(|&(r, c)| (c as f64 - r as f64).abs()).collect();
  let rel = sorted(pairs.iter().zip(&dx).map(|(&(r, _), &dx)| dx / ((r as f64).abs() + 1e-30)).collect());
  let abs = sorted(dx);
  let ulps: Vec<u32> = pairs.iter().map(|&(r, c)| bit_distance_scalar(r, c)).collect();
  let ulp_max = ulps.iter().copied().max().unwrap_or(0);
  let ulps = sorted(ulps.into_iter().map(f64::from).collect());

  Ok(ErrorSummary {
    finite: pairs.len(),
    total: reference.len(),
    abs_median: percentile(&abs, 50.0),
    abs_p95: percentile(&abs, 95.0),
    abs_max: abs.last().copied().unwrap_or(0.0),
    rel_median: percentile(&rel, 50.0),
    rel_p95: percentile(&rel, 95.0),
    ulp_median: percentile(&ulps, 50.0),
    ulp_p95: percentile(&ulps, 95.0),
    ulp_max,
  })
}

impl fmt::Display for ErrorSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "finite: {}/{}", self.finite, self.total)?;
    writeln!(f, "abs err: median={:.3e} p95={:.3e} max={:.3e}", self.abs_median, self.abs_p95, self.abs_max)?;
    write!(f, "rel err: median={:.3e} p95={:.3e} | ulp: median={} p95={} max={}",
      self.rel_median, self.rel_p95, self.ulp_median, self.ulp_p95, self.ulp_max)
  }
}
