use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A flat record of bit distances, as collected by a comparison run. Serialised as
/// `{"ulp_values": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct UlpReport {
  pub ulp_values: Vec<u32>,
}

impl UlpReport {
  pub fn new(ulp_values: Vec<u32>) -> Self {
    Self { ulp_values }
  }

  pub fn len(&self) -> usize {
    self.ulp_values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ulp_values.is_empty()
  }

  /// Serialise as JSON into `out`.
  pub fn write_json(&self, out: impl Write) -> Result<()> {
    serde_json::to_writer(out, self)?;
    log::debug!("wrote report with {} distance samples", self.len());
    Ok(())
  }

  /// Deserialise from the JSON produced by [`UlpReport::write_json`].
  pub fn read_json(input: impl Read) -> Result<Self> {
    Ok(serde_json::from_reader(input)?)
  }

  /// Count the samples into `bins` equal-width bins spanning `[min, max]` of the samples. Every
  /// bin is half-open except the last, which also includes `max`. Returns `(lower edge, count)`
  /// per bin.
  ///
  /// If all samples are equal the range is widened to `[v - 0.5, v + 0.5]`. Empty if there are no
  /// samples or `bins` is 0.
  ///
  /// ```
  /// # use narrow_float::harness::UlpReport;
  /// let report = UlpReport::new(vec![0, 0, 1, 2, 4]);
  /// assert_eq!(report.histogram(2), [(0.0, 3), (2.0, 2)]);
  /// ```
  pub fn histogram(&self, bins: usize) -> Vec<(f64, usize)> {
    let (Some(&min), Some(&max)) = (self.ulp_values.iter().min(), self.ulp_values.iter().max()) else {
      return Vec::new()
    };
    if bins == 0 {
      return Vec::new()
    }

    let (lo, hi) =
      if min == max { (min as f64 - 0.5, max as f64 + 0.5) }
      else { (min as f64, max as f64) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0; bins];
    for &value in &self.ulp_values {
      let index = ((value as f64 - lo) / width) as usize;
      counts[index.min(bins - 1)] += 1;
    }
    counts.into_iter().enumerate().map(|(i, n)| (lo + i as f64 * width, n)).collect()
  }

  /// The empirical cumulative distribution: the samples in ascending order, each paired with the
  /// fraction of samples at or before its position, `(i + 1) / n`.
  pub fn cdf(&self) -> Vec<(u32, f64)> {
    let mut values = self.ulp_values.clone();
    values.sort_unstable();
    let n = values.len() as f64;
    values.into_iter().enumerate().map(|(i, v)| (v, (i + 1) as f64 / n)).collect()
  }
}

impl Extend<u32> for UlpReport {
  fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
    self.ulp_values.extend(iter)
  }
}
