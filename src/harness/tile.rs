use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::report::UlpReport;
use super::stats::bit_distance_finite;
use super::stimuli::{check_scale, random_values_from};
use crate::error::{Error, Result};
use crate::format::FormatDescriptor;
use crate::matmul::{golden_matmul, Matrix};
use crate::{decode_fp8, encode_fp8, E4M3, E5M2};

/// Which 8-bit layout the tile operands are quantised through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub enum TileFormat {
  #[default]
  E4M3,
  E5M2,
}

impl TileFormat {
  pub fn descriptor(self) -> FormatDescriptor {
    match self {
      TileFormat::E4M3 => E4M3,
      TileFormat::E5M2 => E5M2,
    }
  }
}

/// Parameters of [`run_tile_comparison`]. Missing fields take their [`Default`] values when
/// deserialised.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
  /// Number of tile pairs to draw.
  pub seeds: usize,
  /// Tiles are `size × size`.
  pub size: usize,
  /// Seed of the generator all tiles are drawn from.
  pub rng_seed: u64,
  pub format: TileFormat,
  /// Elements are drawn from a normal distribution with mean 0 and standard deviation `scale`
  /// before quantisation. Must be finite and nonnegative.
  pub scale: f32,
}

impl Default for TileConfig {
  fn default() -> Self {
    Self { seeds: 100, size: 8, rng_seed: 1234, format: TileFormat::E4M3, scale: 1.0 }
  }
}

impl TileConfig {
  /// Override `seeds` from the `SEEDS` environment variable, if set to a valid count.
  pub fn with_env_overrides(self) -> Self {
    let seeds = std::env::var("SEEDS").ok();
    self.with_seeds_override(seeds.as_deref())
  }

  fn with_seeds_override(mut self, seeds: Option<&str>) -> Self {
    if let Some(seeds) = seeds {
      match seeds.trim().parse() {
        Ok(seeds) => self.seeds = seeds,
        Err(err) => log::warn!("ignoring SEEDS={seeds:?}: {err}"),
      }
    }
    self
  }
}

/// Compare a candidate FP8 datapath against the golden `f32` product, tile by tile.
///
/// For each of `config.seeds` rounds, draws two `size × size` matrices, quantises both through
/// `config.format` (encode then decode), computes [`golden_matmul`] of the quantised operands,
/// and asks `candidate` for its product of the same operands. The bit distances between the two
/// products, over the finite elements, are collected into the returned [`UlpReport`].
///
/// `candidate` stands in for the hardware (or its simulation); a perfect candidate is
/// `|a, b| golden_matmul(a, b)`. A candidate product of the wrong shape is an error, and so is a
/// `config.scale` that is negative or not finite.
pub fn run_tile_comparison<F>(config: &TileConfig, mut candidate: F) -> Result<UlpReport>
where
  F: FnMut(&Matrix, &Matrix) -> Result<Matrix>,
{
  check_scale(config.scale)?;
  let format = config.format.descriptor();
  let n = config.size;
  let mut rng = StdRng::seed_from_u64(config.rng_seed);
  let mut report = UlpReport::default();

  let quantise = |values: &[f32]| decode_fp8(&encode_fp8(values, &format), &format);
  for _ in 0 .. config.seeds {
    let a = Matrix::new(n, n, random_values_from(&mut rng, n * n, config.scale)?)?.map_slice(quantise)?;
    let b = Matrix::new(n, n, random_values_from(&mut rng, n * n, config.scale)?)?.map_slice(quantise)?;

    let golden = golden_matmul(&a, &b)?;
    let test = candidate(&a, &b)?;
    if (test.rows(), test.cols()) != (golden.rows(), golden.cols()) {
      return Err(Error::CandidateShape {
        expected_rows: golden.rows(), expected_cols: golden.cols(),
        rows: test.rows(), cols: test.cols(),
      })
    }
    report.extend(bit_distance_finite(golden.as_slice(), test.as_slice())?);
  }

  log::info!(
    "compared {} {n}x{n} {} tiles: {} distance samples, max {}",
    config.seeds, format, report.len(), report.ulp_values.iter().max().copied().unwrap_or(0),
  );
  Ok(report)
}
