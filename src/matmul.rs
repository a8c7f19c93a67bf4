//! A dense row-major `f32` matrix and the golden (reference) matrix product.

use crate::error::{Error, Result};

/// A dense `rows × cols` matrix of `f32`, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
  rows: usize,
  cols: usize,
  data: Vec<f32>,
}

impl Matrix {
  /// Wrap row-major `data` as a `rows × cols` matrix. Fails if `data` doesn't have exactly
  /// `rows * cols` elements.
  pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
    if rows.checked_mul(cols) != Some(data.len()) {
      return Err(Error::MatrixData { rows, cols, len: data.len() })
    }
    Ok(Self { rows, cols, data })
  }

  /// A `rows × cols` matrix of zeros.
  pub fn zeros(rows: usize, cols: usize) -> Self {
    Self { rows, cols, data: vec![0.0; rows * cols] }
  }

  /// A `rows × cols` matrix whose element `(i, j)` is `f(i, j)`.
  pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
    let data = (0 .. rows).flat_map(|i| (0 .. cols).map(move |j| (i, j))).map(|(i, j)| f(i, j)).collect();
    Self { rows, cols, data }
  }

  #[inline]
  pub fn rows(&self) -> usize {
    self.rows
  }

  #[inline]
  pub fn cols(&self) -> usize {
    self.cols
  }

  /// The elements, row-major.
  #[inline]
  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }

  #[inline]
  pub fn into_vec(self) -> Vec<f32> {
    self.data
  }

  /// Element `(row, col)`. Panics if out of bounds.
  #[inline]
  pub fn get(&self, row: usize, col: usize) -> f32 {
    assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds for {}x{}", self.rows, self.cols);
    self.data[row * self.cols + col]
  }

  /// Apply `f` to every element, keeping the shape. Useful for pushing a whole matrix through a
  /// quantise/dequantise round trip.
  pub fn map(&self, f: impl FnMut(f32) -> f32) -> Self {
    Self { rows: self.rows, cols: self.cols, data: self.data.iter().copied().map(f).collect() }
  }

  /// Same as [`Matrix::map`], but over the whole row-major slice at once (e.g. with
  /// [`crate::encode_fp8`] followed by [`crate::decode_fp8`]). `f` must preserve the length.
  pub fn map_slice(&self, f: impl FnOnce(&[f32]) -> Vec<f32>) -> Result<Self> {
    Self::new(self.rows, self.cols, f(&self.data))
  }
}

/// The reference `f32` product `a × b`.
///
/// Each element is accumulated in `f32`, in order of increasing inner index, starting from `0.0`:
/// `acc = 0; for k in 0 .. n { acc += a[i][k] * b[k][j] }`. There is no fused multiply-add and no
/// wider accumulator.
///
/// Fails with [`Error::ShapeMismatch`] if `a.cols() != b.rows()`.
///
/// ```
/// # use narrow_float::{golden_matmul, Matrix};
/// let a = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
/// let b = Matrix::new(2, 1, vec![1.0, -1.0])?;
/// assert_eq!(golden_matmul(&a, &b)?.as_slice(), [-1.0, -1.0]);
/// # Ok::<(), narrow_float::Error>(())
/// ```
pub fn golden_matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
  if a.cols != b.rows {
    return Err(Error::ShapeMismatch {
      lhs_rows: a.rows, lhs_cols: a.cols,
      rhs_rows: b.rows, rhs_cols: b.cols,
    })
  }

  let mut out = Matrix::zeros(a.rows, b.cols);
  for i in 0 .. a.rows {
    let row = &a.data[i * a.cols .. (i + 1) * a.cols];
    for j in 0 .. b.cols {
      let mut acc = 0.0_f32;
      for (k, &x) in row.iter().enumerate() {
        acc += x * b.data[k * b.cols + j];
      }
      out.data[i * out.cols + j] = acc;
    }
  }
  Ok(out)
}
