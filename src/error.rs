use thiserror::Error;

/// Usage errors. The numeric functions themselves are total: every input bit pattern has a defined
/// output, so the only ways to fail are mismatched shapes and the I/O of the collaborators in
/// [`crate::harness`].
#[derive(Error, Debug)]
pub enum Error {
  #[error("length mismatch: reference has {reference} elements, candidate has {candidate}")]
  LengthMismatch { reference: usize, candidate: usize },
  #[error("shape mismatch: cannot multiply a {lhs_rows}x{lhs_cols} matrix by a {rhs_rows}x{rhs_cols} matrix")]
  ShapeMismatch { lhs_rows: usize, lhs_cols: usize, rhs_rows: usize, rhs_cols: usize },
  #[error("matrix data has {len} elements, expected {rows}x{cols}")]
  MatrixData { rows: usize, cols: usize, len: usize },
  #[error("candidate product is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
  CandidateShape { expected_rows: usize, expected_cols: usize, rows: usize, cols: usize },
  #[error("scale must be finite and nonnegative, got {scale}")]
  InvalidScale { scale: f32 },
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Fail fast unless two paired arrays have the same length.
pub(crate) fn check_lengths(reference: usize, candidate: usize) -> Result<()> {
  if reference == candidate {
    Ok(())
  } else {
    Err(Error::LengthMismatch { reference, candidate })
  }
}
