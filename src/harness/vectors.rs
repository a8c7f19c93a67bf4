//! Plain-text test vectors for an RTL testbench: one pair of upper-case hex words per line,
//! separated by a single space.

use std::io::Write;

use crate::error::Result;
use crate::format::FormatDescriptor;
use crate::{bf16_from_f32, fp8_from_f32, fp8_to_f32};

/// Write one `"{f32 bits:08X} {code:02X}"` line per value, encoding with `format`. Returns the
/// number of lines written.
///
/// ```
/// # use narrow_float::{harness::write_fp8_vectors, E4M3};
/// let mut out = Vec::new();
/// write_fp8_vectors(&mut out, &[1.0, -300.0], &E4M3)?;
/// assert_eq!(String::from_utf8(out).unwrap(), "3F800000 38\nC3960000 F7\n");
/// # Ok::<(), narrow_float::Error>(())
/// ```
pub fn write_fp8_vectors(out: &mut impl Write, values: &[f32], format: &FormatDescriptor) -> Result<usize> {
  for &value in values {
    writeln!(out, "{:08X} {:02X}", value.to_bits(), fp8_from_f32(value, format))?;
  }
  log::debug!("wrote {} {format} encode vectors", values.len());
  Ok(values.len())
}

/// Write one `"{f32 bits:08X} {code:04X}"` line per value, encoding as BF16. Returns the number of
/// lines written.
///
/// NaN lines follow [`bf16_from_f32`]: the payload is truncated and the quiet bit forced, so a
/// device that plainly truncates signaling NaNs disagrees on them (`7FA00000 7FE0`, not `7FA0`).
pub fn write_bf16_vectors(out: &mut impl Write, values: &[f32]) -> Result<usize> {
  for &value in values {
    writeln!(out, "{:08X} {:04X}", value.to_bits(), bf16_from_f32(value))?;
  }
  log::debug!("wrote {} BF16 encode vectors", values.len());
  Ok(values.len())
}

/// Write the full decode table of `format`: one `"{code:02X} {f32 bits:08X}"` line for each of
/// the 256 codes, in order. Returns the number of lines written (always 256).
pub fn write_fp8_decode_table(out: &mut impl Write, format: &FormatDescriptor) -> Result<usize> {
  let mut lines = 0;
  for code in 0 ..= u8::MAX {
    writeln!(out, "{code:02X} {:08X}", fp8_to_f32(code, format).to_bits())?;
    lines += 1;
  }
  log::debug!("wrote {format} decode table");
  Ok(lines)
}
