//! Verification collaborators built on top of the codecs: stimulus generation, test-vector files
//! for a hardware testbench, error statistics, the distance report record, and the tile
//! comparison driver.
//!
//! None of this is needed to *use* the formats; it is what a testbench around an FP8 datapath
//! needs to produce inputs and judge outputs.

mod stimuli;
mod vectors;
mod stats;
mod report;
mod tile;

pub use stimuli::{random_values, standard_stimuli, wide_range_values};
pub use vectors::{write_bf16_vectors, write_fp8_decode_table, write_fp8_vectors};
pub use stats::{bit_distance_finite, percentile, summarize, ErrorSummary};
pub use report::UlpReport;
pub use tile::{run_tile_comparison, TileConfig, TileFormat};
